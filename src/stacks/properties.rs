//! Plot property definitions with defaults from plot.json
//!
//! plot.json is embedded at compile time and is the single source of truth
//! for property names, kinds, defaults and allowed values. User overrides are
//! a flat `name -> value` map; empty values mean "not set".

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// plot.json embedded at compile time
const PLOT_JSON: &str = include_str!("../../plot.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
}

/// Property definition from plot.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PlotSpecFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all plot properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: PlotSpecFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse plot.json: {}", e))?;

        let properties = file
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PLOT_JSON).unwrap_or_else(|e| {
            eprintln!("ERROR: {}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed property reader: user value when set, otherwise the plot.json default
#[derive(Debug, Clone, Default)]
pub struct PlotPropertyReader {
    user_values: HashMap<String, String>,
}

impl PlotPropertyReader {
    pub fn new(values: impl IntoIterator<Item = (String, String)>) -> Self {
        let user_values = values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { user_values }
    }

    /// Parse a flat JSON object of overrides
    ///
    /// Strings, numbers and booleans are accepted; other values are skipped.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| format!("Invalid override JSON: {}", e))?;

        let values = map.into_iter().filter_map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    eprintln!("⚠ Ignoring property '{}': unsupported value {}", key, other);
                    return None;
                }
            };
            if registry().get_property(&key).is_none() {
                eprintln!("⚠ Unknown property '{}' in overrides", key);
            }
            Some((key, value))
        });

        Ok(Self::new(values))
    }

    pub fn len(&self) -> usize {
        self.user_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_values.is_empty()
    }

    /// Get string property (user value or default from plot.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property with validation, lowercased
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            eprintln!(
                "⚠ Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Get f64 property within `[min, max]`, falling back to the default
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(min);
        let value = self.get_string(name);

        match value.trim().parse::<f64>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                eprintln!(
                    "⚠ Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v, name, min, max, default
                );
                default
            }
            Err(_) => {
                eprintln!(
                    "⚠ Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value, name, default
                );
                default
            }
        }
    }
}

/// Image dimension: explicit pixels or "auto"
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Parse from a property value
    ///
    /// - "auto" or "" → Auto
    /// - "1500" → Pixels(1500) if in [100, 10000]
    pub fn parse(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (100..=10000).contains(&px) => PlotDimension::Pixels(px),
            Ok(px) => {
                eprintln!(
                    "⚠ Plot dimension {} out of valid range [100-10000], using default: {:?}",
                    px, default
                );
                default
            }
            Err(_) => {
                eprintln!(
                    "⚠ Invalid plot dimension '{}', using default: {:?}",
                    trimmed, default
                );
                default
            }
        }
    }

    /// Resolve to pixels; Auto takes `auto_px`
    pub fn resolve(&self, auto_px: u32) -> u32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => auto_px,
        }
    }
}
