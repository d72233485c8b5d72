//! Palette registry for loading and accessing categorical color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. Rounds are coloured by their position among the plotted
//! rounds; colors repeat after exhausting the list.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Default palette: distinguishable under the common forms of color blindness
pub const DEFAULT_PALETTE: &str = "colorblind";

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128];
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or([128, 128, 128])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// Palettes by lowercase name
    palettes: HashMap<String, PaletteDefinition>,
    /// Names in file order (for listing)
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    pub fn default_palette(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_PALETTE)
    }

    /// Get a palette by name, falling back to the default with a warning
    pub fn get_or_default(&self, name: &str) -> Option<&PaletteDefinition> {
        self.get(name).or_else(|| {
            eprintln!(
                "⚠ Unknown palette '{}'. Available: [{}]. Using '{}'",
                name,
                self.names.join(", "),
                DEFAULT_PALETTE
            );
            self.default_palette()
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Global palette registry, initialized lazily on first access
pub fn registry() -> &'static PaletteRegistry {
    static REGISTRY: OnceLock<PaletteRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
            eprintln!("ERROR: Failed to load palettes.json: {}", e);
            PaletteRegistry::default()
        })
    })
}

/// Parse a hex color string to RGB array
///
/// Accepts `#RRGGBB`, `#RRGGBBAA` (alpha ignored), with or without `#`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}
