//! Stack Plot Library
//!
//! Reads per-round stack logs and renders them as line charts. Used by the
//! `stack_plot` and `inspect` binaries and the integration tests.

pub mod config;
pub mod pipeline;
pub mod stacks;
