//! Course store implementations and configuration.
//!
//! Provides an in-memory implementation of the core store traits, a JSON
//! file snapshot of it, and the TOML configuration the CLI reads.

pub mod config;
pub mod json;
pub mod memory;

pub use config::{load_config, load_config_from, ModquizConfig};
pub use json::JsonStore;
pub use memory::MemoryStore;
