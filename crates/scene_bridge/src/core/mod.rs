//! # Core Module
//!
//! Shared configuration types used by the scene bridge.

pub mod config;

pub use config::{BridgeConfig, Config, ConfigError, DefaultMaterialConfig, DEFAULT_MATERIAL_NAME};
