//! # Bridge Configuration
//!
//! Settings for the scene bridge: which id denotes the world, what the
//! shared fallback material looks like, and where resources are searched.
//! Loadable from TOML or RON through the [`Config`] trait.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::foundation::math::Color;
use crate::render::MaterialParams;

pub use crate::config::{Config, ConfigError};

/// Name of the shared material used for visuals without one
pub const DEFAULT_MATERIAL_NAME: &str = "generic-grey";

/// # Default Material Configuration
///
/// Shared material applied to non-mesh visuals that specify no material of
/// their own. Created once in the renderer's named-material cache and
/// reused afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultMaterialConfig {
    /// Key under which the material is cached by the renderer
    pub name: String,
    /// Ambient color
    pub ambient: Color,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// PBR roughness
    pub roughness: f64,
    /// PBR metalness
    pub metalness: f64,
}

impl DefaultMaterialConfig {
    /// Material parameters handed to the renderer on first use
    pub fn params(&self) -> MaterialParams {
        MaterialParams {
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            roughness: Some(self.roughness),
            metalness: Some(self.metalness),
            ..MaterialParams::default()
        }
    }
}

impl Default for DefaultMaterialConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            ambient: Color::gray(0.3),
            diffuse: Color::gray(0.7),
            specular: Color::gray(1.0),
            roughness: 0.2,
            metalness: 1.0,
        }
    }
}

/// # Bridge Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Entity id that stands for the world (scene root)
    pub world_id: u64,
    /// Fallback material for visuals without one
    pub default_material: DefaultMaterialConfig,
    /// Directories searched, in order, when resolving mesh and texture paths
    pub resource_paths: Vec<PathBuf>,
    /// Optional `env_logger` filter, e.g. `"scene_bridge=debug"`
    pub log_filter: Option<String>,
}

impl BridgeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the world id
    pub fn with_world_id(mut self, world_id: u64) -> Self {
        self.world_id = world_id;
        self
    }

    /// Append a resource search path
    pub fn with_resource_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resource_paths.push(path.into());
        self
    }

    /// Replace the default material
    pub fn with_default_material(mut self, material: DefaultMaterialConfig) -> Self {
        self.default_material = material;
        self
    }

    /// Set the log filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            world_id: 0,
            default_material: DefaultMaterialConfig::default(),
            resource_paths: Vec::new(),
            log_filter: None,
        }
    }
}

impl Config for BridgeConfig {}
