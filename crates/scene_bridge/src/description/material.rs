//! Material descriptions

use serde::{Deserialize, Serialize};

use crate::foundation::math::Color;

/// Classic colors plus an optional physically based block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient color
    pub ambient: Color,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Emissive color
    pub emissive: Color,
    /// Physically based parameters
    pub pbr: Option<Pbr>,
}

impl Material {
    /// Material with only a diffuse color
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: color,
            ..Self::default()
        }
    }

    /// Attach a PBR block
    pub fn with_pbr(mut self, pbr: Pbr) -> Self {
        self.pbr = Some(pbr);
        self
    }
}

/// PBR workflows configured for a material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pbr {
    /// Workflows; at most one per [`PbrWorkflowType`] is consulted
    pub workflows: Vec<PbrWorkflow>,
}

impl Pbr {
    /// Block containing a single workflow
    pub fn single(workflow: PbrWorkflow) -> Self {
        Self {
            workflows: vec![workflow],
        }
    }

    /// First workflow of the given type
    pub fn workflow(&self, kind: PbrWorkflowType) -> Option<&PbrWorkflow> {
        self.workflows.iter().find(|w| w.kind == kind)
    }
}

/// PBR parameterization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PbrWorkflowType {
    /// Roughness/metalness
    #[default]
    Metal,
    /// Specular/glossiness
    Specular,
}

/// One PBR workflow. Map paths are empty when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbrWorkflow {
    /// Workflow type
    pub kind: PbrWorkflowType,
    /// Base color texture
    pub albedo_map: String,
    /// Normal map
    pub normal_map: String,
    /// Environment map
    pub environment_map: String,
    /// Roughness scalar (metal workflow)
    pub roughness: f64,
    /// Metalness scalar (metal workflow)
    pub metalness: f64,
    /// Roughness map (metal workflow)
    pub roughness_map: String,
    /// Metalness map (metal workflow)
    pub metalness_map: String,
    /// Glossiness scalar (specular workflow)
    pub glossiness: f64,
    /// Specular map (specular workflow)
    pub specular_map: String,
    /// Glossiness map (specular workflow)
    pub glossiness_map: String,
}

impl PbrWorkflow {
    /// Metal workflow with the given scalars and no maps
    pub fn metal(roughness: f64, metalness: f64) -> Self {
        Self {
            roughness,
            metalness,
            ..Self::default()
        }
    }

    /// Specular workflow with the given glossiness and no maps
    pub fn specular(glossiness: f64) -> Self {
        Self {
            kind: PbrWorkflowType::Specular,
            glossiness,
            ..Self::default()
        }
    }
}

impl Default for PbrWorkflow {
    fn default() -> Self {
        Self {
            kind: PbrWorkflowType::Metal,
            albedo_map: String::new(),
            normal_map: String::new(),
            environment_map: String::new(),
            roughness: 0.5,
            metalness: 0.5,
            roughness_map: String::new(),
            metalness_map: String::new(),
            glossiness: 0.0,
            specular_map: String::new(),
            glossiness_map: String::new(),
        }
    }
}
