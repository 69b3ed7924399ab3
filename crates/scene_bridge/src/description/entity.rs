//! Model, link and visual descriptions

use serde::{Deserialize, Serialize};

use super::{Geometry, Material};
use crate::foundation::math::Pose;

/// A model: the top-level grouping of links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Model name; empty names fall back to the entity id
    pub name: String,
    /// Pose relative to the parent
    pub pose: Pose,
}

impl Model {
    /// Create a named model at the identity pose
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose: Pose::identity(),
        }
    }

    /// Set the pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }
}

/// A link: a rigid body inside a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    /// Link name; empty names fall back to the entity id
    pub name: String,
    /// Pose relative to the parent
    pub pose: Pose,
}

impl Link {
    /// Create a named link at the identity pose
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose: Pose::identity(),
        }
    }

    /// Set the pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }
}

/// A visual: renderable geometry attached to a link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visual {
    /// Visual name; empty names fall back to the entity id
    pub name: String,
    /// Pose relative to the parent
    pub pose: Pose,
    /// Shape to render; a visual without one is rejected
    pub geometry: Option<Geometry>,
    /// Explicit material; `None` selects the mesh's own or the shared default
    pub material: Option<Material>,
}

impl Visual {
    /// Create a named visual with the given geometry
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            pose: Pose::identity(),
            geometry: Some(geometry),
            material: None,
        }
    }

    /// Set the pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Set an explicit material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
}
