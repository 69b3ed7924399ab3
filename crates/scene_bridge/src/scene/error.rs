//! Scene bridge errors

use std::fmt;
use thiserror::Error;

use super::{EntityId, EntityKind};
use crate::description::{GeometryType, LightType};

/// What kind of entity an operation was creating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRole {
    /// Model
    Model,
    /// Link
    Link,
    /// Visual
    Visual,
    /// Light
    Light,
    /// Sensor
    Sensor,
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Link => "link",
            Self::Visual => "visual",
            Self::Light => "light",
            Self::Sensor => "sensor",
        })
    }
}

/// Scene bridge errors. None of them are fatal to the bridge itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Creation requested for an id already registered in the same table
    #[error("Entity with id [{id}] already exists in the {kind} table")]
    DuplicateId {
        /// Requested id
        id: EntityId,
        /// Table holding the existing registration
        kind: EntityKind,
    },

    /// Parent id is neither the world nor a registered visual
    #[error("Parent entity with id [{parent}] not found, not adding {role} [{id}]")]
    UnknownParent {
        /// Entity being created
        id: EntityId,
        /// Missing parent
        parent: EntityId,
        /// Kind of entity being created
        role: EntityRole,
    },

    /// Visual description carries no geometry at all
    #[error("Visual [{0}] has no geometry")]
    MissingGeometry(EntityId),

    /// Geometry kind the bridge cannot render
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(GeometryType),

    /// Mesh geometry with an empty uri
    #[error("Mesh geometry missing uri")]
    MissingMeshUri,

    /// Mesh loader failed
    #[error("Failed to load mesh [{uri}]: {reason}")]
    MeshLoad {
        /// Mesh uri
        uri: String,
        /// Loader error
        reason: String,
    },

    /// Light kind the bridge cannot create
    #[error("Light type not supported: {0:?}")]
    UnsupportedLightType(LightType),

    /// PBR block without a metal workflow
    #[error("PBR material: currently only the metal workflow is supported")]
    UnsupportedPbrWorkflow,

    /// No renderer sensor with this renderer-side id
    #[error("Unable to find sensor [{0}]")]
    UnknownSensorHandle(u64),

    /// Material channel path could not be resolved
    #[error("Unable to find file [{0}]")]
    MissingFile(String),
}
