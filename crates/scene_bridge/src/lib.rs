//! # Scene Bridge
//!
//! Mirrors a physics simulator's entity graph (models, links, visuals,
//! lights, sensors) onto a renderer's scene graph.
//!
//! ## Features
//!
//! - **Entity Lifecycle**: Create, look up and remove mirrored entities by id
//! - **Hierarchical Naming**: Child nodes are scoped by their parent's name
//! - **Geometry Resolution**: Shape descriptions become unit primitives plus scale
//! - **Material Resolution**: Classic colors and the metal PBR workflow
//! - **Pluggable Renderer**: Anything implementing [`render::RenderScene`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_bridge::prelude::*;
//!
//! let mut bridge = SceneManager::new(MemoryScene::new());
//! bridge.create_model(1, &Model::new("car"), 0)?;
//! bridge.create_link(2, &Link::new("chassis"), 1)?;
//! bridge.create_visual(3, &Visual::new("body", Geometry::cuboid(4.0, 2.0, 1.0)), 2)?;
//!
//! assert!(bridge.has_entity(3));
//! assert!(bridge.scene().find_by_name("car::chassis::body").is_some());
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;

pub mod assets;
pub mod description;
pub mod render;
pub mod scene;

/// Common imports for bridge users
pub mod prelude {
    pub use crate::{
        assets::{FileResolver, MeshLoader, ObjMeshLoader, SearchPathResolver},
        core::{BridgeConfig, Config},
        description::{Geometry, Light, LightType, Link, Material, Model, Pbr, PbrWorkflow, Visual},
        foundation::math::{Color, Pose, Vec2, Vec3},
        render::{MemoryScene, RenderScene},
        scene::{EntityId, EntityKind, SceneError, SceneManager, SceneNode},
    };
}
