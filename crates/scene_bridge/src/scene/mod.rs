//! Scene bridge
//!
//! Mirrors the simulator's entity graph onto a renderer scene graph.
//!
//! ## Architecture
//!
//! ```text
//! Simulator descriptions (Model / Link / Visual / Light / sensor ids)
//!      ↓
//! SceneManager (lifecycle, entity tables)
//!      ├── HierarchyBuilder   parent lookup + scoped names
//!      ├── GeometryResolver   shape → unit primitive + scale / mesh
//!      └── MaterialResolver   colors + metal PBR workflow
//!      ↓
//! RenderScene (renderer)
//! ```
//!
//! Entities are keyed by the simulator's [`EntityId`]. Models, links and
//! visuals share one table; lights and sensors each have their own.

mod entity_table;
mod error;
mod geometry;
mod hierarchy;
mod material;
mod scene_manager;

#[cfg(test)]
mod tests;

pub use entity_table::{EntityKind, EntityTable, SceneNode};
pub use error::{EntityRole, SceneError};
pub use geometry::{GeometryResolver, ResolvedGeometry};
pub use hierarchy::{local_name, scoped_name, HierarchyBuilder, Placement, NAME_SEPARATOR};
pub use material::{MaterialResolution, MaterialResolver};
pub use scene_manager::SceneManager;

/// Simulator-assigned entity id
pub type EntityId = u64;
