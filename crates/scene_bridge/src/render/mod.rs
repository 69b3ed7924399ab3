//! # Rendering Interface
//!
//! The renderer is an external collaborator: the bridge drives it through
//! [`RenderScene`] and never draws anything itself. [`MemoryScene`] is an
//! in-process implementation that records the resulting scene graph.

pub mod memory;
mod scene;
mod types;

pub use memory::{MaterialKey, MemoryScene, NodeKey};
pub use scene::RenderScene;
pub use types::{LightKind, LightProperties, MaterialParams, MeshDescriptor, Primitive};
