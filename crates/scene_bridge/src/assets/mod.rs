//! Asset collaborators
//!
//! The bridge consumes two services it does not implement itself: turning a
//! mesh uri into a loaded mesh, and turning a relative or symbolic path into
//! an absolute one. Both are traits here, with a file-system backed
//! implementation of each.

pub mod file_resolver;
pub mod mtl_parser;
pub mod obj_loader;

pub use file_resolver::{FileResolver, SearchPathResolver};
pub use mtl_parser::{MtlData, MtlParser};
pub use obj_loader::ObjMeshLoader;

use std::sync::Arc;
use thiserror::Error;

use crate::render::MaterialParams;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Asset could not be located
    #[error("Asset not found: {0}")]
    NotFound(String),
    /// Malformed content
    #[error("Parse error: {0}")]
    Parse(String),
    /// Well-formed but unusable content
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Vertex of a loaded mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Position
    pub position: [f32; 3],
    /// Normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

/// A loaded mesh, shared between every visual that references it
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    /// Name the mesh was loaded under (its uri)
    pub name: String,
    /// Triangle vertices
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
    /// Material embedded in the asset, if any
    pub material: Option<MaterialParams>,
}

impl MeshAsset {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Loads mesh assets by uri
pub trait MeshLoader {
    /// Load the mesh at `uri`. Implementations may cache.
    fn load(&mut self, uri: &str) -> Result<Arc<MeshAsset>, AssetError>;
}
