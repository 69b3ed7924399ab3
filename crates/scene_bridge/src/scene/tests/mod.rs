//! Lifecycle scenarios against the in-memory scene

mod lifecycle;

use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::{AssetError, MeshAsset, MeshLoader, MeshVertex};
use crate::foundation::math::Color;
use crate::render::{MaterialParams, MemoryScene, NodeKey};
use crate::scene::SceneManager;

/// Uri the stub loader knows
pub const MESH_URI: &str = "meshes/wedge.obj";

/// Serves a single triangle with an embedded red material
pub struct StubMeshLoader;

impl MeshLoader for StubMeshLoader {
    fn load(&mut self, uri: &str) -> Result<Arc<MeshAsset>, AssetError> {
        if uri != MESH_URI {
            return Err(AssetError::NotFound(uri.to_string()));
        }
        let vertex = |x: f32, y: f32| MeshVertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            tex_coord: [x, y],
        };
        Ok(Arc::new(MeshAsset {
            name: uri.to_string(),
            vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)],
            indices: vec![0, 1, 2],
            material: Some(MaterialParams {
                diffuse: Color::rgb(1.0, 0.0, 0.0),
                ..MaterialParams::default()
            }),
        }))
    }
}

/// Resolves anything under `textures/`
pub fn texture_resolver(path: &str) -> Option<PathBuf> {
    path.starts_with("textures/").then(|| PathBuf::from("/assets").join(path))
}

/// Manager over an empty scene with the stub collaborators
pub fn manager() -> SceneManager<MemoryScene> {
    SceneManager::new(MemoryScene::new())
        .with_mesh_loader(StubMeshLoader)
        .with_file_resolver(texture_resolver)
}

/// Parent of `node` in the scene
pub fn parent_of(manager: &SceneManager<MemoryScene>, node: NodeKey) -> Option<NodeKey> {
    manager.scene().node(node).and_then(|n| n.parent)
}

/// Full name of `node`
pub fn name_of(manager: &SceneManager<MemoryScene>, node: NodeKey) -> String {
    manager.scene().node(node).map(|n| n.name.clone()).unwrap_or_default()
}
