//! OBJ mesh loader
//!
//! Loads Wavefront OBJ files into shared [`MeshAsset`]s, caching by uri so
//! every visual referencing the same mesh shares one asset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AssetError, FileResolver, MeshAsset, MeshLoader, MeshVertex, MtlParser, SearchPathResolver};
use crate::render::MaterialParams;

/// Mesh loader for OBJ files with an optional MTL companion
pub struct ObjMeshLoader {
    resolver: Box<dyn FileResolver>,
    cache: HashMap<String, Arc<MeshAsset>>,
}

impl ObjMeshLoader {
    /// Loader resolving uris with `resolver`
    pub fn new(resolver: impl FileResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            cache: HashMap::new(),
        }
    }

    /// Number of cached meshes
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached mesh
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Parse OBJ text. `base_dir` anchors relative `mtllib` references.
    pub fn parse_obj(&self, name: &str, contents: &str, base_dir: Option<&Path>) -> Result<MeshAsset, AssetError> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut material_lib: Option<String> = None;
        let mut used_material: Option<String> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" if parts.len() >= 4 => positions.push(parse_floats::<3>(&parts[1..], line_num, "vertex")?),
                "vn" if parts.len() >= 4 => normals.push(parse_floats::<3>(&parts[1..], line_num, "normal")?),
                "vt" if parts.len() >= 3 => tex_coords.push(parse_floats::<2>(&parts[1..], line_num, "tex coord")?),
                "f" if parts.len() >= 4 => {
                    let mut face_indices = Vec::with_capacity(parts.len() - 1);
                    for vertex_data in &parts[1..] {
                        let vertex = build_vertex(vertex_data, line_num, &positions, &normals, &tex_coords)?;
                        vertices.push(vertex);
                        face_indices.push(index_u32(vertices.len() - 1)?);
                    }

                    // Fan triangulation
                    for i in 1..(face_indices.len() - 1) {
                        indices.extend_from_slice(&[face_indices[0], face_indices[i], face_indices[i + 1]]);
                    }
                }
                "mtllib" if parts.len() >= 2 => material_lib = Some(parts[1..].join(" ")),
                "usemtl" if parts.len() >= 2 && used_material.is_none() => used_material = Some(parts[1].to_string()),
                _ => {}
            }
        }

        if vertices.is_empty() {
            return Err(AssetError::InvalidFormat(format!("No vertices found in [{name}]")));
        }

        let material = match (material_lib, used_material) {
            (Some(lib), Some(used)) => self.load_material(&lib, &used, base_dir),
            _ => None,
        };

        Ok(MeshAsset {
            name: name.to_string(),
            vertices,
            indices,
            material,
        })
    }

    /// Embedded material lookup. Failures only cost the mesh its material.
    fn load_material(&self, lib: &str, material_name: &str, base_dir: Option<&Path>) -> Option<MaterialParams> {
        let lib_path = base_dir
            .map(|dir| dir.join(lib))
            .filter(|path| path.exists())
            .or_else(|| self.resolver.find_file(lib));
        let Some(lib_path) = lib_path else {
            log::warn!("Unable to find material library [{}]", lib);
            return None;
        };

        let parsed = std::fs::read_to_string(&lib_path)
            .map_err(AssetError::from)
            .and_then(|contents| MtlParser::parse(&contents));
        let materials = match parsed {
            Ok(materials) => materials,
            Err(e) => {
                log::warn!("Failed to read material library [{}]: {}", lib_path.display(), e);
                return None;
            }
        };

        let Some(data) = materials.get(material_name) else {
            log::warn!("Material '{}' not defined in [{}]", material_name, lib_path.display());
            return None;
        };

        let lib_dir = lib_path.parent().map(Path::to_path_buf);
        let texture_resolver = |path: &str| -> Option<PathBuf> {
            lib_dir
                .as_ref()
                .map(|dir| dir.join(path))
                .filter(|p| p.exists())
                .or_else(|| self.resolver.find_file(path))
        };
        Some(data.to_material_params(&texture_resolver))
    }
}

impl Default for ObjMeshLoader {
    fn default() -> Self {
        Self::new(SearchPathResolver::new())
    }
}

impl MeshLoader for ObjMeshLoader {
    fn load(&mut self, uri: &str) -> Result<Arc<MeshAsset>, AssetError> {
        if let Some(mesh) = self.cache.get(uri) {
            return Ok(Arc::clone(mesh));
        }

        let path = self
            .resolver
            .find_file(uri)
            .ok_or_else(|| AssetError::NotFound(uri.to_string()))?;
        let contents = std::fs::read_to_string(&path)?;
        let mesh = Arc::new(self.parse_obj(uri, &contents, path.parent())?);

        log::debug!(
            "Loaded mesh [{}]: {} vertices, {} triangles",
            uri,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        self.cache.insert(uri.to_string(), Arc::clone(&mesh));
        Ok(mesh)
    }
}

fn parse_floats<const N: usize>(tokens: &[&str], line_num: usize, what: &str) -> Result<[f32; N], AssetError> {
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token
            .parse()
            .map_err(|_| AssetError::Parse(format!("Line {}: invalid {} '{}'", line_num + 1, what, token)))?;
    }
    Ok(out)
}

fn build_vertex(
    vertex_data: &str,
    line_num: usize,
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    tex_coords: &[[f32; 2]],
) -> Result<MeshVertex, AssetError> {
    let mut fields = vertex_data.split('/');

    // OBJ indices are 1-based
    let position = fields
        .next()
        .and_then(|idx| idx.parse::<usize>().ok())
        .and_then(|idx| idx.checked_sub(1))
        .ok_or_else(|| AssetError::Parse(format!("Line {}: invalid position index", line_num + 1)))?;
    let tex = fields
        .next()
        .and_then(|idx| idx.parse::<usize>().ok())
        .and_then(|idx| idx.checked_sub(1));
    let normal = fields
        .next()
        .and_then(|idx| idx.parse::<usize>().ok())
        .and_then(|idx| idx.checked_sub(1));

    let position = *positions
        .get(position)
        .ok_or_else(|| AssetError::InvalidFormat(format!("Line {}: position index out of bounds", line_num + 1)))?;

    Ok(MeshVertex {
        position,
        normal: normal.and_then(|i| normals.get(i)).copied().unwrap_or([0.0, 0.0, 1.0]),
        tex_coord: tex.and_then(|i| tex_coords.get(i)).copied().unwrap_or([0.0, 0.0]),
    })
}

fn index_u32(index: usize) -> Result<u32, AssetError> {
    u32::try_from(index).map_err(|_| AssetError::InvalidFormat("mesh exceeds u32 index range".to_string()))
}
