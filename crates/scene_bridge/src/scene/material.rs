//! Material descriptions to renderer materials

use std::path::PathBuf;

use crate::assets::FileResolver;
use crate::description::{Material, PbrWorkflowType};
use crate::render::{MaterialParams, RenderScene};

use super::SceneError;

/// Resolved parameters plus anything that was skipped along the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialResolution {
    /// Parameters to create the material with
    pub params: MaterialParams,
    /// Non-fatal problems; the affected channels were left unset
    pub issues: Vec<SceneError>,
}

/// Builds [`MaterialParams`] from a [`Material`], resolving texture paths
pub struct MaterialResolver<'a> {
    files: &'a dyn FileResolver,
}

impl<'a> MaterialResolver<'a> {
    /// Resolver looking texture paths up through `files`
    pub fn new(files: &'a dyn FileResolver) -> Self {
        Self { files }
    }

    /// Resolve `material` without touching the renderer
    pub fn resolve_params(&self, material: &Material) -> MaterialResolution {
        let mut resolution = MaterialResolution {
            params: MaterialParams {
                ambient: material.ambient,
                diffuse: material.diffuse,
                specular: material.specular,
                emissive: material.emissive,
                ..MaterialParams::default()
            },
            issues: Vec::new(),
        };

        let Some(pbr) = &material.pbr else {
            return resolution;
        };
        let Some(metal) = pbr.workflow(PbrWorkflowType::Metal) else {
            resolution.issues.push(SceneError::UnsupportedPbrWorkflow);
            return resolution;
        };

        let params = &mut resolution.params;
        params.roughness = Some(metal.roughness);
        params.metalness = Some(metal.metalness);

        let channels: [(&str, &mut Option<PathBuf>); 5] = [
            (&metal.roughness_map, &mut params.roughness_map),
            (&metal.metalness_map, &mut params.metalness_map),
            (&metal.albedo_map, &mut params.texture),
            (&metal.normal_map, &mut params.normal_map),
            (&metal.environment_map, &mut params.environment_map),
        ];
        for (path, slot) in channels {
            if path.is_empty() {
                continue;
            }
            match self.files.find_file(path) {
                Some(resolved) => *slot = Some(resolved),
                None => resolution.issues.push(SceneError::MissingFile(path.to_string())),
            }
        }

        resolution
    }

    /// Create an anonymous renderer material for `material`, logging every
    /// skipped channel
    pub fn create<R: RenderScene>(&self, scene: &mut R, material: &Material) -> R::Material {
        let resolution = self.resolve_params(material);
        for issue in &resolution.issues {
            log::warn!("{issue}");
        }
        scene.create_material(None, &resolution.params)
    }
}
