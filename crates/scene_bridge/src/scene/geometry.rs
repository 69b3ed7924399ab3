//! Shape descriptors to renderer geometry
//!
//! Every built-in primitive is a unit shape; the requested dimensions become
//! a scale on the node carrying it. Planes additionally need a corrective
//! rotation because the primitive always faces +Z.

use crate::assets::MeshLoader;
use crate::description::geometry::MeshShape;
use crate::description::Geometry;
use crate::foundation::math::{rotation_between, Pose, Vec3};
use crate::render::{MeshDescriptor, Primitive, RenderScene};

use super::SceneError;

/// Geometry plus how to place it under its visual
#[derive(Debug)]
pub struct ResolvedGeometry<G> {
    /// Renderer geometry
    pub geometry: G,
    /// Scale for the node carrying the geometry
    pub scale: Vec3,
    /// Pose between the visual and the geometry; identity unless the
    /// primitive's built-in orientation needs correcting
    pub local_pose: Pose,
}

/// Turns [`Geometry`] descriptions into renderer geometry
pub struct GeometryResolver<'a> {
    mesh_loader: &'a mut dyn MeshLoader,
}

impl<'a> GeometryResolver<'a> {
    /// Resolver loading meshes through `mesh_loader`
    pub fn new(mesh_loader: &'a mut dyn MeshLoader) -> Self {
        Self { mesh_loader }
    }

    /// Create renderer geometry for `geometry`.
    ///
    /// Unsupported kinds, empty mesh uris and mesh load failures return an
    /// error without creating anything.
    pub fn resolve<R: RenderScene>(
        &mut self,
        scene: &mut R,
        geometry: &Geometry,
    ) -> Result<ResolvedGeometry<R::Geometry>, SceneError> {
        let unit = |scene: &mut R, primitive: Primitive, scale: Vec3| ResolvedGeometry {
            geometry: scene.create_primitive(primitive),
            scale,
            local_pose: Pose::identity(),
        };

        match geometry {
            Geometry::Box { size } => Ok(unit(scene, Primitive::Box, *size)),
            Geometry::Cylinder { radius, length } => {
                let diameter = radius * 2.0;
                Ok(unit(scene, Primitive::Cylinder, Vec3::new(diameter, diameter, *length)))
            }
            Geometry::Sphere { radius } => Ok(unit(scene, Primitive::Sphere, Vec3::repeat(radius * 2.0))),
            Geometry::Plane { size, normal } => {
                let mut resolved = unit(scene, Primitive::Plane, Vec3::new(size.x, size.y, 1.0));
                resolved.local_pose = plane_pose(normal);
                Ok(resolved)
            }
            Geometry::Mesh(shape) => self.load_mesh(scene, shape),
            other => Err(SceneError::UnsupportedGeometry(other.kind())),
        }
    }

    fn load_mesh<R: RenderScene>(
        &mut self,
        scene: &mut R,
        shape: &MeshShape,
    ) -> Result<ResolvedGeometry<R::Geometry>, SceneError> {
        if shape.uri.is_empty() {
            return Err(SceneError::MissingMeshUri);
        }

        let mesh = self.mesh_loader.load(&shape.uri).map_err(|e| SceneError::MeshLoad {
            uri: shape.uri.clone(),
            reason: e.to_string(),
        })?;

        let descriptor = MeshDescriptor {
            mesh_name: shape.uri.clone(),
            mesh,
            submesh_name: shape.submesh.clone(),
            center_submesh: shape.center_submesh,
        };

        Ok(ResolvedGeometry {
            geometry: scene.create_mesh(&descriptor),
            scale: shape.scale,
            local_pose: Pose::identity(),
        })
    }
}

/// Rotation taking the plane primitive's +Z normal onto `normal`
fn plane_pose(normal: &Vec3) -> Pose {
    let target = normal.try_normalize(f64::EPSILON).unwrap_or_else(|| {
        log::warn!("Plane normal has zero length, using +Z");
        Vec3::z()
    });
    Pose::from_rotation(rotation_between(&Vec3::z(), &target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, MeshAsset, MeshVertex};
    use crate::description::GeometryType;
    use crate::foundation::math::Vec2;
    use crate::render::memory::{GeometryShape, MemoryGeometry};
    use crate::render::MemoryScene;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    struct FixedMesh {
        loads: usize,
    }

    impl MeshLoader for FixedMesh {
        fn load(&mut self, uri: &str) -> Result<Arc<MeshAsset>, AssetError> {
            if uri != "meshes/tri.obj" {
                return Err(AssetError::NotFound(uri.to_string()));
            }
            self.loads += 1;
            let vertex = MeshVertex {
                position: [0.0; 3],
                normal: [0.0, 0.0, 1.0],
                tex_coord: [0.0; 2],
            };
            Ok(Arc::new(MeshAsset {
                name: uri.to_string(),
                vertices: vec![vertex; 3],
                indices: vec![0, 1, 2],
                material: None,
            }))
        }
    }

    fn resolve(geometry: &Geometry) -> Result<ResolvedGeometry<MemoryGeometry>, SceneError> {
        let mut scene = MemoryScene::new();
        let mut loader = FixedMesh { loads: 0 };
        GeometryResolver::new(&mut loader).resolve(&mut scene, geometry)
    }

    #[test]
    fn test_box_scale_is_size() {
        let resolved = resolve(&Geometry::cuboid(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(resolved.geometry.shape, GeometryShape::Primitive(Primitive::Box));
        assert_eq!(resolved.scale, Vec3::new(1.0, 2.0, 3.0));
        assert!(resolved.local_pose.is_identity());
    }

    #[test]
    fn test_cylinder_scale_uses_diameter() {
        let resolved = resolve(&Geometry::cylinder(2.0, 5.0)).unwrap();
        assert_eq!(resolved.geometry.shape, GeometryShape::Primitive(Primitive::Cylinder));
        assert_eq!(resolved.scale, Vec3::new(4.0, 4.0, 5.0));
    }

    #[test]
    fn test_sphere_scale_uses_diameter() {
        let resolved = resolve(&Geometry::sphere(1.0)).unwrap();
        assert_eq!(resolved.scale, Vec3::new(2.0, 2.0, 2.0));
        assert!(resolved.local_pose.is_identity());
    }

    #[test]
    fn test_plane_facing_up_needs_no_correction() {
        let resolved = resolve(&Geometry::plane(Vec2::new(3.0, 4.0), Vec3::z())).unwrap();
        assert_eq!(resolved.scale, Vec3::new(3.0, 4.0, 1.0));
        assert!(resolved.local_pose.is_identity());
    }

    #[test]
    fn test_plane_normal_rotates_z_onto_request() {
        let resolved = resolve(&Geometry::plane(Vec2::new(1.0, 1.0), Vec3::x())).unwrap();
        assert!(!resolved.local_pose.is_identity());
        assert_relative_eq!(resolved.local_pose.rotation * Vec3::z(), Vec3::x(), epsilon = 1e-9);
        assert_relative_eq!(resolved.local_pose.position, Vec3::zeros());

        // Unnormalized normals are normalized first
        let resolved = resolve(&Geometry::plane(Vec2::new(1.0, 1.0), Vec3::new(0.0, 5.0, 0.0))).unwrap();
        assert_relative_eq!(resolved.local_pose.rotation * Vec3::z(), Vec3::y(), epsilon = 1e-9);
    }

    #[test]
    fn test_mesh_uses_loader_and_scale() {
        let mut scene = MemoryScene::new();
        let mut loader = FixedMesh { loads: 0 };
        let mut shape = MeshShape {
            uri: "meshes/tri.obj".to_string(),
            scale: Vec3::new(0.5, 0.5, 2.0),
            submesh: Some("body".to_string()),
            center_submesh: true,
        };

        let resolved = GeometryResolver::new(&mut loader)
            .resolve(&mut scene, &Geometry::Mesh(shape.clone()))
            .unwrap();
        assert_eq!(loader.loads, 1);
        assert_eq!(resolved.scale, Vec3::new(0.5, 0.5, 2.0));
        assert_eq!(
            resolved.geometry.shape,
            GeometryShape::Mesh {
                name: "meshes/tri.obj".to_string(),
                triangles: 1,
                submesh: Some("body".to_string()),
            }
        );

        shape.uri.clear();
        let err = GeometryResolver::new(&mut loader)
            .resolve(&mut scene, &Geometry::Mesh(shape))
            .unwrap_err();
        assert_eq!(err, SceneError::MissingMeshUri);
        assert_eq!(loader.loads, 1);
    }

    #[test]
    fn test_mesh_load_failure() {
        let err = resolve(&Geometry::mesh("meshes/missing.obj")).unwrap_err();
        assert!(matches!(err, SceneError::MeshLoad { uri, .. } if uri == "meshes/missing.obj"));
    }

    #[test]
    fn test_unsupported_kinds() {
        let capsule = Geometry::Capsule {
            radius: 1.0,
            length: 2.0,
        };
        assert_eq!(
            resolve(&capsule).unwrap_err(),
            SceneError::UnsupportedGeometry(GeometryType::Capsule)
        );
        assert_eq!(
            resolve(&Geometry::Empty).unwrap_err(),
            SceneError::UnsupportedGeometry(GeometryType::Empty)
        );
    }
}
