//! Values exchanged with the renderer

use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::MeshAsset;
use crate::foundation::math::{Color, Vec3};

/// Built-in unit primitives
///
/// Box, cylinder and sphere span one unit along every axis (unit diameter),
/// the cylinder runs along Z, and the plane lies in XY facing +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Unit cube
    Box,
    /// Unit cylinder along Z
    Cylinder,
    /// Unit plane facing +Z
    Plane,
    /// Unit sphere
    Sphere,
}

/// Request to wrap a loaded mesh as renderable geometry
#[derive(Debug, Clone)]
pub struct MeshDescriptor {
    /// Name the mesh is known by (its uri)
    pub mesh_name: String,
    /// Loaded mesh data
    pub mesh: Arc<MeshAsset>,
    /// Restrict to one named submesh
    pub submesh_name: Option<String>,
    /// Recenter the submesh at the origin
    pub center_submesh: bool,
}

/// Material parameters. Scalars and maps left as `None` keep the
/// renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialParams {
    /// Ambient color
    pub ambient: Color,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Emissive color
    pub emissive: Color,
    /// PBR roughness
    pub roughness: Option<f64>,
    /// PBR metalness
    pub metalness: Option<f64>,
    /// Albedo texture
    pub texture: Option<PathBuf>,
    /// Normal map
    pub normal_map: Option<PathBuf>,
    /// Roughness map
    pub roughness_map: Option<PathBuf>,
    /// Metalness map
    pub metalness_map: Option<PathBuf>,
    /// Environment map
    pub environment_map: Option<PathBuf>,
}

/// Kind-specific light fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Omnidirectional
    Point,
    /// Cone
    Spot {
        /// Fully lit inner cone angle, radians
        inner_angle: f64,
        /// Outer cone angle, radians
        outer_angle: f64,
        /// Falloff between the cones
        falloff: f64,
    },
    /// Parallel rays
    Directional {
        /// Direction of the rays in the light frame
        direction: Vec3,
    },
}

/// Fields shared by every light kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProperties {
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Constant attenuation
    pub attenuation_constant: f64,
    /// Linear attenuation
    pub attenuation_linear: f64,
    /// Quadratic attenuation
    pub attenuation_quadratic: f64,
    /// Attenuation range
    pub attenuation_range: f64,
    /// Whether the light casts shadows
    pub cast_shadows: bool,
}
