//! Shape descriptions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::foundation::math::{Vec2, Vec3};

/// Shape of a visual
///
/// Only box, cylinder, plane, sphere and mesh shapes are rendered; the other
/// kinds are recognized so they can be reported as unsupported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// No shape
    Empty,
    /// Axis-aligned box with full extents `size`
    Box {
        /// Edge lengths along X, Y and Z
        size: Vec3,
    },
    /// Cylinder along +Z
    Cylinder {
        /// Radius
        radius: f64,
        /// Length along Z
        length: f64,
    },
    /// Flat rectangle
    Plane {
        /// Extents in the plane
        size: Vec2,
        /// Plane normal in the visual frame
        #[serde(default = "unit_z")]
        normal: Vec3,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f64,
    },
    /// Capsule along +Z
    Capsule {
        /// Radius
        radius: f64,
        /// Length of the cylindrical section
        length: f64,
    },
    /// Ellipsoid
    Ellipsoid {
        /// Radii along X, Y and Z
        radii: Vec3,
    },
    /// Terrain built from an image
    Heightmap {
        /// Image location
        uri: String,
        /// Terrain extents
        size: Vec3,
    },
    /// Mesh loaded from an asset
    Mesh(MeshShape),
}

fn unit_z() -> Vec3 {
    Vec3::z()
}

fn unit_scale() -> Vec3 {
    Vec3::repeat(1.0)
}

/// Mesh reference with its scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshShape {
    /// Asset location handed to the mesh loader
    pub uri: String,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Restrict rendering to one named submesh
    #[serde(default)]
    pub submesh: Option<String>,
    /// Recenter the selected submesh at the origin
    #[serde(default)]
    pub center_submesh: bool,
}

impl Geometry {
    /// Box with edge lengths `x`, `y`, `z`
    pub fn cuboid(x: f64, y: f64, z: f64) -> Self {
        Self::Box {
            size: Vec3::new(x, y, z),
        }
    }

    /// Cylinder with `radius` and `length`
    pub fn cylinder(radius: f64, length: f64) -> Self {
        Self::Cylinder { radius, length }
    }

    /// Sphere with `radius`
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    /// Plane with extents `size` facing `normal`
    pub fn plane(size: Vec2, normal: Vec3) -> Self {
        Self::Plane { size, normal }
    }

    /// Unscaled mesh at `uri`
    pub fn mesh(uri: impl Into<String>) -> Self {
        Self::Mesh(MeshShape {
            uri: uri.into(),
            scale: unit_scale(),
            submesh: None,
            center_submesh: false,
        })
    }

    /// Discriminant of this shape
    pub fn kind(&self) -> GeometryType {
        match self {
            Self::Empty => GeometryType::Empty,
            Self::Box { .. } => GeometryType::Box,
            Self::Cylinder { .. } => GeometryType::Cylinder,
            Self::Plane { .. } => GeometryType::Plane,
            Self::Sphere { .. } => GeometryType::Sphere,
            Self::Capsule { .. } => GeometryType::Capsule,
            Self::Ellipsoid { .. } => GeometryType::Ellipsoid,
            Self::Heightmap { .. } => GeometryType::Heightmap,
            Self::Mesh(_) => GeometryType::Mesh,
        }
    }

    /// Whether this is a mesh shape
    pub fn is_mesh(&self) -> bool {
        matches!(self, Self::Mesh(_))
    }
}

/// Shape kind without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    /// [`Geometry::Empty`]
    Empty,
    /// [`Geometry::Box`]
    Box,
    /// [`Geometry::Cylinder`]
    Cylinder,
    /// [`Geometry::Plane`]
    Plane,
    /// [`Geometry::Sphere`]
    Sphere,
    /// [`Geometry::Capsule`]
    Capsule,
    /// [`Geometry::Ellipsoid`]
    Ellipsoid,
    /// [`Geometry::Heightmap`]
    Heightmap,
    /// [`Geometry::Mesh`]
    Mesh,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Plane => "plane",
            Self::Sphere => "sphere",
            Self::Capsule => "capsule",
            Self::Ellipsoid => "ellipsoid",
            Self::Heightmap => "heightmap",
            Self::Mesh => "mesh",
        };
        f.write_str(name)
    }
}
