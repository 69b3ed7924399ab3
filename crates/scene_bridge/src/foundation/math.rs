//! Math utilities and types
//!
//! Simulator poses arrive in double precision, so every type here is `f64`.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

pub use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f64>;

/// Tolerance used when comparing poses against identity
pub const POSE_EPSILON: f64 = 1e-6;

/// Rigid transform: position plus rotation, no scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    /// Translation relative to the parent frame
    pub position: Vec3,

    /// Rotation relative to the parent frame
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Identity pose
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }

    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose with only a translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
        }
    }

    /// Create a pose with only a rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::zeros(),
            rotation,
        }
    }

    /// Create a pose from a translation and roll/pitch/yaw angles in radians
    pub fn from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Quat::from_euler_angles(roll, pitch, yaw),
        }
    }

    /// Whether this pose is the identity within [`POSE_EPSILON`]
    pub fn is_identity(&self) -> bool {
        approx::abs_diff_eq!(self.position, Vec3::zeros(), epsilon = POSE_EPSILON)
            && self.rotation.angle().abs() <= POSE_EPSILON
    }

    /// Apply this pose to a point expressed in the child frame
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    /// Inverse pose
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            position: rotation * -self.position,
            rotation,
        }
    }
}

impl Mul for Pose {
    type Output = Self;

    /// Compose `self` (parent) with `rhs` (child expressed in the parent frame)
    fn mul(self, rhs: Self) -> Self {
        Self {
            position: self.position + self.rotation * rhs.position,
            rotation: self.rotation * rhs.rotation,
        }
    }
}

/// Shortest-arc rotation taking `from` onto `to`.
///
/// Antiparallel inputs have no unique shortest arc; a half turn about an axis
/// perpendicular to `from` is returned. Zero-length inputs give identity.
pub fn rotation_between(from: &Vec3, to: &Vec3) -> Quat {
    if from.norm() <= f64::EPSILON || to.norm() <= f64::EPSILON {
        return Quat::identity();
    }
    Quat::rotation_between(from, to).unwrap_or_else(|| {
        let axis = if from.x.abs() < 0.9 {
            Vec3::x().cross(from)
        } else {
            Vec3::y().cross(from)
        };
        Quat::from_axis_angle(&nalgebra::Unit::new_normalize(axis), std::f64::consts::PI)
    })
}

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    #[serde(default = "Color::opaque")]
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with all channels set to `value`
    pub const fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    const fn opaque() -> f32 {
        1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
