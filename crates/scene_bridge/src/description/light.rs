//! Light descriptions

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Color, Pose, Vec3};

/// Light kind as described by the simulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightType {
    /// Not a valid light
    #[default]
    Invalid,
    /// Omnidirectional light at a point
    Point,
    /// Cone of light
    Spot,
    /// Parallel rays, like sunlight
    Directional,
}

/// Distance falloff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    /// Constant factor
    pub constant: f64,
    /// Linear factor
    pub linear: f64,
    /// Quadratic factor
    pub quadratic: f64,
    /// Distance beyond which the light has no effect
    pub range: f64,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 1.0,
            quadratic: 0.0,
            range: 10.0,
        }
    }
}

/// Spot light cone, in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotCone {
    /// Angle of the fully lit inner cone
    pub inner_angle: f64,
    /// Angle where the light fades out
    pub outer_angle: f64,
    /// Falloff between inner and outer cone
    pub falloff: f64,
}

/// A light source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    /// Light name; empty names fall back to the entity id
    pub name: String,
    /// Light kind
    pub kind: LightType,
    /// Pose relative to the parent
    pub pose: Pose,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Distance falloff
    pub attenuation: Attenuation,
    /// Whether the light casts shadows
    pub cast_shadows: bool,
    /// Direction of directional lights, in the light frame
    pub direction: Vec3,
    /// Cone of spot lights
    pub spot: SpotCone,
}

impl Light {
    /// Light of the given kind with default parameters
    pub fn new(name: impl Into<String>, kind: LightType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Point light
    pub fn point(name: impl Into<String>) -> Self {
        Self::new(name, LightType::Point)
    }

    /// Spot light with the given cone
    pub fn spot(name: impl Into<String>, spot: SpotCone) -> Self {
        Self {
            spot,
            ..Self::new(name, LightType::Spot)
        }
    }

    /// Directional light shining along `direction`
    pub fn directional(name: impl Into<String>, direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::new(name, LightType::Directional)
        }
    }

    /// Set the pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: LightType::Invalid,
            pose: Pose::identity(),
            diffuse: Color::WHITE,
            specular: Color::gray(0.1),
            attenuation: Attenuation::default(),
            cast_shadows: false,
            direction: Vec3::new(0.0, 0.0, -1.0),
            spot: SpotCone::default(),
        }
    }
}
