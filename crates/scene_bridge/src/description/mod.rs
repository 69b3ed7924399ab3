//! Entity descriptions
//!
//! Plain data mirroring what the simulator knows about each entity. The
//! bridge reads these; it never parses the on-disk description format itself.

pub mod entity;
pub mod geometry;
pub mod light;
pub mod material;

pub use entity::{Link, Model, Visual};
pub use geometry::{Geometry, GeometryType};
pub use light::{Attenuation, Light, LightType, SpotCone};
pub use material::{Material, Pbr, PbrWorkflow, PbrWorkflowType};
