//! Renderer scene interface
//!
//! Everything the bridge needs from a renderer. Handles are opaque to the
//! bridge: it stores them, hands them back, and never inspects them.

use std::fmt;

use super::{LightKind, LightProperties, MaterialParams, MeshDescriptor, Primitive};
use crate::foundation::math::{Pose, Vec3};

/// A renderer scene graph the bridge can populate
pub trait RenderScene {
    /// Handle to any scene node: visual, light or sensor
    type Node: Clone + PartialEq + fmt::Debug;
    /// Renderable geometry, owned until attached to a node
    type Geometry;
    /// Shared material handle
    type Material: Clone + fmt::Debug;

    /// Root of the scene graph
    fn root_visual(&self) -> Self::Node;

    /// Create an unattached visual node
    fn create_visual(&mut self, name: &str) -> Self::Node;

    /// Release a visual node and everything beneath it
    fn destroy_visual(&mut self, node: &Self::Node);

    /// Create an unattached light node
    fn create_light(&mut self, name: &str, kind: &LightKind) -> Self::Node;

    /// Release a light node
    fn destroy_light(&mut self, node: &Self::Node);

    /// Sensor node previously created by the renderer under `id`
    fn sensor_by_id(&self, id: u64) -> Option<Self::Node>;

    /// Full name of a node
    fn node_name(&self, node: &Self::Node) -> String;

    /// Whether a node is still alive
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Set the pose of a node relative to its parent
    fn set_local_pose(&mut self, node: &Self::Node, pose: &Pose);

    /// Set the scale of a node
    fn set_local_scale(&mut self, node: &Self::Node, scale: &Vec3);

    /// Attach `child` beneath `parent`
    fn add_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach a node from its parent, if it has one
    fn remove_parent(&mut self, node: &Self::Node);

    /// Apply the fields shared by all light kinds
    fn configure_light(&mut self, node: &Self::Node, properties: &LightProperties);

    /// Create a unit primitive
    fn create_primitive(&mut self, primitive: Primitive) -> Self::Geometry;

    /// Wrap a loaded mesh as geometry, carrying the mesh's own material
    fn create_mesh(&mut self, descriptor: &MeshDescriptor) -> Self::Geometry;

    /// Material currently assigned to a geometry
    fn geometry_material(&self, geometry: &Self::Geometry) -> Option<Self::Material>;

    /// Assign a material to a geometry
    fn set_geometry_material(&mut self, geometry: &mut Self::Geometry, material: &Self::Material);

    /// Attach geometry to a node
    fn add_geometry(&mut self, node: &Self::Node, geometry: Self::Geometry);

    /// Create a material. Named materials are registered for [`material`]
    /// lookups; anonymous ones are not.
    ///
    /// [`material`]: RenderScene::material
    fn create_material(&mut self, name: Option<&str>, params: &MaterialParams) -> Self::Material;

    /// Look up a named material
    fn material(&self, name: &str) -> Option<Self::Material>;
}
