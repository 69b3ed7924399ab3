//! In-process reference renderer
//!
//! A plain scene graph stored in slot maps. It performs no drawing but
//! tracks every node, geometry, material and light parameter the bridge
//! produces, which makes it the backend for tests, tooling and headless
//! runs.

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use std::fmt::Write as _;

use super::{LightKind, LightProperties, MaterialParams, MeshDescriptor, Primitive, RenderScene};
use crate::foundation::math::{Pose, Vec3};

new_key_type! {
    /// Handle to a node of a [`MemoryScene`]
    pub struct NodeKey;
    /// Handle to a material of a [`MemoryScene`]
    pub struct MaterialKey;
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Scene root
    Root,
    /// Plain visual
    Visual,
    /// Light with its kind and, once configured, its shared properties
    Light(LightKind, Option<LightProperties>),
    /// Sensor created by the renderer under a renderer-side id
    Sensor {
        /// Renderer-side sensor id
        id: u64,
    },
}

/// Shape carried by a [`MemoryGeometry`]
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryShape {
    /// Unit primitive
    Primitive(Primitive),
    /// Loaded mesh
    Mesh {
        /// Mesh name
        name: String,
        /// Triangle count of the mesh
        triangles: usize,
        /// Selected submesh
        submesh: Option<String>,
    },
}

/// Geometry of a [`MemoryScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryGeometry {
    /// Shape
    pub shape: GeometryShape,
    /// Assigned material
    pub material: Option<MaterialKey>,
}

/// Node storage
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Full name
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Pose relative to the parent
    pub pose: Pose,
    /// Local scale
    pub scale: Vec3,
    /// Parent node
    pub parent: Option<NodeKey>,
    /// Child nodes
    pub children: Vec<NodeKey>,
    /// Attached geometry
    pub geometries: Vec<MemoryGeometry>,
}

impl NodeData {
    fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            pose: Pose::identity(),
            scale: Vec3::repeat(1.0),
            parent: None,
            children: Vec::new(),
            geometries: Vec::new(),
        }
    }
}

/// Material storage
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    /// Registered name, if any
    pub name: Option<String>,
    /// Parameters
    pub params: MaterialParams,
}

/// Counters of destructive and allocating calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// `destroy_visual` calls
    pub visuals_destroyed: usize,
    /// `destroy_light` calls
    pub lights_destroyed: usize,
    /// Materials created, named or anonymous
    pub materials_created: usize,
}

/// Slot-map backed scene graph implementing [`RenderScene`]
#[derive(Debug)]
pub struct MemoryScene {
    nodes: SlotMap<NodeKey, NodeData>,
    materials: SlotMap<MaterialKey, MaterialData>,
    named_materials: HashMap<String, MaterialKey>,
    sensors: HashMap<u64, NodeKey>,
    root: NodeKey,
    stats: SceneStats,
}

impl MemoryScene {
    /// Name of the root node
    pub const ROOT_NAME: &'static str = "root";

    /// Empty scene containing only the root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(Self::ROOT_NAME, NodeKind::Root));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            named_materials: HashMap::new(),
            sensors: HashMap::new(),
            root,
            stats: SceneStats::default(),
        }
    }

    /// Create a sensor node under the root, as a sensor subsystem would
    pub fn register_sensor(&mut self, id: u64, name: &str) -> NodeKey {
        let key = self.nodes.insert(NodeData::new(name, NodeKind::Sensor { id }));
        self.attach(self.root, key);
        self.sensors.insert(id, key);
        key
    }

    /// Node data, if the node still exists
    pub fn node(&self, key: NodeKey) -> Option<&NodeData> {
        self.nodes.get(key)
    }

    /// Whether the node still exists
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node with the given full name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes.iter().find(|(_, node)| node.name == name).map(|(key, _)| key)
    }

    /// Material data
    pub fn material_data(&self, key: MaterialKey) -> Option<&MaterialData> {
        self.materials.get(key)
    }

    /// Number of live materials
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Call counters
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Indented dump of the graph below the root
    pub fn describe_tree(&self) -> String {
        let mut out = String::new();
        self.describe_node(self.root, 0, &mut out);
        out
    }

    fn describe_node(&self, key: NodeKey, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let kind = match &node.kind {
            NodeKind::Root => "root".to_string(),
            NodeKind::Visual => "visual".to_string(),
            NodeKind::Light(kind, _) => format!("light {kind:?}"),
            NodeKind::Sensor { id } => format!("sensor #{id}"),
        };
        let _ = write!(out, "{:indent$}{} [{}]", "", node.name, kind, indent = depth * 2);
        for geometry in &node.geometries {
            match &geometry.shape {
                GeometryShape::Primitive(primitive) => {
                    let _ = write!(out, " {primitive:?}");
                }
                GeometryShape::Mesh { name, triangles, .. } => {
                    let _ = write!(out, " mesh({name}, {triangles} tris)");
                }
            }
            if let Some(name) = geometry
                .material
                .and_then(|m| self.materials.get(m))
                .and_then(|m| m.name.as_deref())
            {
                let _ = write!(out, " <{name}>");
            }
        }
        out.push('\n');
        for child in &node.children {
            self.describe_node(*child, depth + 1, out);
        }
    }

    fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::warn!("MemoryScene: ignoring invalid attach {:?} -> {:?}", child, parent);
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn detach(&mut self, child: NodeKey) {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|c| *c != child);
        }
    }

    /// Remove a node and its descendants. Sensors belong to the sensor
    /// subsystem and are detached rather than removed.
    fn remove_subtree(&mut self, key: NodeKey) {
        self.detach(key);
        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            if matches!(self.nodes.get(current).map(|n| &n.kind), Some(NodeKind::Sensor { .. })) {
                self.detach(current);
                continue;
            }
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
            }
        }
    }

    fn material_from_params(&mut self, name: Option<&str>, params: &MaterialParams) -> MaterialKey {
        self.stats.materials_created += 1;
        self.materials.insert(MaterialData {
            name: name.map(str::to_string),
            params: params.clone(),
        })
    }
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderScene for MemoryScene {
    type Node = NodeKey;
    type Geometry = MemoryGeometry;
    type Material = MaterialKey;

    fn root_visual(&self) -> NodeKey {
        self.root
    }

    fn create_visual(&mut self, name: &str) -> NodeKey {
        self.nodes.insert(NodeData::new(name, NodeKind::Visual))
    }

    fn destroy_visual(&mut self, node: &NodeKey) {
        if *node == self.root {
            log::warn!("MemoryScene: refusing to destroy the root visual");
            return;
        }
        self.stats.visuals_destroyed += 1;
        self.remove_subtree(*node);
    }

    fn create_light(&mut self, name: &str, kind: &LightKind) -> NodeKey {
        self.nodes.insert(NodeData::new(name, NodeKind::Light(*kind, None)))
    }

    fn destroy_light(&mut self, node: &NodeKey) {
        self.stats.lights_destroyed += 1;
        self.remove_subtree(*node);
    }

    fn sensor_by_id(&self, id: u64) -> Option<NodeKey> {
        self.sensors.get(&id).copied().filter(|key| self.nodes.contains_key(*key))
    }

    fn node_name(&self, node: &NodeKey) -> String {
        self.nodes.get(*node).map(|n| n.name.clone()).unwrap_or_default()
    }

    fn contains_node(&self, node: &NodeKey) -> bool {
        self.contains(*node)
    }

    fn set_local_pose(&mut self, node: &NodeKey, pose: &Pose) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.pose = *pose;
        }
    }

    fn set_local_scale(&mut self, node: &NodeKey, scale: &Vec3) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.scale = *scale;
        }
    }

    fn add_child(&mut self, parent: &NodeKey, child: &NodeKey) {
        self.attach(*parent, *child);
    }

    fn remove_parent(&mut self, node: &NodeKey) {
        self.detach(*node);
    }

    fn configure_light(&mut self, node: &NodeKey, properties: &LightProperties) {
        if let Some(NodeKind::Light(_, slot)) = self.nodes.get_mut(*node).map(|n| &mut n.kind) {
            *slot = Some(*properties);
        }
    }

    fn create_primitive(&mut self, primitive: Primitive) -> MemoryGeometry {
        MemoryGeometry {
            shape: GeometryShape::Primitive(primitive),
            material: None,
        }
    }

    fn create_mesh(&mut self, descriptor: &MeshDescriptor) -> MemoryGeometry {
        let material = descriptor
            .mesh
            .material
            .as_ref()
            .map(|params| self.material_from_params(None, params));
        MemoryGeometry {
            shape: GeometryShape::Mesh {
                name: descriptor.mesh_name.clone(),
                triangles: descriptor.mesh.triangle_count(),
                submesh: descriptor.submesh_name.clone(),
            },
            material,
        }
    }

    fn geometry_material(&self, geometry: &MemoryGeometry) -> Option<MaterialKey> {
        geometry.material
    }

    fn set_geometry_material(&mut self, geometry: &mut MemoryGeometry, material: &MaterialKey) {
        geometry.material = Some(*material);
    }

    fn add_geometry(&mut self, node: &NodeKey, geometry: MemoryGeometry) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.geometries.push(geometry);
        }
    }

    fn create_material(&mut self, name: Option<&str>, params: &MaterialParams) -> MaterialKey {
        let key = self.material_from_params(name, params);
        if let Some(name) = name {
            self.named_materials.insert(name.to_string(), key);
        }
        key
    }

    fn material(&self, name: &str) -> Option<MaterialKey> {
        self.named_materials.get(name).copied()
    }
}
