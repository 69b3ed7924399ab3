//! Scene Manager - Bridge between the simulator and the renderer
//!
//! The Scene Manager:
//! 1. Mirrors models, links, visuals and lights as renderer nodes
//! 2. Attaches pre-existing renderer sensors to the mirrored hierarchy
//! 3. Keeps the id → node tables used for later lookup and removal
//!
//! Every creation either commits a table entry or commits nothing. Aborted
//! operations are logged at error level and returned to the caller; degraded
//! results (unsupported geometry, missing textures) are logged as warnings
//! and the entity is still created.

use std::mem;

use crate::assets::{FileResolver, MeshLoader, ObjMeshLoader, SearchPathResolver};
use crate::core::{BridgeConfig, DefaultMaterialConfig};
use crate::description::{Light, LightType, Link, Material, Model, Visual};
use crate::foundation::math::Pose;
use crate::render::{LightKind, LightProperties, RenderScene};

use super::{
    EntityId, EntityKind, EntityRole, EntityTable, GeometryResolver, HierarchyBuilder, MaterialResolver,
    ResolvedGeometry, SceneError, SceneNode,
};

/// Suffix of the intermediate node carrying a geometry's corrective pose
const GEOMETRY_NODE_SUFFIX: &str = "_geom";

fn report(err: SceneError) -> SceneError {
    log::error!("{err}");
    err
}

/// Scene Manager - owns the renderer scene and the entity tables
///
/// Generic over the renderer through [`RenderScene`]; meshes and texture
/// paths go through the pluggable [`MeshLoader`] and [`FileResolver`].
pub struct SceneManager<R: RenderScene> {
    /// Renderer scene receiving the mirrored nodes
    scene: R,

    /// Registered visuals, lights and sensors
    entities: EntityTable<R::Node>,

    /// Parent id meaning "attach to the scene root"
    world_id: EntityId,

    /// Shared fallback material
    default_material: DefaultMaterialConfig,

    mesh_loader: Box<dyn MeshLoader>,
    file_resolver: Box<dyn FileResolver>,
}

impl<R: RenderScene> SceneManager<R> {
    /// Create a scene manager with default configuration
    pub fn new(scene: R) -> Self {
        Self::with_config(scene, &BridgeConfig::default())
    }

    /// Create a scene manager with custom configuration
    ///
    /// Meshes and textures are looked up under `config.resource_paths`.
    pub fn with_config(scene: R, config: &BridgeConfig) -> Self {
        let resolver = || SearchPathResolver::with_paths(config.resource_paths.iter().cloned());
        Self {
            scene,
            entities: EntityTable::new(),
            world_id: config.world_id,
            default_material: config.default_material.clone(),
            mesh_loader: Box::new(ObjMeshLoader::new(resolver())),
            file_resolver: Box::new(resolver()),
        }
    }

    /// Replace the mesh loader
    pub fn with_mesh_loader(mut self, loader: impl MeshLoader + 'static) -> Self {
        self.mesh_loader = Box::new(loader);
        self
    }

    /// Replace the resolver used for material texture paths
    pub fn with_file_resolver(mut self, resolver: impl FileResolver + 'static) -> Self {
        self.file_resolver = Box::new(resolver);
        self
    }

    /// Id standing for the world
    pub fn world_id(&self) -> EntityId {
        self.world_id
    }

    /// Change the id standing for the world
    pub fn set_world_id(&mut self, world_id: EntityId) {
        self.world_id = world_id;
    }

    /// Renderer scene
    pub fn scene(&self) -> &R {
        &self.scene
    }

    /// Renderer scene, mutably
    pub fn scene_mut(&mut self) -> &mut R {
        &mut self.scene
    }

    /// Swap in a new renderer scene, returning the old one.
    ///
    /// Handles from the old scene mean nothing in the new one, so every
    /// registration is dropped.
    pub fn set_scene(&mut self, scene: R) -> R {
        log::debug!("Replacing scene, dropping {} registrations", self.entities.total_len());
        self.entities.clear();
        mem::replace(&mut self.scene, scene)
    }

    /// Entity tables
    pub fn entities(&self) -> &EntityTable<R::Node> {
        &self.entities
    }

    /// Mirror a model under `parent_id`
    pub fn create_model(&mut self, id: EntityId, model: &Model, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.create_frame(id, &model.name, &model.pose, parent_id, EntityRole::Model)
            .map_err(report)
    }

    /// Mirror a link under `parent_id`
    pub fn create_link(&mut self, id: EntityId, link: &Link, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.create_frame(id, &link.name, &link.pose, parent_id, EntityRole::Link)
            .map_err(report)
    }

    /// Mirror a visual under `parent_id`, with its geometry and material.
    ///
    /// Geometry the bridge cannot render leaves the visual without geometry
    /// rather than failing the creation.
    pub fn create_visual(&mut self, id: EntityId, visual: &Visual, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.try_create_visual(id, visual, parent_id).map_err(report)
    }

    /// Mirror a light under `parent_id`
    pub fn create_light(&mut self, id: EntityId, light: &Light, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.try_create_light(id, light, parent_id).map_err(report)
    }

    /// Register the renderer sensor `sensor_id` as entity `id`, moving it
    /// under `parent_id` unless that is the world.
    pub fn attach_sensor(&mut self, id: EntityId, sensor_id: u64, parent_id: EntityId) -> Result<(), SceneError> {
        self.try_attach_sensor(id, sensor_id, parent_id).map_err(report)
    }

    /// Remove `id` from the first table holding it (visuals, lights, then
    /// sensors). Visuals and lights are destroyed in the renderer; sensors
    /// are only forgotten since the bridge did not create them.
    ///
    /// Registered descendants destroyed along with a visual are
    /// unregistered too.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<EntityKind> {
        let (kind, node) = self.entities.find(id).map(|(kind, node)| (kind, node.clone()))?;
        match kind {
            EntityKind::Visual => self.scene.destroy_visual(&node),
            EntityKind::Light => self.scene.destroy_light(&node),
            EntityKind::Sensor => {}
        }
        self.entities.remove(kind, id);
        log::debug!("Removed {kind} [{id}]");

        let scene = &self.scene;
        for (dropped_kind, dropped_id) in self.entities.retain(|node| scene.contains_node(node)) {
            log::debug!("Removed {dropped_kind} [{dropped_id}] along with [{id}]");
        }
        Some(kind)
    }

    /// Whether `id` is registered in any table
    pub fn has_entity(&self, id: EntityId) -> bool {
        self.entities.has_entity(id)
    }

    /// Registered node for `id`, probing visuals, lights, then sensors
    pub fn node_by_id(&self, id: EntityId) -> Option<SceneNode<R::Node>> {
        self.entities.node_by_id(id)
    }

    /// Node of a registered model, link or visual
    pub fn visual(&self, id: EntityId) -> Option<&R::Node> {
        self.entities.get(EntityKind::Visual, id)
    }

    /// Node of a registered light
    pub fn light(&self, id: EntityId) -> Option<&R::Node> {
        self.entities.get(EntityKind::Light, id)
    }

    /// Node of a registered sensor
    pub fn sensor(&self, id: EntityId) -> Option<&R::Node> {
        self.entities.get(EntityKind::Sensor, id)
    }

    fn hierarchy(&self) -> HierarchyBuilder<'_, R::Node> {
        HierarchyBuilder::new(&self.entities, self.world_id)
    }

    fn ensure_unregistered(&self, kind: EntityKind, id: EntityId) -> Result<(), SceneError> {
        if self.entities.contains(kind, id) {
            return Err(SceneError::DuplicateId { id, kind });
        }
        Ok(())
    }

    /// Register `node` and hook it under `parent` (or the root)
    fn commit(
        &mut self,
        kind: EntityKind,
        id: EntityId,
        node: &R::Node,
        parent: Option<&R::Node>,
    ) -> Result<(), SceneError> {
        self.entities.insert(kind, id, node.clone())?;
        let parent = parent.cloned().unwrap_or_else(|| self.scene.root_visual());
        self.scene.add_child(&parent, node);
        log::debug!("Created {kind} [{id}] '{}'", self.scene.node_name(node));
        Ok(())
    }

    fn create_frame(
        &mut self,
        id: EntityId,
        name: &str,
        pose: &Pose,
        parent_id: EntityId,
        role: EntityRole,
    ) -> Result<R::Node, SceneError> {
        self.ensure_unregistered(EntityKind::Visual, id)?;
        let placement = self.hierarchy().place(&self.scene, id, name, parent_id, role)?;

        let node = self.scene.create_visual(&placement.name);
        self.scene.set_local_pose(&node, pose);
        self.commit(EntityKind::Visual, id, &node, placement.parent.as_ref())?;
        Ok(node)
    }

    fn try_create_visual(&mut self, id: EntityId, visual: &Visual, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.ensure_unregistered(EntityKind::Visual, id)?;
        let placement = self
            .hierarchy()
            .place(&self.scene, id, &visual.name, parent_id, EntityRole::Visual)?;
        let geometry = visual.geometry.as_ref().ok_or(SceneError::MissingGeometry(id))?;

        let node = self.scene.create_visual(&placement.name);
        self.scene.set_local_pose(&node, &visual.pose);

        let resolved = GeometryResolver::new(self.mesh_loader.as_mut()).resolve(&mut self.scene, geometry);
        match resolved {
            Ok(resolved) => {
                self.attach_geometry(&node, &placement.name, resolved, visual.material.as_ref(), geometry.is_mesh());
            }
            Err(err) => log::warn!("Visual [{id}] '{}' created without geometry: {err}", placement.name),
        }

        self.commit(EntityKind::Visual, id, &node, placement.parent.as_ref())?;
        Ok(node)
    }

    /// Material, corrective node and scale for a resolved geometry
    fn attach_geometry(
        &mut self,
        node: &R::Node,
        name: &str,
        resolved: ResolvedGeometry<R::Geometry>,
        material: Option<&Material>,
        is_mesh: bool,
    ) {
        let ResolvedGeometry {
            mut geometry,
            scale,
            local_pose,
        } = resolved;

        // Meshes without an explicit material keep the one they carry
        if let Some(material) = material {
            let material = MaterialResolver::new(self.file_resolver.as_ref()).create(&mut self.scene, material);
            self.scene.set_geometry_material(&mut geometry, &material);
        } else if !is_mesh {
            let material = self.default_material();
            self.scene.set_geometry_material(&mut geometry, &material);
        } else if self.scene.geometry_material(&geometry).is_none() {
            log::debug!("Mesh visual '{name}' carries no material, renderer default applies");
        }

        let carrier = if local_pose.is_identity() {
            node.clone()
        } else {
            let child = self.scene.create_visual(&format!("{name}{GEOMETRY_NODE_SUFFIX}"));
            self.scene.set_local_pose(&child, &local_pose);
            self.scene.add_child(node, &child);
            child
        };
        self.scene.set_local_scale(&carrier, &scale);
        self.scene.add_geometry(&carrier, geometry);
    }

    /// Shared fallback material, created on first use
    fn default_material(&mut self) -> R::Material {
        let name = &self.default_material.name;
        if let Some(material) = self.scene.material(name) {
            return material;
        }
        log::debug!("Creating default material '{name}'");
        self.scene.create_material(Some(name), &self.default_material.params())
    }

    fn try_create_light(&mut self, id: EntityId, light: &Light, parent_id: EntityId) -> Result<R::Node, SceneError> {
        self.ensure_unregistered(EntityKind::Light, id)?;
        let placement = self
            .hierarchy()
            .place(&self.scene, id, &light.name, parent_id, EntityRole::Light)?;
        let kind = light_kind(light)?;

        let node = self.scene.create_light(&placement.name, &kind);
        self.scene.set_local_pose(&node, &light.pose);
        self.scene.configure_light(&node, &light_properties(light));
        self.commit(EntityKind::Light, id, &node, placement.parent.as_ref())?;
        Ok(node)
    }

    fn try_attach_sensor(&mut self, id: EntityId, sensor_id: u64, parent_id: EntityId) -> Result<(), SceneError> {
        self.ensure_unregistered(EntityKind::Sensor, id)?;
        let node = self
            .scene
            .sensor_by_id(sensor_id)
            .ok_or(SceneError::UnknownSensorHandle(sensor_id))?;
        let parent = self.hierarchy().resolve_parent(id, parent_id, EntityRole::Sensor)?;

        if let Some(parent) = parent {
            self.scene.remove_parent(&node);
            self.scene.add_child(&parent, &node);
        }
        self.entities.insert(EntityKind::Sensor, id, node)?;
        log::debug!("Attached sensor [{id}] (renderer sensor {sensor_id})");
        Ok(())
    }
}

fn light_kind(light: &Light) -> Result<LightKind, SceneError> {
    match light.kind {
        LightType::Point => Ok(LightKind::Point),
        LightType::Spot => Ok(LightKind::Spot {
            inner_angle: light.spot.inner_angle,
            outer_angle: light.spot.outer_angle,
            falloff: light.spot.falloff,
        }),
        LightType::Directional => Ok(LightKind::Directional {
            direction: light.direction,
        }),
        LightType::Invalid => Err(SceneError::UnsupportedLightType(light.kind)),
    }
}

fn light_properties(light: &Light) -> LightProperties {
    LightProperties {
        diffuse: light.diffuse,
        specular: light.specular,
        attenuation_constant: light.attenuation.constant,
        attenuation_linear: light.attenuation.linear,
        attenuation_quadratic: light.attenuation.quadratic,
        attenuation_range: light.attenuation.range,
        cast_shadows: light.cast_shadows,
    }
}
