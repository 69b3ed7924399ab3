//! Entity registry
//!
//! Three independent id → node tables. An id may appear in at most one slot
//! per table; lookups across tables probe visuals, then lights, then sensors.

use std::collections::HashMap;
use std::fmt;

use super::{EntityId, SceneError};

/// Which table an entity lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Models, links and visuals
    Visual,
    /// Lights
    Light,
    /// Sensors
    Sensor,
}

impl EntityKind {
    /// Lookup priority across tables
    pub const LOOKUP_ORDER: [Self; 3] = [Self::Visual, Self::Light, Self::Sensor];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Visual => "visual",
            Self::Light => "light",
            Self::Sensor => "sensor",
        })
    }
}

/// A registered node tagged with its table
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode<N> {
    /// Model, link or visual node
    Visual(N),
    /// Light node
    Light(N),
    /// Sensor node
    Sensor(N),
}

impl<N> SceneNode<N> {
    fn new(kind: EntityKind, node: N) -> Self {
        match kind {
            EntityKind::Visual => Self::Visual(node),
            EntityKind::Light => Self::Light(node),
            EntityKind::Sensor => Self::Sensor(node),
        }
    }

    /// Table the node came from
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Visual(_) => EntityKind::Visual,
            Self::Light(_) => EntityKind::Light,
            Self::Sensor(_) => EntityKind::Sensor,
        }
    }

    /// Renderer handle
    pub fn handle(&self) -> &N {
        match self {
            Self::Visual(node) | Self::Light(node) | Self::Sensor(node) => node,
        }
    }

    /// Renderer handle, by value
    pub fn into_handle(self) -> N {
        match self {
            Self::Visual(node) | Self::Light(node) | Self::Sensor(node) => node,
        }
    }

    /// Handle if this is a visual
    pub fn as_visual(&self) -> Option<&N> {
        match self {
            Self::Visual(node) => Some(node),
            _ => None,
        }
    }
}

/// Id → node tables for visuals, lights and sensors
#[derive(Debug, Clone)]
pub struct EntityTable<N> {
    visuals: HashMap<EntityId, N>,
    lights: HashMap<EntityId, N>,
    sensors: HashMap<EntityId, N>,
}

impl<N> EntityTable<N> {
    /// Empty tables
    pub fn new() -> Self {
        Self {
            visuals: HashMap::new(),
            lights: HashMap::new(),
            sensors: HashMap::new(),
        }
    }

    fn table(&self, kind: EntityKind) -> &HashMap<EntityId, N> {
        match kind {
            EntityKind::Visual => &self.visuals,
            EntityKind::Light => &self.lights,
            EntityKind::Sensor => &self.sensors,
        }
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut HashMap<EntityId, N> {
        match kind {
            EntityKind::Visual => &mut self.visuals,
            EntityKind::Light => &mut self.lights,
            EntityKind::Sensor => &mut self.sensors,
        }
    }

    /// Register `node` under `id`. An existing registration is kept and
    /// reported as [`SceneError::DuplicateId`].
    pub fn insert(&mut self, kind: EntityKind, id: EntityId, node: N) -> Result<(), SceneError> {
        match self.table_mut(kind).entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => Err(SceneError::DuplicateId { id, kind }),
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(node);
                Ok(())
            }
        }
    }

    /// Node registered under `id` in one table
    pub fn get(&self, kind: EntityKind, id: EntityId) -> Option<&N> {
        self.table(kind).get(&id)
    }

    /// Whether `id` is registered in one table
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        self.table(kind).contains_key(&id)
    }

    /// Unregister `id` from one table, returning its node
    pub fn remove(&mut self, kind: EntityKind, id: EntityId) -> Option<N> {
        self.table_mut(kind).remove(&id)
    }

    /// Whether `id` is registered in any table
    pub fn has_entity(&self, id: EntityId) -> bool {
        EntityKind::LOOKUP_ORDER.iter().any(|kind| self.contains(*kind, id))
    }

    /// First table (in lookup order) holding `id`, with its node
    pub fn find(&self, id: EntityId) -> Option<(EntityKind, &N)> {
        EntityKind::LOOKUP_ORDER
            .iter()
            .find_map(|kind| self.get(*kind, id).map(|node| (*kind, node)))
    }

    /// Number of entries in one table
    pub fn len(&self, kind: EntityKind) -> usize {
        self.table(kind).len()
    }

    /// Number of entries across all tables
    pub fn total_len(&self) -> usize {
        self.visuals.len() + self.lights.len() + self.sensors.len()
    }

    /// Whether every table is empty
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Drop every registration whose node fails `keep`, returning what was
    /// dropped
    pub fn retain(&mut self, mut keep: impl FnMut(&N) -> bool) -> Vec<(EntityKind, EntityId)> {
        let mut dropped = Vec::new();
        for kind in EntityKind::LOOKUP_ORDER {
            self.table_mut(kind).retain(|id, node| {
                let kept = keep(node);
                if !kept {
                    dropped.push((kind, *id));
                }
                kept
            });
        }
        dropped
    }

    /// Drop every registration
    pub fn clear(&mut self) {
        self.visuals.clear();
        self.lights.clear();
        self.sensors.clear();
    }
}

impl<N: Clone> EntityTable<N> {
    /// Registered node for `id`, probing visuals, lights, then sensors
    pub fn node_by_id(&self, id: EntityId) -> Option<SceneNode<N>> {
        self.find(id).map(|(kind, node)| SceneNode::new(kind, node.clone()))
    }
}

impl<N> Default for EntityTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
