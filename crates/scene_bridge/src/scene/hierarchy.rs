//! Parent resolution and hierarchical naming
//!
//! Every creation goes through the same policy: the world id means "attach
//! to the scene root", any other parent must already be a registered visual,
//! and a child's name is scoped by its parent's name.

use super::{EntityId, EntityKind, EntityRole, EntityTable, SceneError};
use crate::render::RenderScene;

/// Separator between a parent's name and a child's local name
pub const NAME_SEPARATOR: &str = "::";

/// Descriptor name, or the decimal id when the name is empty
pub fn local_name(name: &str, id: EntityId) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

/// `parent::local`, or just `local` at the root
pub fn scoped_name(parent_name: Option<&str>, local: &str) -> String {
    match parent_name {
        Some(parent) => format!("{parent}{NAME_SEPARATOR}{local}"),
        None => local.to_string(),
    }
}

/// Where a new node goes and what it is called
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<N> {
    /// Parent visual; `None` means the scene root
    pub parent: Option<N>,
    /// Full node name
    pub name: String,
}

/// Resolves parents against the visual table
pub struct HierarchyBuilder<'a, N> {
    entities: &'a EntityTable<N>,
    world_id: EntityId,
}

impl<'a, N: Clone> HierarchyBuilder<'a, N> {
    /// Builder over `entities` treating `world_id` as the scene root
    pub fn new(entities: &'a EntityTable<N>, world_id: EntityId) -> Self {
        Self { entities, world_id }
    }

    /// Parent node for `parent_id`: `None` for the world, the registered
    /// visual otherwise. Lights and sensors never act as parents.
    pub fn resolve_parent(&self, id: EntityId, parent_id: EntityId, role: EntityRole) -> Result<Option<N>, SceneError> {
        if parent_id == self.world_id {
            return Ok(None);
        }
        self.entities
            .get(EntityKind::Visual, parent_id)
            .cloned()
            .map(Some)
            .ok_or(SceneError::UnknownParent {
                id,
                parent: parent_id,
                role,
            })
    }

    /// Parent and full name for a new node
    pub fn place<R>(
        &self,
        scene: &R,
        id: EntityId,
        name: &str,
        parent_id: EntityId,
        role: EntityRole,
    ) -> Result<Placement<N>, SceneError>
    where
        R: RenderScene<Node = N>,
    {
        let parent = self.resolve_parent(id, parent_id, role)?;
        let parent_name = parent.as_ref().map(|p| scene.node_name(p));
        let name = scoped_name(parent_name.as_deref(), &local_name(name, id));
        Ok(Placement { parent, name })
    }
}
