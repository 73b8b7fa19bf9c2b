//! Scene graph node types
//!
//! Node IDs, local transforms, content variants, and nodes.

use glam::{Mat4, Quat, Vec3};

use crate::brush::TemplateId;
use crate::placement::PlacementTransform;

/// Unique identifier for a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Local transform relative to the parent node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Decompose an affine matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        let (scale, rotation, position) = m.to_scale_rotation_translation();
        Self { position, rotation, scale }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl From<&PlacementTransform> for LocalTransform {
    fn from(t: &PlacementTransform) -> Self {
        Self {
            position: t.position,
            rotation: t.rotation,
            scale: t.scale,
        }
    }
}

/// What a scene node contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeContent {
    /// A grouping node with no content of its own.
    Group,
    /// The source object of a template, as it sits in the scene.
    TemplateObject(TemplateId),
    /// A painted copy of a template.
    Instance(TemplateId),
}

impl NodeContent {
    /// Template this node was made from, if any
    pub fn template(&self) -> Option<TemplateId> {
        match *self {
            NodeContent::Group => None,
            NodeContent::TemplateObject(id) | NodeContent::Instance(id) => Some(id),
        }
    }
}

/// A single node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local_transform: LocalTransform,
    pub content: NodeContent,
}

impl SceneNode {
    pub fn new(id: NodeId, name: impl Into<String>, content: NodeContent) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform: LocalTransform::identity(),
            content,
        }
    }
}
