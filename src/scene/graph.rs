//! Scene graph: CPU-side hierarchy of template objects and painted instances.
//!
//! `SceneGraph` is the seam the stroke tool talks to; `Scene` is the
//! in-memory implementation used by the tools and tests.

use std::collections::HashMap;

use glam::Mat4;

use crate::brush::{Template, TemplateId};
use crate::placement::PlacementTransform;

use super::node::{LocalTransform, NodeContent, NodeId, SceneNode};

/// Scene operations the stroke tool needs
pub trait SceneGraph {
    /// Create an instance of `template` at a world-space transform.
    /// `None` parents it under the scene root.
    fn instantiate(
        &mut self,
        template: &Template,
        transform: &PlacementTransform,
        parent: Option<NodeId>,
    ) -> NodeId;

    /// Currently selected node
    fn selection(&self) -> Option<NodeId>;

    fn set_selection(&mut self, node: Option<NodeId>);

    /// Template whose source object is `node`, if it is one
    fn template_object(&self, node: NodeId) -> Option<TemplateId>;
}

/// In-memory scene graph with a root Group node.
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    root: NodeId,
    next_id: u64,
    selection: Option<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, SceneNode::new(root, "root", NodeContent::Group));
        Self {
            nodes,
            root,
            next_id: 1,
            selection: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Unknown parents fall back to the root.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        content: NodeContent,
        local_transform: LocalTransform,
    ) -> NodeId {
        let parent = if self.nodes.contains_key(&parent) { parent } else { self.root };
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, content);
        node.parent = Some(parent);
        node.local_transform = local_transform;
        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Put a template's source object into the scene under the root
    pub fn add_template_object(&mut self, template: &Template) -> NodeId {
        let transform = LocalTransform {
            position: template.local_offset,
            rotation: template.rotation,
            scale: template.local_scale,
        };
        self.add_child(self.root, template.name.clone(), NodeContent::TemplateObject(template.id), transform)
    }

    /// Remove a node and its entire subtree. Cannot remove the root.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }

        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(node) = self.nodes.get(&to_remove[i]) {
                to_remove.extend_from_slice(&node.children);
            }
            i += 1;
        }

        if let Some(parent_id) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.children.retain(|c| *c != id);
            }
        }

        for nid in to_remove {
            self.nodes.remove(&nid);
            if self.selection == Some(nid) {
                self.selection = None;
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// World matrix of a node, composed up the parent chain
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut world = Mat4::IDENTITY;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            world = node.local_transform.to_mat4() * world;
            current = node.parent.and_then(|p| self.nodes.get(&p));
        }
        world
    }

    /// Painted instances, in creation order
    pub fn instances(&self) -> Vec<&SceneNode> {
        let mut out: Vec<&SceneNode> = self
            .nodes
            .values()
            .filter(|n| matches!(n.content, NodeContent::Instance(_)))
            .collect();
        out.sort_by_key(|n| n.id.0);
        out
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn instantiate(
        &mut self,
        template: &Template,
        transform: &PlacementTransform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let parent = parent.filter(|p| self.nodes.contains_key(p)).unwrap_or(self.root);
        let world = LocalTransform::from(transform).to_mat4();
        let local = if parent == self.root {
            LocalTransform::from(transform)
        } else {
            LocalTransform::from_mat4(&(self.world_matrix(parent).inverse() * world))
        };
        let id = self.add_child(parent, template.name.clone(), NodeContent::Instance(template.id), local);
        log::debug!("Instantiated '{}' as node {} under {}", template.name, id.0, parent.0);
        id
    }

    fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    fn set_selection(&mut self, node: Option<NodeId>) {
        self.selection = node.filter(|n| self.nodes.contains_key(n));
    }

    fn template_object(&self, node: NodeId) -> Option<TemplateId> {
        match self.nodes.get(&node)?.content {
            NodeContent::TemplateObject(id) => Some(id),
            _ => None,
        }
    }
}
