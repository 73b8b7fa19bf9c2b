//! Turns accepted placements into scene instances

use crate::brush::{Template, TemplateId};
use crate::placement::Placement;
use crate::scene::{NodeId, SceneGraph};

/// Commits placements into a scene graph
#[derive(Debug, Default)]
pub struct InstancePlacer {
    placed: usize,
}

impl InstancePlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances created so far
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Instantiate `template` at the placement, parented under the current
    /// selection. Selecting the painted template (or the brush's source
    /// template) parents under the root instead and clears the selection.
    pub fn place(
        &mut self,
        scene: &mut dyn SceneGraph,
        template: &Template,
        placement: &Placement,
        brush_source: Option<TemplateId>,
    ) -> NodeId {
        let mut parent = scene.selection();
        if let Some(selected) = parent {
            let selected_template = scene.template_object(selected);
            if selected_template.is_some()
                && (selected_template == Some(template.id) || selected_template == brush_source)
            {
                parent = None;
                scene.set_selection(None);
            }
        }

        let id = scene.instantiate(template, &placement.transform, parent);
        self.placed += 1;
        id
    }
}
