//! Drag controller
//!
//! Grab on a panel header, move while the pointer is down, release anywhere.
//! At most one drag session exists; a new grab replaces the old one.

use shared_types::Point;

use super::{DragSession, WindowManager};
use crate::geometry::constrain_to;

impl<C> WindowManager<C> {
    /// Pointer-down on a panel header. Also focuses the panel.
    pub fn grab(&mut self, id: &str, pointer_x: i32, pointer_y: i32) {
        let Some(panel) = self.panel(id) else {
            tracing::trace!(panel_id = %id, "Grab ignored, unknown panel");
            return;
        };
        if !panel.state.can_focus() {
            tracing::trace!(panel_id = %id, state = ?panel.state, "Grab ignored");
            return;
        }

        let grab_offset = Point::new(pointer_x, pointer_y) - panel.position;
        self.drag = Some(DragSession {
            panel_id: id.to_string(),
            grab_offset,
        });
        self.focused = Some(id.to_string());
    }

    /// Pointer moved. Repositions the dragged panel, clamped to the surface
    /// as it is right now.
    pub fn move_pointer(&mut self, pointer_x: i32, pointer_y: i32) {
        let Some(session) = &self.drag else {
            return;
        };
        let Some(index) = self.index_of(&session.panel_id) else {
            return;
        };

        let proposed = Point::new(pointer_x, pointer_y) - session.grab_offset;
        let surface = self.surface.geometry();
        let panel = &mut self.panels[index];
        panel.position = constrain_to(proposed, panel.size, surface, self.config.margin);

        tracing::trace!(
            panel_id = %panel.id,
            x = panel.position.x,
            y = panel.position.y,
            "Panel dragged"
        );
    }

    /// Pointer released, wherever it is. Ends any drag session.
    pub fn release(&mut self) {
        if let Some(session) = self.drag.take() {
            tracing::trace!(panel_id = %session.panel_id, "Drag released");
        }
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.drag.as_ref().is_some_and(|d| d.panel_id == id)
    }
}
