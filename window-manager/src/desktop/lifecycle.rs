//! Lifecycle controller
//!
//! ```text
//!   open ──► Opening ──(open timer)──► Stable
//!               │  ▲                     │
//!      minimize │  │ open / restore      │ minimize
//!               ▼  │                     ▼
//!             Minimized ◄────────────────┘
//!
//!   any live state ──close──► Closing ──(close timer)──► removed
//! ```
//!
//! Timed completions are guarded by the panel's current state and epoch, so
//! a completion that lost the race against a later transition does nothing.

use shared_types::LifecycleState;

use super::{Panel, WindowManager};
use crate::geometry::{cascade_origin, constrain_to, default_size};
use crate::timers::{ScheduledTask, TaskKind};

impl<C> WindowManager<C> {
    /// Open a panel, or bring back an existing one.
    ///
    /// - unknown id: create a new panel in `Opening` at the next cascade slot
    /// - `Opening`/`Stable`: refocus only; `title` and `content` are dropped
    /// - `Minimized` or `Closing`: back to `Opening` with the original record
    pub fn open(&mut self, id: impl Into<String>, title: impl Into<String>, content: C) {
        let id = id.into();

        if let Some(index) = self.index_of(&id) {
            match self.panels[index].state {
                LifecycleState::Opening | LifecycleState::Stable => {
                    tracing::debug!(panel_id = %id, "Panel already open, refocusing");
                    self.focused = Some(id);
                }
                LifecycleState::Minimized | LifecycleState::Closing => {
                    self.reopen(index);
                }
            }
            return;
        }

        let surface = self.surface.geometry();
        let size = default_size(surface, &self.config);
        let origin = cascade_origin(self.panels.len(), surface, &self.config);
        let position = constrain_to(origin, size, surface, self.config.margin);

        tracing::debug!(
            panel_id = %id,
            x = position.x,
            y = position.y,
            width = size.width,
            height = size.height,
            "Panel created"
        );

        let epoch = self.bump_epoch();
        self.panels.push(Panel {
            id: id.clone(),
            title: title.into(),
            content,
            state: LifecycleState::Opening,
            position,
            size,
            epoch,
        });
        self.focused = Some(id.clone());
        self.scheduler.schedule(
            self.config.open_duration,
            ScheduledTask::finish_opening(id, epoch),
        );
    }

    /// Taskbar restore. Only acts on minimized panels.
    pub fn restore(&mut self, id: &str) {
        match self.index_of(id) {
            Some(index) if self.panels[index].state == LifecycleState::Minimized => {
                self.reopen(index);
            }
            _ => tracing::trace!(panel_id = %id, "Restore ignored"),
        }
    }

    /// Start the closing animation. Closing an already closing panel does
    /// not schedule a second removal.
    pub fn close(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            tracing::trace!(panel_id = %id, "Close ignored, unknown panel");
            return;
        };
        if self.panels[index].state == LifecycleState::Closing {
            tracing::trace!(panel_id = %id, "Close ignored, already closing");
            return;
        }

        let epoch = self.transition(index, LifecycleState::Closing);
        self.clear_focus_of(id);
        self.clear_drag_of(id);
        self.scheduler.schedule(
            self.config.close_duration,
            ScheduledTask::finish_closing(id, epoch),
        );
    }

    /// Send a visible panel to the taskbar. Focus is cleared, not handed to
    /// another panel.
    pub fn minimize(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            tracing::trace!(panel_id = %id, "Minimize ignored, unknown panel");
            return;
        };
        if !self.panels[index].state.can_focus() {
            tracing::trace!(panel_id = %id, state = ?self.panels[index].state, "Minimize ignored");
            return;
        }

        self.transition(index, LifecycleState::Minimized);
        self.clear_focus_of(id);
        self.clear_drag_of(id);
    }

    /// Click-to-focus. Minimized and closing panels cannot take focus.
    pub fn focus(&mut self, id: &str) {
        if self.panel(id).is_some_and(|p| p.state.can_focus()) {
            self.focused = Some(id.to_string());
        }
    }

    /// Apply a timer completion if the panel is still where the task left
    /// it; otherwise do nothing.
    pub fn complete(&mut self, task: ScheduledTask) {
        let Some(index) = self.index_of(&task.panel_id) else {
            tracing::trace!(panel_id = %task.panel_id, kind = ?task.kind, "Stale completion, panel gone");
            return;
        };
        let panel = &self.panels[index];
        if panel.state != task.expect || panel.epoch != task.epoch {
            tracing::trace!(
                panel_id = %task.panel_id,
                kind = ?task.kind,
                state = ?panel.state,
                "Stale completion ignored"
            );
            return;
        }

        match task.kind {
            TaskKind::FinishOpening => {
                self.transition(index, LifecycleState::Stable);
            }
            TaskKind::FinishClosing => {
                let panel = self.panels.remove(index);
                self.clear_focus_of(&panel.id);
                self.clear_drag_of(&panel.id);
                tracing::debug!(panel_id = %panel.id, "Panel removed");
            }
        }
    }

    fn reopen(&mut self, index: usize) {
        let epoch = self.transition(index, LifecycleState::Opening);
        let id = self.panels[index].id.clone();
        self.focused = Some(id.clone());
        self.scheduler.schedule(
            self.config.open_duration,
            ScheduledTask::finish_opening(id, epoch),
        );
    }
}
