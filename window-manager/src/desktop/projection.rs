//! Presentation projection: what the host should draw, derived from the
//! store on demand.

use serde::Serialize;
use shared_types::{LifecycleState, Point, Size, TaskbarEntry};

use super::WindowManager;

/// Render snapshot of one non-minimized panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView<C> {
    pub id: String,
    pub title: String,
    pub content: C,
    pub position: Point,
    pub size: Size,
    pub focused: bool,
    pub dragging: bool,
    /// `Opening`/`Closing` drive the host's animation classes
    pub lifecycle: LifecycleState,
}

/// Everything the host needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopSnapshot<C> {
    pub panels: Vec<PanelView<C>>,
    pub taskbar: Vec<TaskbarEntry>,
    pub focused: Option<String>,
}

impl<C: Clone> WindowManager<C> {
    /// Panels that are not minimized, in store order
    pub fn visible_panels(&self) -> Vec<PanelView<C>> {
        self.panels
            .iter()
            .filter(|p| p.state != LifecycleState::Minimized)
            .map(|p| PanelView {
                id: p.id.clone(),
                title: p.title.clone(),
                content: p.content.clone(),
                position: p.position,
                size: p.size,
                focused: self.focused.as_deref() == Some(p.id.as_str()),
                dragging: self.is_dragging(&p.id),
                lifecycle: p.state,
            })
            .collect()
    }

    pub fn snapshot(&self) -> DesktopSnapshot<C> {
        DesktopSnapshot {
            panels: self.visible_panels(),
            taskbar: self.taskbar(),
            focused: self.focused.clone(),
        }
    }
}

impl<C> WindowManager<C> {
    /// Minimized panels, in store order
    pub fn taskbar(&self) -> Vec<TaskbarEntry> {
        self.panels
            .iter()
            .filter(|p| p.state == LifecycleState::Minimized)
            .map(|p| TaskbarEntry {
                id: p.id.clone(),
                title: p.title.clone(),
            })
            .collect()
    }
}
