//! Window entity store
//!
//! `WindowManager` owns the ordered panel collection, the focused panel id
//! and the drag session. Every mutation goes through the operations in the
//! submodules:
//!
//! - [`lifecycle`]: open / close / minimize / restore / focus and timer
//!   completions
//! - [`drag`]: grab / move / release
//! - [`projection`]: read-only views for rendering
//!
//! All operations are total. Unknown ids and stale timer completions are
//! ignored rather than reported.

mod drag;
mod lifecycle;
mod projection;

pub use projection::{DesktopSnapshot, PanelView};

use shared_types::{LifecycleState, Point, Size};

use crate::config::Config;
use crate::geometry::SurfaceProvider;
use crate::timers::Scheduler;

/// One floating panel
#[derive(Debug, Clone)]
pub struct Panel<C> {
    id: String,
    title: String,
    content: C,
    state: LifecycleState,
    position: Point,
    size: Size,
    epoch: u64,
}

impl<C> Panel<C> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Stamp of the panel's latest transition. Unique across the whole
    /// manager, so it is never reused by a later panel with the same id.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// In-progress pointer drag of one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub panel_id: String,
    /// Pointer position minus panel origin at grab time
    pub grab_offset: Point,
}

pub struct WindowManager<C> {
    config: Config,
    surface: Box<dyn SurfaceProvider>,
    scheduler: Box<dyn Scheduler>,
    /// Creation order; drives cascading placement only
    panels: Vec<Panel<C>>,
    focused: Option<String>,
    drag: Option<DragSession>,
    /// Source of panel epochs; only ever increases
    next_epoch: u64,
}

impl<C> WindowManager<C> {
    pub fn new(
        config: Config,
        surface: impl SurfaceProvider + 'static,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            config,
            surface: Box::new(surface),
            scheduler: Box::new(scheduler),
            panels: Vec::new(),
            focused: None,
            drag: None,
            next_epoch: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn panel(&self, id: &str) -> Option<&Panel<C>> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn lifecycle(&self, id: &str) -> Option<LifecycleState> {
        self.panel(id).map(|p| p.state)
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel<C>> {
        self.panels.iter()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    fn bump_epoch(&mut self) -> u64 {
        self.next_epoch += 1;
        self.next_epoch
    }

    /// Move a panel to `state` and return its new epoch.
    fn transition(&mut self, index: usize, state: LifecycleState) -> u64 {
        let epoch = self.bump_epoch();
        let panel = &mut self.panels[index];
        tracing::debug!(
            panel_id = %panel.id,
            from = ?panel.state,
            to = ?state,
            "Panel transition"
        );
        panel.state = state;
        panel.epoch = epoch;
        epoch
    }

    fn clear_focus_of(&mut self, id: &str) {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
    }

    fn clear_drag_of(&mut self, id: &str) {
        if self.drag.as_ref().is_some_and(|d| d.panel_id == id) {
            tracing::trace!(panel_id = %id, "Drag session dropped");
            self.drag = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared_types::SurfaceGeometry;

    use super::WindowManager;
    use crate::config::Config;
    use crate::geometry::FixedSurface;
    use crate::timers::ManualScheduler;

    pub const SURFACE: SurfaceGeometry = SurfaceGeometry {
        width: 1920,
        height: 1080,
        sidebar_band: 100,
    };

    pub fn manager() -> (WindowManager<&'static str>, ManualScheduler) {
        manager_with(Config::default())
    }

    pub fn manager_with(config: Config) -> (WindowManager<&'static str>, ManualScheduler) {
        let timers = ManualScheduler::new();
        let wm = WindowManager::new(config, FixedSurface(SURFACE), timers.clone());
        (wm, timers)
    }

    /// Advance the virtual clock and feed every due task back in.
    pub fn run_for(
        wm: &mut WindowManager<&'static str>,
        timers: &ManualScheduler,
        ms: u64,
    ) {
        for task in timers.advance(std::time::Duration::from_millis(ms)) {
            wm.complete(task);
        }
    }
}
