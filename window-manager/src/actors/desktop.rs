//! DesktopActor - hosts one WindowManager on a single mailbox
//!
//! Every input (launcher navigation, pointer events, viewport resizes and
//! lifecycle timer completions) arrives as a message, so mutations are
//! applied strictly in arrival order and never overlap.
//!
//! Timers are spawned tokio sleeps that cast `Elapsed` back into the
//! mailbox; the manager decides on arrival whether the completion still
//! applies.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RactorErr, RpcReplyPort};
use shared_types::{SurfaceGeometry, TaskbarEntry};

use crate::config::Config;
use crate::desktop::{DesktopSnapshot, PanelView, WindowManager};
use crate::geometry::SharedSurface;
use crate::navigation::{Launcher, Page};
use crate::timers::{ScheduledTask, Scheduler};

/// Builds the host payload for a launcher page
pub type ContentFactory<C> = Box<dyn Fn(Page) -> C + Send + Sync>;

/// Actor that owns the floating panels of one desktop
pub struct DesktopActor<C> {
    _content: PhantomData<fn() -> C>,
}

impl<C> Default for DesktopActor<C> {
    fn default() -> Self {
        Self {
            _content: PhantomData,
        }
    }
}

/// Arguments for spawning DesktopActor
pub struct DesktopArguments<C> {
    pub desktop_id: String,
    pub config: Config,
    pub surface: SurfaceGeometry,
    /// Needed for `Navigate`; without it navigation messages are dropped.
    pub content_for: Option<ContentFactory<C>>,
}

/// State for DesktopActor
pub struct DesktopState<C> {
    desktop_id: String,
    surface: SharedSurface,
    manager: WindowManager<C>,
    launcher: Option<Launcher<ContentFactory<C>>>,
}

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by DesktopActor
pub enum DesktopMsg<C> {
    /// Open or refocus a panel
    Open {
        id: String,
        title: String,
        content: C,
    },
    /// Start closing a panel
    Close { id: String },
    /// Send a panel to the taskbar
    Minimize { id: String },
    /// Taskbar restore
    Restore { id: String },
    /// Click-to-focus
    Focus { id: String },
    /// Pointer-down on a panel header
    Grab { id: String, x: i32, y: i32 },
    /// Pointer moved
    Move { x: i32, y: i32 },
    /// Pointer released anywhere
    Release,
    /// Launcher entry activated
    Navigate { page: Page },
    /// Viewport changed size
    ResizeSurface { width: i32, height: i32 },
    /// A lifecycle timer came due
    Elapsed(ScheduledTask),
    GetVisiblePanels {
        reply: RpcReplyPort<Vec<PanelView<C>>>,
    },
    GetTaskbar {
        reply: RpcReplyPort<Vec<TaskbarEntry>>,
    },
    GetSnapshot {
        reply: RpcReplyPort<DesktopSnapshot<C>>,
    },
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error, Clone)]
pub enum DesktopError {
    #[error("Failed to spawn desktop: {0}")]
    Spawn(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

impl<T> From<RactorErr<T>> for DesktopError {
    fn from(e: RactorErr<T>) -> Self {
        DesktopError::Rpc(e.to_string())
    }
}

// ============================================================================
// Timer Service
// ============================================================================

/// Delivers lifecycle completions back through the actor mailbox
struct MailboxScheduler<C> {
    myself: ActorRef<DesktopMsg<C>>,
}

impl<C: Send + 'static> Scheduler for MailboxScheduler<C> {
    fn schedule(&self, after: Duration, task: ScheduledTask) {
        let myself = self.myself.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let panel_id = task.panel_id.clone();
            if myself.cast(DesktopMsg::Elapsed(task)).is_err() {
                tracing::trace!(panel_id = %panel_id, "Desktop stopped before completion");
            }
        });
    }
}

// ============================================================================
// Actor Implementation
// ============================================================================

#[async_trait]
impl<C> Actor for DesktopActor<C>
where
    C: Clone + Send + 'static,
{
    type Msg = DesktopMsg<C>;
    type State = DesktopState<C>;
    type Arguments = DesktopArguments<C>;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            desktop_id = %args.desktop_id,
            width = args.surface.width,
            height = args.surface.height,
            "DesktopActor starting"
        );

        let surface = SharedSurface::new(args.surface);
        let scheduler = MailboxScheduler {
            myself: myself.clone(),
        };

        Ok(DesktopState {
            desktop_id: args.desktop_id,
            manager: WindowManager::new(args.config, surface.clone(), scheduler),
            surface,
            launcher: args.content_for.map(Launcher::new),
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let manager = &mut state.manager;
        match message {
            DesktopMsg::Open { id, title, content } => manager.open(id, title, content),
            DesktopMsg::Close { id } => manager.close(&id),
            DesktopMsg::Minimize { id } => manager.minimize(&id),
            DesktopMsg::Restore { id } => manager.restore(&id),
            DesktopMsg::Focus { id } => manager.focus(&id),
            DesktopMsg::Grab { id, x, y } => manager.grab(&id, x, y),
            DesktopMsg::Move { x, y } => manager.move_pointer(x, y),
            DesktopMsg::Release => manager.release(),
            DesktopMsg::Navigate { page } => match &state.launcher {
                Some(launcher) => launcher.navigate(manager, page),
                None => tracing::warn!(
                    desktop_id = %state.desktop_id,
                    page = %page,
                    "Navigation ignored, no content factory"
                ),
            },
            DesktopMsg::ResizeSurface { width, height } => {
                tracing::debug!(width, height, "Surface resized");
                state.surface.resize(width, height);
            }
            DesktopMsg::Elapsed(task) => manager.complete(task),
            DesktopMsg::GetVisiblePanels { reply } => {
                let _ = reply.send(manager.visible_panels());
            }
            DesktopMsg::GetTaskbar { reply } => {
                let _ = reply.send(manager.taskbar());
            }
            DesktopMsg::GetSnapshot { reply } => {
                let _ = reply.send(manager.snapshot());
            }
        }
        Ok(())
    }

    async fn post_stop(
        &self,
        myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            desktop_id = %state.desktop_id,
            panels = state.manager.len(),
            "DesktopActor stopped"
        );
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Spawn an unnamed desktop actor
pub async fn spawn_desktop<C>(
    args: DesktopArguments<C>,
) -> Result<(ActorRef<DesktopMsg<C>>, tokio::task::JoinHandle<()>), DesktopError>
where
    C: Clone + Send + 'static,
{
    Actor::spawn(None, DesktopActor::default(), args)
        .await
        .map_err(|e| DesktopError::Spawn(e.to_string()))
}

fn send<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    msg: DesktopMsg<C>,
) -> Result<(), DesktopError> {
    desktop.cast(msg).map_err(|e| RactorErr::from(e).into())
}

/// Convenience function to open a panel
pub fn open_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
    title: impl Into<String>,
    content: C,
) -> Result<(), DesktopError> {
    send(
        desktop,
        DesktopMsg::Open {
            id: id.into(),
            title: title.into(),
            content,
        },
    )
}

/// Convenience function to close a panel
pub fn close_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Close { id: id.into() })
}

/// Convenience function to minimize a panel
pub fn minimize_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Minimize { id: id.into() })
}

/// Convenience function to restore a panel from the taskbar
pub fn restore_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Restore { id: id.into() })
}

/// Convenience function to focus a panel
pub fn focus_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Focus { id: id.into() })
}

/// Convenience function to start a drag
pub fn grab_panel<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    id: impl Into<String>,
    x: i32,
    y: i32,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Grab { id: id.into(), x, y })
}

/// Convenience function to forward a pointer move
pub fn move_pointer<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    x: i32,
    y: i32,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Move { x, y })
}

/// Convenience function to end a drag
pub fn release_pointer<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Release)
}

/// Convenience function to activate a launcher entry
pub fn navigate<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    page: Page,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::Navigate { page })
}

/// Convenience function to report a viewport resize
pub fn resize_surface<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
    width: i32,
    height: i32,
) -> Result<(), DesktopError> {
    send(desktop, DesktopMsg::ResizeSurface { width, height })
}

/// Convenience function to get the visible panels
pub async fn get_visible_panels<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
) -> Result<Vec<PanelView<C>>, DesktopError> {
    Ok(ractor::call!(desktop, |reply| DesktopMsg::GetVisiblePanels { reply })?)
}

/// Convenience function to get the taskbar
pub async fn get_taskbar<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
) -> Result<Vec<TaskbarEntry>, DesktopError> {
    Ok(ractor::call!(desktop, |reply| DesktopMsg::GetTaskbar { reply })?)
}

/// Convenience function to get a full render snapshot
pub async fn get_snapshot<C: Send + 'static>(
    desktop: &ActorRef<DesktopMsg<C>>,
) -> Result<DesktopSnapshot<C>, DesktopError> {
    Ok(ractor::call!(desktop, |reply| DesktopMsg::GetSnapshot { reply })?)
}

// ============================================================================
// Tests
// ============================================================================
