//! Overlay desktop window manager
//!
//! This crate owns the floating panels of the overlay desktop: their
//! open/minimize/close lifecycle, pointer dragging clamped beside the
//! launcher sidebar, focus, and the taskbar of minimized panels. Panel
//! content is an opaque payload supplied by the host; nothing here renders.
//!
//! Use [`desktop::WindowManager`] directly from a host event loop, or spawn
//! an [`actors::DesktopActor`] to get timers and mailbox ordering for free.

pub mod actors;
pub mod config;
pub mod desktop;
pub mod geometry;
pub mod navigation;
pub mod timers;

pub use config::Config;
pub use desktop::{DesktopSnapshot, DragSession, Panel, PanelView, WindowManager};
