//! Actor hosts for the window manager

pub mod desktop;

pub use desktop::{
    DesktopActor, DesktopArguments, DesktopError, DesktopMsg, DesktopState,
};
