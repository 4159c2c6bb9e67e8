//! Shared types between the window manager core and the browser host
//!
//! These types are used by both:
//! - the `window-manager` crate (native Rust, actor host)
//! - the rendering surface (TypeScript, via generated bindings)
//!
//! Serializable with serde for JSON over whatever bridge the host uses.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Geometry
// ============================================================================

/// A point in surface coordinates (pixels, origin top-left)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, TS)]
#[ts(export)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    /// Saturates at the `i32` bounds instead of overflowing.
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Panel dimensions, fixed for a panel's lifetime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, TS)]
#[ts(export)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Current dimensions of the rendering surface and the launcher sidebar
/// band reserved along its left edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export)]
pub struct SurfaceGeometry {
    pub width: i32,
    pub height: i32,
    pub sidebar_band: i32,
}

// ============================================================================
// Panel State
// ============================================================================

/// Lifecycle of a floating panel.
///
/// `Opening` and `Closing` only last for the open/close animation; removal
/// happens once `Closing` completes, so there is no `Removed` variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LifecycleState {
    Opening,
    Stable,
    Minimized,
    Closing,
}

impl LifecycleState {
    /// Whether a panel in this state is allowed to hold focus
    pub fn can_focus(self) -> bool {
        matches!(self, LifecycleState::Opening | LifecycleState::Stable)
    }
}

/// Taskbar button for a minimized panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export)]
pub struct TaskbarEntry {
    pub id: String,
    pub title: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_state_serialization() {
        let json = serde_json::to_string(&LifecycleState::Minimized).unwrap();
        assert_eq!(json, "\"minimized\"");
    }

    #[test]
    fn test_only_live_states_can_focus() {
        assert!(LifecycleState::Opening.can_focus());
        assert!(LifecycleState::Stable.can_focus());
        assert!(!LifecycleState::Minimized.can_focus());
        assert!(!LifecycleState::Closing.can_focus());
    }

    #[test]
    fn test_point_subtraction() {
        let grab = Point::new(300, 140) - Point::new(250, 100);
        assert_eq!(grab, Point::new(50, 40));
    }

    #[test]
    fn test_point_subtraction_saturates() {
        assert_eq!(
            Point::new(i32::MIN, i32::MAX) - Point::new(10, -10),
            Point::new(i32::MIN, i32::MAX)
        );
    }

    #[test]
    fn test_taskbar_entry_shape() {
        let entry = TaskbarEntry {
            id: "cfg".to_string(),
            title: "SYSTEM CONFIGURATION".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "cfg");
        assert_eq!(json["title"], "SYSTEM CONFIGURATION");
    }
}
