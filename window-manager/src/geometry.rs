//! Geometry constraint engine
//!
//! Pure placement math for floating panels. Nothing here holds state; the
//! surface dimensions come from a [`SurfaceProvider`] sampled by the caller
//! at the moment a position is computed.

use std::sync::{Arc, RwLock};

use shared_types::{Point, Size, SurfaceGeometry};

use crate::config::Config;

/// Clamp a proposed panel origin so the panel stays on the surface and out
/// of the sidebar band.
///
/// When the panel is larger than the available space the lower bound wins,
/// so an oversized panel is pinned to the top-left corner of the usable
/// region and may run off the opposite edge.
#[allow(clippy::too_many_arguments)]
pub fn constrain(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    surface_width: i32,
    surface_height: i32,
    sidebar_band: i32,
    margin: i32,
) -> Point {
    let min_x = sidebar_band.saturating_add(margin);
    let max_x = surface_width.saturating_sub(width).saturating_sub(margin);
    let min_y = margin;
    let max_y = surface_height.saturating_sub(height).saturating_sub(margin);

    Point {
        x: x.min(max_x).max(min_x),
        y: y.min(max_y).max(min_y),
    }
}

/// [`constrain`] over the shared value types.
pub fn constrain_to(proposed: Point, size: Size, surface: SurfaceGeometry, margin: i32) -> Point {
    constrain(
        proposed.x,
        proposed.y,
        size.width,
        size.height,
        surface.width,
        surface.height,
        surface.sidebar_band,
        margin,
    )
}

/// Size given to a newly opened panel: a capped share of the surface that
/// never exceeds what fits beside the sidebar.
pub fn default_size(surface: SurfaceGeometry, config: &Config) -> Size {
    let edges = config.margin.saturating_mul(2);
    let usable_width = surface
        .width
        .saturating_sub(surface.sidebar_band.saturating_add(config.margin))
        .saturating_sub(edges);
    let usable_height = surface.height.saturating_sub(edges);
    Size {
        width: config.max_panel_width.min(usable_width).max(0),
        height: config.max_panel_height.min(usable_height).max(0),
    }
}

/// Unclamped origin for the `count`-th panel, stepping diagonally away from
/// the cascade anchor.
pub fn cascade_origin(count: usize, surface: SurfaceGeometry, config: &Config) -> Point {
    let offset = i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(config.cascade_step);
    Point {
        x: surface
            .sidebar_band
            .saturating_add(config.cascade_anchor.x)
            .saturating_add(offset),
        y: config.cascade_anchor.y.saturating_add(offset),
    }
}

/// Source of the current surface dimensions
pub trait SurfaceProvider: Send {
    fn geometry(&self) -> SurfaceGeometry;
}

/// Surface whose dimensions never change
#[derive(Debug, Clone, Copy)]
pub struct FixedSurface(pub SurfaceGeometry);

impl SurfaceProvider for FixedSurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.0
    }
}

/// Cloneable handle the host updates on viewport resize.
///
/// Existing panels are not reclamped when the size changes; only positions
/// computed afterwards see the new dimensions.
#[derive(Debug, Clone)]
pub struct SharedSurface {
    inner: Arc<RwLock<SurfaceGeometry>>,
}

impl SharedSurface {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(geometry)),
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.width = width;
        guard.height = height;
    }
}

impl SurfaceProvider for SharedSurface {
    fn geometry(&self) -> SurfaceGeometry {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}
