use std::time::Duration;

use shared_types::{Point, SurfaceGeometry};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Width of the launcher sidebar panels may never overlap
    pub sidebar_band: i32,
    /// Gap kept between a panel and every surface edge
    pub margin: i32,
    /// Upper bound for a new panel's width
    pub max_panel_width: i32,
    /// Upper bound for a new panel's height
    pub max_panel_height: i32,
    /// First cascade position; `x` is measured from the sidebar edge.
    pub cascade_anchor: Point,
    /// Diagonal offset applied per existing panel when cascading
    pub cascade_step: i32,
    /// Length of the opening animation
    pub open_duration: Duration,
    /// Length of the closing animation; the panel is removed afterwards
    pub close_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebar_band: 100,
            margin: 20,
            max_panel_width: 900,
            max_panel_height: 700,
            cascade_anchor: Point::new(50, 50),
            cascade_step: 30,
            open_duration: Duration::from_millis(300),
            close_duration: Duration::from_millis(300),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `OVERLAY_*` values supplied by `lookup`, falling
    /// back to the defaults for missing keys.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            sidebar_band: env_parse(&lookup, "OVERLAY_SIDEBAR_BAND", defaults.sidebar_band)?,
            margin: env_parse(&lookup, "OVERLAY_MARGIN", defaults.margin)?,
            max_panel_width: env_parse(
                &lookup,
                "OVERLAY_MAX_PANEL_WIDTH",
                defaults.max_panel_width,
            )?,
            max_panel_height: env_parse(
                &lookup,
                "OVERLAY_MAX_PANEL_HEIGHT",
                defaults.max_panel_height,
            )?,
            cascade_anchor: Point::new(
                env_parse(&lookup, "OVERLAY_CASCADE_ANCHOR_X", defaults.cascade_anchor.x)?,
                env_parse(&lookup, "OVERLAY_CASCADE_ANCHOR_Y", defaults.cascade_anchor.y)?,
            ),
            cascade_step: env_parse(&lookup, "OVERLAY_CASCADE_STEP", defaults.cascade_step)?,
            open_duration: Duration::from_millis(env_parse(
                &lookup,
                "OVERLAY_OPEN_DURATION_MS",
                defaults.open_duration.as_millis() as u64,
            )?),
            close_duration: Duration::from_millis(env_parse(
                &lookup,
                "OVERLAY_CLOSE_DURATION_MS",
                defaults.close_duration.as_millis() as u64,
            )?),
        })
    }

    /// Surface geometry for a viewport of the given size, using the
    /// configured sidebar band.
    pub fn surface(&self, width: i32, height: i32) -> SurfaceGeometry {
        SurfaceGeometry {
            width,
            height,
            sidebar_band: self.sidebar_band,
        }
    }
}

fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        None => Ok(default),
    }
}
