//! Tunable parameters for the ripple grid and the magnetic cursor.
//!
//! Defaults come from `constants.rs`. Front-ends may override individual
//! values by name (`data-*` attributes on the web, `KEY=VALUE` arguments in
//! the simulator); every override is validated before it is committed.

use crate::constants::*;
use crate::motion::SpringParams;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{name}` must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("`{name}` must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("`{name}` must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Geometry of the responsive grid.
///
/// - `cell_size` and `gap` drive the column/row count
/// - `layout_gap` and `padding` describe how cells are painted inside the bounds
#[derive(Clone, Debug, PartialEq)]
pub struct GridParams {
    pub cell_size: f32,
    pub gap: f32,
    pub layout_gap: f32,
    pub padding: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE_PX,
            gap: GAP_PX,
            layout_gap: LAYOUT_GAP_PX,
            padding: LAYOUT_PADDING_PX,
        }
    }
}

/// Parameters of the ripple lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub struct RippleParams {
    pub grid: GridParams,
    /// Seconds of delay per pixel of distance from the origin cell.
    pub base_delay: f32,
    /// Upper bound (exclusive) of the uniform noise added to each delay, seconds.
    pub noise: f32,
    pub spring_settle_ms: f64,
    pub fade_buffer_ms: f64,
    pub cell_spring: SpringParams,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            base_delay: BASE_DELAY_SEC_PER_PX,
            noise: DELAY_NOISE_SEC,
            spring_settle_ms: SPRING_SETTLE_MS,
            fade_buffer_ms: FADE_BUFFER_MS,
            cell_spring: SpringParams::new(CELL_SPRING_STIFFNESS, CELL_SPRING_DAMPING),
        }
    }
}

/// Parameters of the magnetic cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorParams {
    pub spin_period_sec: f32,
    pub snap_step_deg: f32,
    pub snap_spring: SpringParams,
    pub magnetic_snap: f32,
    pub magnetic_reach_px: f32,
    pub pressed_scale_captured: f32,
    pub pressed_scale_free: f32,
}

impl Default for CursorParams {
    fn default() -> Self {
        Self {
            spin_period_sec: SPIN_PERIOD_SEC,
            snap_step_deg: SNAP_STEP_DEG,
            snap_spring: SpringParams::from_bounce(SNAP_BOUNCE, SNAP_DURATION_SEC),
            magnetic_snap: MAGNETIC_SNAP,
            magnetic_reach_px: MAGNETIC_REACH_PX,
            pressed_scale_captured: PRESSED_SCALE_CAPTURED,
            pressed_scale_free: PRESSED_SCALE_FREE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub ripple: RippleParams,
    pub cursor: CursorParams,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.ripple;
        positive("cell-size", r.grid.cell_size as f64)?;
        non_negative("gap", r.grid.gap as f64)?;
        non_negative("layout-gap", r.grid.layout_gap as f64)?;
        non_negative("padding", r.grid.padding as f64)?;
        non_negative("base-delay", r.base_delay as f64)?;
        non_negative("noise", r.noise as f64)?;
        non_negative("spring-settle-ms", r.spring_settle_ms)?;
        non_negative("fade-buffer-ms", r.fade_buffer_ms)?;
        positive("cell-stiffness", r.cell_spring.stiffness as f64)?;
        non_negative("cell-damping", r.cell_spring.damping as f64)?;
        positive("cell-mass", r.cell_spring.mass as f64)?;

        let c = &self.cursor;
        positive("spin-period", c.spin_period_sec as f64)?;
        positive("snap-step", c.snap_step_deg as f64)?;
        positive("snap-stiffness", c.snap_spring.stiffness as f64)?;
        non_negative("snap-damping", c.snap_spring.damping as f64)?;
        positive("snap-mass", c.snap_spring.mass as f64)?;
        within("magnetic-snap", c.magnetic_snap as f64, 0.0, 1.0)?;
        non_negative("magnetic-reach", c.magnetic_reach_px as f64)?;
        positive("pressed-scale-captured", c.pressed_scale_captured as f64)?;
        positive("pressed-scale-free", c.pressed_scale_free as f64)?;
        Ok(())
    }

    /// Apply a single named override. Keys are case-insensitive and accept
    /// either `-` or `_` as separator. The config is left untouched on error.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let name = normalize_key(key);
        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: name.clone(),
                value: value.to_string(),
            })?;

        let mut next = self.clone();
        let v = parsed as f32;
        match name.as_str() {
            "cell-size" => next.ripple.grid.cell_size = v,
            "gap" => next.ripple.grid.gap = v,
            "layout-gap" => next.ripple.grid.layout_gap = v,
            "padding" => next.ripple.grid.padding = v,
            "base-delay" => next.ripple.base_delay = v,
            "noise" => next.ripple.noise = v,
            "spring-settle-ms" => next.ripple.spring_settle_ms = parsed,
            "fade-buffer-ms" => next.ripple.fade_buffer_ms = parsed,
            "cell-stiffness" => next.ripple.cell_spring.stiffness = v,
            "cell-damping" => next.ripple.cell_spring.damping = v,
            "spin-period" => next.cursor.spin_period_sec = v,
            "snap-step" => next.cursor.snap_step_deg = v,
            "magnetic-snap" => next.cursor.magnetic_snap = v,
            "magnetic-reach" => next.cursor.magnetic_reach_px = v,
            _ => return Err(ConfigError::UnknownKey(name)),
        }
        next.validate()?;
        log::debug!("[config] {} = {}", name, parsed);
        *self = next;
        Ok(())
    }

    /// Apply a batch of overrides, stopping at the first failure.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in pairs {
            self.apply_override(k, v)?;
        }
        Ok(())
    }
}

pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn within(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
