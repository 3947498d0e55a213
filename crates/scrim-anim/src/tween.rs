#![forbid(unsafe_code)]

//! Scalar tweens and easing.
//!
//! A [`Tween`] interpolates a float over a caller-supplied duration. Time is
//! advanced explicitly via [`Tween::advance`] from the host event loop; there
//! is no wall clock anywhere in this crate.

use std::time::Duration;

use scrim_core::Rect;

/// Easing curve applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A float interpolation over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween. A zero duration jumps straight to `to`.
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Advance by `dt` and return the current value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.value()
    }

    /// Eased value at the current elapsed time.
    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, self.easing.apply(self.progress()))
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Whether the tween has run its full duration.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Linear interpolation.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Interpolate every edge of a rect, rounding to cells.
pub fn lerp_rect(from: Rect, to: Rect, t: f32) -> Rect {
    let lerp_u16 = |a: u16, b: u16| -> u16 {
        let v = lerp(f32::from(a), f32::from(b), t).round();
        v.clamp(0.0, f32::from(u16::MAX)) as u16
    };
    Rect::new(
        lerp_u16(from.x, to.x),
        lerp_u16(from.y, to.y),
        lerp_u16(from.width, to.width),
        lerp_u16(from.height, to.height),
    )
}
