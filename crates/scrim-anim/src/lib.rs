#![forbid(unsafe_code)]

//! Animation patterns, tweens, and the transition driver contract for Scrim.
//!
//! The presentation layer selects a named [`AnimationPattern`] and hands the
//! built hierarchy to an [`AnimationDriver`]; this crate ships two drivers
//! ([`TimedDriver`] for event-loop hosts, [`ImmediateDriver`] for tests and
//! headless use) plus the scalar [`tween`] primitives they are built on.

pub mod driver;
pub mod pattern;
pub mod tween;

pub use driver::{AnimationDriver, Completion, ImmediateDriver, SCRIM_SHOWN_ALPHA, TimedDriver};
pub use pattern::{AnimationPattern, UnknownPattern};
pub use tween::{Easing, Tween, lerp, lerp_rect};
