#![forbid(unsafe_code)]

//! Scrim public facade and prelude.
//!
//! Re-exports the workspace surface under one roof: [`core`] for geometry and
//! the view tree, [`anim`] for patterns and drivers, [`present`] for the
//! presentation orchestrator.

pub use scrim_anim as anim;
pub use scrim_core as core;
pub use scrim_present as present;

/// One-stop imports for typical hosts.
pub mod prelude {
    pub use scrim_anim::{
        AnimationDriver, AnimationPattern, Easing, ImmediateDriver, TimedDriver, UnknownPattern,
    };
    pub use scrim_core::{
        KeyboardEvent, KeyboardInfo, NotificationCenter, NotificationName, Rect, ResizeMask, Size,
        Transform, ViewId, ViewTag, ViewTree,
    };
    pub use scrim_present::{
        BackgroundViewType, DialogController, PresentOptions, Presenter, ViewDialog,
    };
}
