#![forbid(unsafe_code)]

//! View tree, geometry, and notification primitives for Scrim.
//!
//! This crate holds everything below the presentation layer: integer cell
//! [`geometry`], the retained [`view`] arena that presentation code injects
//! overlays into, and the [`notify`] center that carries on-screen keyboard
//! frame events. It knows nothing about dialogs, patterns, or scrims.

pub mod geometry;
pub mod notify;
pub mod view;

pub use geometry::{Rect, Size};
pub use notify::{
    KeyboardEvent, KeyboardInfo, NotificationCenter, NotificationName, ObserverFn, ObserverId,
};
pub use view::{ResizeMask, Transform, View, ViewId, ViewTag, ViewTree};
