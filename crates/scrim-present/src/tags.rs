#![forbid(unsafe_code)]

//! Well-known view tags.
//!
//! Three markers locate the injected hierarchy inside a host's subview tree
//! without holding references across calls. The dismiss hit-target uses the
//! same tag namespace to carry its animation pattern code (0..=9), which
//! never collides with these values.

use scrim_core::ViewTag;

/// Marks the host view that received the overlay.
pub const HOST_VIEW_TAG: ViewTag = ViewTag(997);

/// Marks the presented dialog's root view.
pub const DIALOG_VIEW_TAG: ViewTag = ViewTag(998);

/// Marks the overlay container injected into the host.
pub const OVERLAY_VIEW_TAG: ViewTag = ViewTag(999);
