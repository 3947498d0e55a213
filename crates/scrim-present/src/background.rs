#![forbid(unsafe_code)]

//! The scrim behind a presented dialog.
//!
//! The background view is a plain view in the tree; its [`BackgroundViewType`]
//! and target opacity are carried alongside for whatever renders it. The
//! presentation core never interprets the style itself.

use scrim_core::{Rect, ResizeMask, ViewId, ViewTree};

/// Opacity the scrim's style is rendered at once fully shown.
pub const DEFAULT_SCRIM_OPACITY: f32 = 0.6;

/// Visual style of the scrim, opaque to the presentation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackgroundViewType {
    #[default]
    Solid,
    Gradient,
}

/// A freshly constructed scrim for one presentation episode.
///
/// Built bounds-sized, flexible on both axes, and fully transparent; the
/// animation driver fades it in.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundView {
    view: ViewId,
    view_type: BackgroundViewType,
    opacity: f32,
}

impl BackgroundView {
    pub(crate) fn new(tree: &mut ViewTree, bounds: Rect, view_type: BackgroundViewType) -> Self {
        let view = tree.create(bounds);
        tree.set_autoresizing(view, ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT);
        tree.set_alpha(view, 0.0);
        Self {
            view,
            view_type,
            opacity: DEFAULT_SCRIM_OPACITY,
        }
    }

    /// The scrim's view in the tree.
    pub fn view_id(&self) -> ViewId {
        self.view
    }

    /// The style the renderer should draw this scrim with.
    pub fn view_type(&self) -> BackgroundViewType {
        self.view_type
    }

    /// Target opacity of the rendered style.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}
