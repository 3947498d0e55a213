#![forbid(unsafe_code)]

//! Per-episode presentation state.
//!
//! A [`PresentationSession`] owns everything one active dialog needs torn
//! down: the controller keeping the dialog content alive, direct handles to
//! the injected views, the scrim record, and the pattern presentation was
//! keyed by. Created by `present`, destroyed by the dismiss completion.

use scrim_core::{Size, ViewId};

use scrim_anim::AnimationPattern;

use crate::background::BackgroundView;

/// Something that exposes a displayable root view for presentation.
pub trait DialogController {
    /// The dialog content's root view in the tree.
    fn view_id(&self) -> ViewId;
}

/// The trivial controller: a bare view.
#[derive(Debug, Clone, Copy)]
pub struct ViewDialog {
    view: ViewId,
}

impl ViewDialog {
    pub fn new(view: ViewId) -> Self {
        Self { view }
    }
}

impl DialogController for ViewDialog {
    fn view_id(&self) -> ViewId {
        self.view
    }
}

/// Where the active episode sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionPhase {
    /// Presented; the show transition may still be in flight.
    Shown,
    /// A hide transition is in flight; its completion will clear the session.
    Dismissing,
}

pub(crate) struct PresentationSession {
    /// Keeps the dialog content alive for the episode.
    #[allow(dead_code)]
    pub(crate) controller: Box<dyn DialogController>,
    pub(crate) dialog_view: ViewId,
    pub(crate) overlay: ViewId,
    pub(crate) dismiss_target: ViewId,
    pub(crate) background: BackgroundView,
    pub(crate) pattern: AnimationPattern,
    /// Size the dialog asked for at present time; the constraint layout
    /// re-clamps against this on every overlay resize.
    pub(crate) preferred_size: Size,
    pub(crate) phase: SessionPhase,
}

/// Snapshot of the active episode's handles.
#[derive(Debug, Clone, Copy)]
pub struct ActiveDialog {
    pub dialog_view: ViewId,
    pub overlay: ViewId,
    pub dismiss_target: ViewId,
    pub scrim: ViewId,
    pub pattern: AnimationPattern,
}

impl PresentationSession {
    pub(crate) fn snapshot(&self) -> ActiveDialog {
        ActiveDialog {
            dialog_view: self.dialog_view,
            overlay: self.overlay,
            dismiss_target: self.dismiss_target,
            scrim: self.background.view_id(),
            pattern: self.pattern,
        }
    }
}
