#![forbid(unsafe_code)]

//! The presentation orchestrator.
//!
//! A [`Presenter`] belongs to one presenting controller, identified by that
//! controller's root view. `present` injects the transient hierarchy into the
//! host view — scrim, dismiss hit-target, and dialog inside a full-bounds
//! overlay — and hands the show transition to the caller's
//! [`AnimationDriver`]; `dismiss` reverses it, with the driver's completion
//! doing the teardown. The presenter is a cheap-clone handle; clones share
//! one session.
//!
//! # Invariants
//!
//! 1. At most one dialog per host view: a `present` while the host subtree
//!    carries a dialog-tagged view is a silent no-op.
//! 2. Overlay, scrim, and hit-target attach and detach as a unit.
//! 3. Keyboard subscriptions exist iff a session is active.
//! 4. Teardown runs exactly once per episode; a second `dismiss` while one
//!    is in flight is a no-op.
//!
//! # Failure Modes
//!
//! Lifecycle calls never panic and never error, with one exception: a
//! dismiss tap whose hit-target tag decodes to no known pattern surfaces
//! [`UnknownPattern`] to the caller.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrim_anim::{
    AnimationDriver, AnimationPattern, Completion, Tween, UnknownPattern, lerp_rect,
};
use scrim_core::{NotificationCenter, ObserverId, Rect, ResizeMask, ViewId, ViewTag, ViewTree};

use crate::background::{BackgroundView, BackgroundViewType};
use crate::layout;
use crate::session::{ActiveDialog, DialogController, PresentationSession, SessionPhase};
use crate::tags::{DIALOG_VIEW_TAG, HOST_VIEW_TAG, OVERLAY_VIEW_TAG};

/// Configuration of one `present` call. All fields are defaulted.
pub struct PresentOptions {
    pub(crate) pattern: AnimationPattern,
    pub(crate) background: BackgroundViewType,
    pub(crate) dismiss_enabled: bool,
    pub(crate) on_shown: Option<Box<dyn FnOnce()>>,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            pattern: AnimationPattern::default(),
            background: BackgroundViewType::default(),
            dismiss_enabled: true,
            on_shown: None,
        }
    }
}

impl PresentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the show/hide transition pattern.
    pub fn pattern(mut self, pattern: AnimationPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Select the scrim style.
    pub fn background(mut self, background: BackgroundViewType) -> Self {
        self.background = background;
        self
    }

    /// Enable or disable tap-outside-to-dismiss.
    pub fn dismiss_enabled(mut self, enabled: bool) -> Self {
        self.dismiss_enabled = enabled;
        self
    }

    /// Callback fired once presentation has been initiated. The show
    /// transition may still be in flight; this is not an animation-complete
    /// hook.
    pub fn on_shown(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_shown = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for PresentOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentOptions")
            .field("pattern", &self.pattern)
            .field("background", &self.background)
            .field("dismiss_enabled", &self.dismiss_enabled)
            .field("on_shown", &self.on_shown.is_some())
            .finish()
    }
}

pub(crate) struct LayoutTween {
    pub(crate) view: ViewId,
    pub(crate) from: Rect,
    pub(crate) to: Rect,
    pub(crate) tween: Tween,
}

pub(crate) struct PresenterState {
    pub(crate) root: ViewId,
    pub(crate) observer: ObserverId,
    pub(crate) center: NotificationCenter,
    pub(crate) session: Option<PresentationSession>,
    pub(crate) layout_tween: Option<LayoutTween>,
}

/// Presents and dismisses one dialog at a time above a host view.
#[derive(Clone)]
pub struct Presenter {
    pub(crate) inner: Rc<RefCell<PresenterState>>,
}

impl Presenter {
    /// Create a presenter for the controller whose root view is `root`.
    pub fn new(root: ViewId, center: &NotificationCenter) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PresenterState {
                root,
                observer: ObserverId::next(),
                center: center.clone(),
                session: None,
                layout_tween: None,
            })),
        }
    }

    /// The view that receives the injected overlay: the root's parent when
    /// the controller is embedded, else the root itself.
    pub fn host_view(&self, tree: &ViewTree) -> Option<ViewId> {
        let root = self.inner.borrow().root;
        if !tree.contains(root) {
            return None;
        }
        Some(tree.parent(root).unwrap_or(root))
    }

    /// Whether a session is active (a hide may still be in flight).
    pub fn is_presenting(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Handles of the active episode, if any.
    pub fn active(&self) -> Option<ActiveDialog> {
        self.inner
            .borrow()
            .session
            .as_ref()
            .map(PresentationSession::snapshot)
    }

    /// The key this presenter subscribes to keyboard notifications under.
    pub fn observer(&self) -> ObserverId {
        self.inner.borrow().observer
    }

    /// Present `dialog` modally above the host view.
    ///
    /// A silent no-op when the host already carries a presented dialog, or
    /// when the controller exposes no live view.
    pub fn present<D: DialogController + 'static>(
        &self,
        tree: &mut ViewTree,
        driver: &mut dyn AnimationDriver,
        dialog: D,
        options: PresentOptions,
    ) {
        let PresentOptions {
            pattern,
            background: background_type,
            dismiss_enabled,
            on_shown,
        } = options;

        let root = self.inner.borrow().root;
        let Some(host) = self.host_view(tree) else {
            tracing::debug!("present: presenting controller has no view");
            return;
        };
        tree.set_tag(host, Some(HOST_VIEW_TAG));

        if tree.view_with_tag(host, DIALOG_VIEW_TAG).is_some() {
            tracing::debug!("present: dialog already attached, ignoring");
            return;
        }

        let dialog_view = dialog.view_id();
        if !tree.contains(dialog_view) {
            tracing::debug!("present: dialog controller exposes no displayable view");
            return;
        }

        // Manual layout, invisible until the driver shows it.
        tree.set_autoresizing(dialog_view, ResizeMask::empty());
        tree.set_alpha(dialog_view, 0.0);
        tree.set_tag(dialog_view, Some(DIALOG_VIEW_TAG));

        self.register_observers();

        let host_bounds = tree.bounds(host).unwrap_or_default();
        let overlay = tree.create(host_bounds);
        tree.set_autoresizing(overlay, ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT);
        tree.set_tag(overlay, Some(OVERLAY_VIEW_TAG));

        let background = BackgroundView::new(tree, host_bounds, background_type);
        tree.add_subview(overlay, background.view_id());

        let dismiss_target = tree.create(host_bounds);
        tree.set_autoresizing(dismiss_target, ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT);
        tree.set_tag(dismiss_target, Some(ViewTag(pattern.code())));
        tree.set_enabled(dismiss_target, dismiss_enabled);
        tree.add_subview(overlay, dismiss_target);

        // Dialog above the hit-target: taps over dialog content land on the
        // dialog, everything else on the target.
        tree.add_subview(overlay, dialog_view);
        tree.add_subview(host, overlay);

        let preferred = tree
            .frame(dialog_view)
            .map(Rect::size)
            .unwrap_or_default();
        let overlay_bounds = tree.bounds(overlay).unwrap_or_default();
        tree.set_frame(dialog_view, layout::dialog_frame(overlay_bounds, preferred));

        self.inner.borrow_mut().session = Some(PresentationSession {
            controller: Box::new(dialog),
            dialog_view,
            overlay,
            dismiss_target,
            background,
            pattern,
            preferred_size: preferred,
            phase: SessionPhase::Shown,
        });

        driver.start_animation(tree, root, dialog_view, host, overlay, pattern);
        tracing::debug!(?pattern, ?background_type, "dialog presented");

        if let Some(on_shown) = on_shown {
            on_shown();
        }
    }

    /// Dismiss the presented dialog with `pattern`.
    ///
    /// A no-op when nothing is presented or a dismissal is already in
    /// flight. Never errors.
    pub fn dismiss(
        &self,
        tree: &mut ViewTree,
        driver: &mut dyn AnimationDriver,
        pattern: AnimationPattern,
    ) {
        let Some(host) = self.host_view(tree) else {
            return;
        };
        let Some(dialog_view) = tree.view_with_tag(host, DIALOG_VIEW_TAG) else {
            tracing::debug!("dismiss: nothing presented");
            return;
        };
        let Some(overlay) = tree.view_with_tag(host, OVERLAY_VIEW_TAG) else {
            tracing::debug!("dismiss: overlay missing");
            return;
        };

        {
            let mut state = self.inner.borrow_mut();
            match state.session.as_mut() {
                Some(session) if session.phase == SessionPhase::Dismissing => {
                    tracing::debug!("dismiss: already dismissing");
                    return;
                }
                Some(session) => session.phase = SessionPhase::Dismissing,
                None => {}
            }
        }

        let handle = self.clone();
        let completion: Completion = Box::new(move |tree: &mut ViewTree| {
            // The dialog content outlives the episode; the overlay unit does
            // not.
            tree.remove_from_parent(dialog_view);
            tree.set_tag(dialog_view, None);
            tree.remove(overlay);
            let mut state = handle.inner.borrow_mut();
            state.session = None;
            state.layout_tween = None;
            tracing::debug!("dialog dismissed");
        });
        driver.end_animation(tree, dialog_view, host, overlay, pattern, completion);

        self.unregister_observers();
    }

    /// Route a tap to the dismiss hit-target.
    ///
    /// Returns `Ok(true)` when the tap dismissed the dialog, `Ok(false)` when
    /// it landed elsewhere or the target is disabled. A tag that decodes to
    /// no known pattern is surfaced as [`UnknownPattern`].
    pub fn handle_tap(
        &self,
        tree: &mut ViewTree,
        driver: &mut dyn AnimationDriver,
        tapped: ViewId,
    ) -> Result<bool, UnknownPattern> {
        let target = self
            .inner
            .borrow()
            .session
            .as_ref()
            .map(|session| session.dismiss_target);
        if target != Some(tapped) || !tree.is_enabled(tapped) {
            return Ok(false);
        }
        let Some(tag) = tree.tag(tapped) else {
            return Ok(false);
        };
        let pattern = AnimationPattern::from_code(tag.0)?;
        self.dismiss(tree, driver, pattern);
        Ok(true)
    }

    /// Advance the keyboard layout pass.
    pub fn tick(&self, tree: &mut ViewTree, dt: Duration) {
        let step = {
            let mut state = self.inner.borrow_mut();
            match state.layout_tween.take() {
                Some(mut layout_tween) => {
                    let t = layout_tween.tween.advance(dt);
                    let frame = lerp_rect(layout_tween.from, layout_tween.to, t);
                    let view = layout_tween.view;
                    if !layout_tween.tween.finished() {
                        state.layout_tween = Some(layout_tween);
                    }
                    Some((view, frame))
                }
                None => None,
            }
        };
        if let Some((view, frame)) = step {
            tree.set_frame(view, frame);
        }
    }
}

impl std::fmt::Debug for Presenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Presenter")
            .field("root", &state.root)
            .field("observer", &state.observer)
            .field("presenting", &state.session.is_some())
            .finish()
    }
}
