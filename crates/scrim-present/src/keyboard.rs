#![forbid(unsafe_code)]

//! Keyboard observer bridge.
//!
//! The overlay must shrink to stay above the on-screen keyboard so dialog
//! content remains reachable, then restore full coverage when the keyboard
//! withdraws. Subscriptions are paired with the presentation session:
//! registered by `present`, removed by `dismiss`, never outliving the
//! episode.

use std::rc::Rc;
use std::time::Duration;

use scrim_anim::{Easing, Tween};
use scrim_core::{KeyboardEvent, KeyboardInfo, NotificationName, Rect, ViewId, ViewTree};

use crate::presenter::{LayoutTween, Presenter};
use crate::tags::OVERLAY_VIEW_TAG;

/// Duration of the animated layout pass after an overlay resize.
pub const LAYOUT_PASS_DURATION: Duration = Duration::from_millis(300);

impl Presenter {
    pub(crate) fn register_observers(&self) {
        let (observer, center) = {
            let state = self.inner.borrow();
            (state.observer, state.center.clone())
        };
        for name in [
            NotificationName::KeyboardWillChangeFrame,
            NotificationName::KeyboardWillHide,
        ] {
            if center.has_observer(observer, name) {
                continue;
            }
            let presenter = self.clone();
            center.add_observer(
                observer,
                name,
                Rc::new(move |tree, event| presenter.on_keyboard_event(tree, event)),
            );
        }
    }

    pub(crate) fn unregister_observers(&self) {
        let (observer, center) = {
            let state = self.inner.borrow();
            (state.observer, state.center.clone())
        };
        center.remove_observer(observer, NotificationName::KeyboardWillChangeFrame);
        center.remove_observer(observer, NotificationName::KeyboardWillHide);
    }

    fn on_keyboard_event(&self, tree: &mut ViewTree, event: &KeyboardEvent) {
        match event {
            KeyboardEvent::WillChangeFrame(info) => self.keyboard_will_change_frame(tree, info),
            KeyboardEvent::WillHide => self.keyboard_will_hide(tree),
        }
    }

    fn keyboard_will_change_frame(&self, tree: &mut ViewTree, info: &KeyboardInfo) {
        let Some(keyboard) = info.end_frame else {
            tracing::debug!("keyboard notification without an end frame, ignoring");
            return;
        };
        let Some((host_frame, overlay)) = self.tagged_overlay(tree) else {
            return;
        };
        let shrunk = Rect::new(
            0,
            0,
            host_frame.width,
            host_frame.height.saturating_sub(keyboard.height),
        );
        tracing::debug!(keyboard_height = keyboard.height, "overlay avoiding keyboard");
        self.resize_overlay(tree, overlay, shrunk);
    }

    fn keyboard_will_hide(&self, tree: &mut ViewTree) {
        let Some((host_frame, overlay)) = self.tagged_overlay(tree) else {
            return;
        };
        tracing::debug!("overlay restored to full host bounds");
        self.resize_overlay(
            tree,
            overlay,
            Rect::new(0, 0, host_frame.width, host_frame.height),
        );
    }

    fn tagged_overlay(&self, tree: &ViewTree) -> Option<(Rect, ViewId)> {
        let host = self.host_view(tree)?;
        let overlay = tree.view_with_tag(host, OVERLAY_VIEW_TAG)?;
        Some((tree.frame(host)?, overlay))
    }

    /// Resize the overlay immediately (flexible scrim and hit-target follow)
    /// and tween the dialog back to center over the layout pass duration.
    fn resize_overlay(&self, tree: &mut ViewTree, overlay: ViewId, frame: Rect) {
        tree.set_frame(overlay, frame);

        let (dialog_view, preferred) = {
            let state = self.inner.borrow();
            match state.session.as_ref() {
                Some(session) => (session.dialog_view, session.preferred_size),
                None => return,
            }
        };
        let Some(bounds) = tree.bounds(overlay) else {
            return;
        };
        let Some(from) = tree.frame(dialog_view) else {
            return;
        };
        let to = crate::layout::dialog_frame(bounds, preferred);
        self.inner.borrow_mut().layout_tween = Some(LayoutTween {
            view: dialog_view,
            from,
            to,
            tween: Tween::new(0.0, 1.0, LAYOUT_PASS_DURATION, Easing::EaseInOut),
        });
    }
}
