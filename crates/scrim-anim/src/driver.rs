#![forbid(unsafe_code)]

//! Transition driver contract and the two shipped drivers.
//!
//! The presentation layer owns *what* is on screen; a driver owns *how* it
//! gets there. [`AnimationDriver::start_animation`] takes the freshly built
//! overlay hierarchy from hidden to shown, and
//! [`AnimationDriver::end_animation`] reverses it and then hands control back
//! through a completion callback.
//!
//! # Contract
//!
//! 1. `start_animation` transitions the scrim's alpha 0 → 1 and the dialog's
//!    alpha/transform from the pattern's hidden state to shown, and leaves
//!    the dialog view interactive when the transition settles.
//! 2. `end_animation` MUST eventually invoke its completion exactly once,
//!    passing the tree. The completion removes the overlay unit from the host
//!    and clears the presenter's session; skipping it leaks the episode.
//! 3. Drivers never add or remove views themselves; they only animate what
//!    they were handed. Removal happens inside the completion.
//! 4. The scrim is the overlay's first subview. That insertion order is
//!    established by the orchestrator and relied on here.
//!
//! # Failure Modes
//!
//! A transition whose views disappear mid-flight (e.g. the host was torn
//! down externally) degrades to property writes on dead ids, which the tree
//! ignores; a pending hide completion still runs.

use std::time::Duration;

use scrim_core::{Rect, Transform, ViewId, ViewTree};

use crate::pattern::AnimationPattern;
use crate::tween::{Easing, lerp};

/// Callback invoked by a driver when a hide transition completes.
pub type Completion = Box<dyn FnOnce(&mut ViewTree)>;

/// Alpha the scrim settles at once fully shown. The visual weight of the
/// backdrop comes from its style, not from this value.
pub const SCRIM_SHOWN_ALPHA: f32 = 1.0;

/// Performs show/hide transitions on a presented dialog hierarchy.
pub trait AnimationDriver {
    /// Transition the hierarchy from hidden to shown, keyed by `pattern`.
    fn start_animation(
        &mut self,
        tree: &mut ViewTree,
        owner: ViewId,
        dialog: ViewId,
        host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
    );

    /// Reverse transition; invoke `on_complete` once it settles.
    fn end_animation(
        &mut self,
        tree: &mut ViewTree,
        dialog: ViewId,
        host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
        on_complete: Completion,
    );

    /// Advance in-flight transitions by `dt`.
    fn tick(&mut self, tree: &mut ViewTree, dt: Duration);
}

/// The dialog's off-screen/invisible state a pattern enters from.
fn hidden_state(pattern: AnimationPattern, host: Rect) -> (f32, Transform) {
    let w = i32::from(host.width);
    let h = i32::from(host.height);
    match pattern {
        AnimationPattern::FadeInOut => (0.0, Transform::IDENTITY),
        AnimationPattern::ZoomInOut => (0.0, Transform::scaled(0.01)),
        AnimationPattern::SlideBottomBottom | AnimationPattern::SlideBottomTop => {
            (0.0, Transform::translate(0, h))
        }
        AnimationPattern::SlideTopTop | AnimationPattern::SlideTopBottom => {
            (0.0, Transform::translate(0, -h))
        }
        AnimationPattern::SlideLeftLeft | AnimationPattern::SlideLeftRight => {
            (0.0, Transform::translate(-w, 0))
        }
        AnimationPattern::SlideRightRight | AnimationPattern::SlideRightLeft => {
            (0.0, Transform::translate(w, 0))
        }
    }
}

/// The dialog's off-screen/invisible state a pattern exits to.
fn exit_state(pattern: AnimationPattern, host: Rect) -> (f32, Transform) {
    let w = i32::from(host.width);
    let h = i32::from(host.height);
    match pattern {
        AnimationPattern::FadeInOut => (0.0, Transform::IDENTITY),
        AnimationPattern::ZoomInOut => (0.0, Transform::scaled(0.01)),
        AnimationPattern::SlideBottomBottom | AnimationPattern::SlideTopBottom => {
            (0.0, Transform::translate(0, h))
        }
        AnimationPattern::SlideTopTop | AnimationPattern::SlideBottomTop => {
            (0.0, Transform::translate(0, -h))
        }
        AnimationPattern::SlideLeftLeft | AnimationPattern::SlideRightLeft => {
            (0.0, Transform::translate(-w, 0))
        }
        AnimationPattern::SlideRightRight | AnimationPattern::SlideLeftRight => {
            (0.0, Transform::translate(w, 0))
        }
    }
}

/// The scrim is the overlay's first subview.
fn scrim_of(tree: &ViewTree, overlay: ViewId) -> Option<ViewId> {
    tree.children(overlay).first().copied()
}

fn host_rect(tree: &ViewTree, host: ViewId) -> Rect {
    tree.frame(host).unwrap_or_default()
}

fn apply(tree: &mut ViewTree, view: ViewId, alpha: f32, transform: Transform) {
    tree.set_alpha(view, alpha);
    tree.set_transform(view, transform);
}

// ---------------------------------------------------------------------------
// ImmediateDriver
// ---------------------------------------------------------------------------

/// A driver that settles every transition synchronously.
///
/// Useful in tests and headless hosts: `start_animation` jumps straight to
/// the shown state and `end_animation` runs its completion before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDriver;

impl AnimationDriver for ImmediateDriver {
    fn start_animation(
        &mut self,
        tree: &mut ViewTree,
        _owner: ViewId,
        dialog: ViewId,
        _host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
    ) {
        tracing::debug!(?pattern, "immediate show");
        if let Some(scrim) = scrim_of(tree, overlay) {
            tree.set_alpha(scrim, SCRIM_SHOWN_ALPHA);
        }
        apply(tree, dialog, 1.0, Transform::IDENTITY);
        tree.set_enabled(dialog, true);
    }

    fn end_animation(
        &mut self,
        tree: &mut ViewTree,
        dialog: ViewId,
        host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
        on_complete: Completion,
    ) {
        tracing::debug!(?pattern, "immediate hide");
        let (alpha, transform) = exit_state(pattern, host_rect(tree, host));
        if let Some(scrim) = scrim_of(tree, overlay) {
            tree.set_alpha(scrim, 0.0);
        }
        apply(tree, dialog, alpha, transform);
        on_complete(tree);
    }

    fn tick(&mut self, _tree: &mut ViewTree, _dt: Duration) {}
}

// ---------------------------------------------------------------------------
// TimedDriver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Show,
    Hide,
}

struct ActiveTransition {
    direction: Direction,
    dialog: ViewId,
    overlay: ViewId,
    scrim: Option<ViewId>,
    dialog_from: (f32, Transform),
    dialog_to: (f32, Transform),
    scrim_from: f32,
    scrim_to: f32,
    elapsed: Duration,
    duration: Duration,
    completion: Option<Completion>,
}

impl ActiveTransition {
    fn progress(&self, easing: Easing) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        easing.apply((self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0))
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The default event-loop driven driver.
///
/// Transitions are advanced by [`AnimationDriver::tick`]; starting a new
/// transition on an overlay replaces any transition already in flight for it
/// (a superseded hide still runs its completion, so cleanup is never lost).
pub struct TimedDriver {
    show_duration: Duration,
    hide_duration: Duration,
    easing: Easing,
    active: Vec<ActiveTransition>,
}

impl Default for TimedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimedDriver {
    /// Default transition length, in line with the 0.3 time-unit layout pass.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    /// Create a driver with default durations and easing.
    pub fn new() -> Self {
        Self {
            show_duration: Self::DEFAULT_DURATION,
            hide_duration: Self::DEFAULT_DURATION,
            easing: Easing::EaseInOut,
            active: Vec::new(),
        }
    }

    /// Set the show transition duration.
    pub fn show_duration(mut self, duration: Duration) -> Self {
        self.show_duration = duration;
        self
    }

    /// Set the hide transition duration.
    pub fn hide_duration(mut self, duration: Duration) -> Self {
        self.hide_duration = duration;
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Number of transitions currently in flight.
    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    /// Drop any existing transition for `overlay`, running a superseded
    /// hide's completion so teardown still happens.
    fn supersede(&mut self, tree: &mut ViewTree, overlay: ViewId) {
        let mut kept = Vec::with_capacity(self.active.len());
        for mut transition in self.active.drain(..) {
            if transition.overlay == overlay {
                if let Some(completion) = transition.completion.take() {
                    completion(tree);
                }
            } else {
                kept.push(transition);
            }
        }
        self.active = kept;
    }
}

impl AnimationDriver for TimedDriver {
    fn start_animation(
        &mut self,
        tree: &mut ViewTree,
        _owner: ViewId,
        dialog: ViewId,
        host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
    ) {
        tracing::debug!(?pattern, duration = ?self.show_duration, "show transition");
        self.supersede(tree, overlay);
        let (alpha, transform) = hidden_state(pattern, host_rect(tree, host));
        apply(tree, dialog, alpha, transform);
        let scrim = scrim_of(tree, overlay);
        if let Some(scrim) = scrim {
            tree.set_alpha(scrim, 0.0);
        }
        self.active.push(ActiveTransition {
            direction: Direction::Show,
            dialog,
            overlay,
            scrim,
            dialog_from: (alpha, transform),
            dialog_to: (1.0, Transform::IDENTITY),
            scrim_from: 0.0,
            scrim_to: SCRIM_SHOWN_ALPHA,
            elapsed: Duration::ZERO,
            duration: self.show_duration,
            completion: None,
        });
    }

    fn end_animation(
        &mut self,
        tree: &mut ViewTree,
        dialog: ViewId,
        host: ViewId,
        overlay: ViewId,
        pattern: AnimationPattern,
        on_complete: Completion,
    ) {
        tracing::debug!(?pattern, duration = ?self.hide_duration, "hide transition");
        self.supersede(tree, overlay);
        let scrim = scrim_of(tree, overlay);
        let dialog_from = (
            tree.alpha(dialog).unwrap_or(1.0),
            tree.transform(dialog).unwrap_or_default(),
        );
        let scrim_from = scrim
            .and_then(|s| tree.alpha(s))
            .unwrap_or(SCRIM_SHOWN_ALPHA);
        self.active.push(ActiveTransition {
            direction: Direction::Hide,
            dialog,
            overlay,
            scrim,
            dialog_from,
            dialog_to: exit_state(pattern, host_rect(tree, host)),
            scrim_from,
            scrim_to: 0.0,
            elapsed: Duration::ZERO,
            duration: self.hide_duration,
            completion: Some(on_complete),
        });
    }

    fn tick(&mut self, tree: &mut ViewTree, dt: Duration) {
        if self.active.is_empty() {
            return;
        }
        let easing = self.easing;
        let mut remaining = Vec::with_capacity(self.active.len());
        for mut transition in self.active.drain(..) {
            transition.elapsed = transition.elapsed.saturating_add(dt);
            let t = transition.progress(easing);

            let (a0, t0) = transition.dialog_from;
            let (a1, t1) = transition.dialog_to;
            let transform = Transform {
                scale: lerp(t0.scale, t1.scale, t),
                dx: lerp(t0.dx as f32, t1.dx as f32, t).round() as i32,
                dy: lerp(t0.dy as f32, t1.dy as f32, t).round() as i32,
            };
            apply(tree, transition.dialog, lerp(a0, a1, t), transform);
            if let Some(scrim) = transition.scrim {
                tree.set_alpha(scrim, lerp(transition.scrim_from, transition.scrim_to, t));
            }

            if transition.finished() {
                if transition.direction == Direction::Show {
                    tree.set_enabled(transition.dialog, true);
                }
                if let Some(completion) = transition.completion.take() {
                    completion(tree);
                }
            } else {
                remaining.push(transition);
            }
        }
        self.active = remaining;
    }
}
