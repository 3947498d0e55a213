#![forbid(unsafe_code)]

//! Modal dialog presentation above a host view.
//!
//! A [`Presenter`] injects a transient hierarchy into the host view — a
//! full-bounds overlay holding the scrim, a dismiss hit-target, and the
//! dialog content — wires the dialog's constraint layout, keeps the overlay
//! clear of the on-screen keyboard, and delegates show/hide transitions to an
//! [`AnimationDriver`](scrim_anim::AnimationDriver) supplied by the host
//! application.
//!
//! ```ignore
//! let center = NotificationCenter::new();
//! let presenter = Presenter::new(root_view, &center);
//! let mut driver = TimedDriver::new();
//!
//! presenter.present(&mut tree, &mut driver, ViewDialog::new(dialog_view),
//!     PresentOptions::default()
//!         .pattern(AnimationPattern::SlideBottomBottom)
//!         .on_shown(|| tracing::info!("up")));
//!
//! // later, from the event loop:
//! driver.tick(&mut tree, dt);
//! presenter.tick(&mut tree, dt);
//! ```

pub mod background;
pub mod keyboard;
pub mod layout;
pub mod presenter;
pub mod session;
pub mod tags;

pub use background::{BackgroundView, BackgroundViewType, DEFAULT_SCRIM_OPACITY};
pub use keyboard::LAYOUT_PASS_DURATION;
pub use presenter::{PresentOptions, Presenter};
pub use session::{ActiveDialog, DialogController, ViewDialog};
pub use tags::{DIALOG_VIEW_TAG, HOST_VIEW_TAG, OVERLAY_VIEW_TAG};
