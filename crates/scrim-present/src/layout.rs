#![forbid(unsafe_code)]

//! Dialog placement within the overlay.
//!
//! The dialog keeps its preferred size but never exceeds nine tenths of the
//! overlay on either axis, and sits centered on both. Re-resolved whenever
//! the overlay's geometry changes (host resize, keyboard avoidance).

use scrim_core::{Rect, Size};

/// Largest share of an overlay axis the dialog may occupy.
const MAX_NUMERATOR: u16 = 9;
const MAX_DENOMINATOR: u16 = 10;

/// Resolve the dialog's frame inside `overlay` for its `preferred` size.
pub fn dialog_frame(overlay: Rect, preferred: Size) -> Rect {
    let max_width = overlay.width / MAX_DENOMINATOR * MAX_NUMERATOR
        + overlay.width % MAX_DENOMINATOR * MAX_NUMERATOR / MAX_DENOMINATOR;
    let max_height = overlay.height / MAX_DENOMINATOR * MAX_NUMERATOR
        + overlay.height % MAX_DENOMINATOR * MAX_NUMERATOR / MAX_DENOMINATOR;
    let width = preferred.width.min(max_width);
    let height = preferred.height.min(max_height);
    let x = overlay.x + (overlay.width.saturating_sub(width)) / 2;
    let y = overlay.y + (overlay.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_dialog_keeps_preferred_size_and_centers() {
        let overlay = Rect::new(0, 0, 80, 24);
        let frame = dialog_frame(overlay, Size::new(30, 10));
        assert_eq!(frame, Rect::new(25, 7, 30, 10));
    }

    #[test]
    fn oversized_dialog_is_clamped_to_nine_tenths() {
        let overlay = Rect::new(0, 0, 100, 50);
        let frame = dialog_frame(overlay, Size::new(200, 200));
        assert_eq!(frame.width, 90);
        assert_eq!(frame.height, 45);
        assert_eq!(frame.x, 5);
        assert_eq!(frame.y, 2);
    }

    #[test]
    fn empty_overlay_collapses_dialog() {
        let frame = dialog_frame(Rect::new(0, 0, 0, 0), Size::new(30, 10));
        assert!(frame.is_empty());
    }

    proptest! {
        #[test]
        fn frame_is_enclosed_and_within_fraction(
            ow in 0u16..500, oh in 0u16..500,
            pw in 0u16..1000, ph in 0u16..1000,
        ) {
            let overlay = Rect::new(0, 0, ow, oh);
            let frame = dialog_frame(overlay, Size::new(pw, ph));
            prop_assert!(overlay.encloses(frame) || frame.is_empty());
            prop_assert!(u32::from(frame.width) * 10 <= u32::from(ow) * 9 + 9);
            prop_assert!(u32::from(frame.height) * 10 <= u32::from(oh) * 9 + 9);
            // Centered: the margins differ by at most one cell of rounding.
            let left = frame.x - overlay.x;
            let right = overlay.right().saturating_sub(frame.right());
            prop_assert!(left.abs_diff(right) <= 1);
        }
    }
}
