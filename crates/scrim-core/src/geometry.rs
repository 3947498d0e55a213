#![forbid(unsafe_code)]

//! Integer cell geometry.
//!
//! Coordinates are `u16` cells with saturating arithmetic; an empty rect has a
//! zero extent on at least one axis. `Rect` and `Size` are plain value types
//! used everywhere a view frame or measurement crosses an API boundary.

/// A size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Whether either extent is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// The rect's size.
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Whether either extent is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the point lies inside the rect.
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn encloses(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.size(), Size::new(10, 4));
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::new(0, 0, 0, 5).is_empty());
        assert!(Rect::new(0, 0, 5, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(1, 1, 3, 3);
        assert!(r.contains(1, 1));
        assert!(r.contains(3, 3));
        assert!(!r.contains(4, 1));
        assert!(!r.contains(1, 4));
    }

    #[test]
    fn encloses_self_and_inner() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.encloses(outer));
        assert!(outer.encloses(Rect::new(2, 2, 4, 4)));
        assert!(!outer.encloses(Rect::new(8, 8, 4, 4)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rect_serde_round_trip() {
        let rect = Rect::new(1, 2, 30, 40);
        let json = serde_json::to_string(&rect).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rect);
    }

    #[test]
    fn saturating_edges_never_wrap() {
        let r = Rect::new(u16::MAX, u16::MAX, 10, 10);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), u16::MAX);
    }

    proptest! {
        #[test]
        fn contains_implies_enclosed_point(x in 0u16..500, y in 0u16..500,
                                           w in 0u16..500, h in 0u16..500,
                                           px in 0u16..1000, py in 0u16..1000) {
            let r = Rect::new(x, y, w, h);
            if r.contains(px, py) {
                prop_assert!(px >= r.x && px < r.right());
                prop_assert!(py >= r.y && py < r.bottom());
                prop_assert!(!r.is_empty());
            }
        }
    }
}
