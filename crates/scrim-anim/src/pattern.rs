#![forbid(unsafe_code)]

//! The closed set of show/hide transition patterns.
//!
//! Each pattern has a stable integer code. The code doubles as the dismiss
//! hit-target's view tag, so a dismiss tap can recover the pattern that drove
//! presentation; decoding is fallible because the tag namespace is shared
//! with other markers.

use thiserror::Error;

/// A tag carried an integer that names no known pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown animation pattern code {code}")]
pub struct UnknownPattern {
    pub code: i32,
}

/// Show/hide transition selector.
///
/// Slide patterns are named `Slide<Enter><Exit>`: `SlideBottomTop` enters
/// from the bottom edge and exits through the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationPattern {
    #[default]
    FadeInOut,
    ZoomInOut,
    SlideBottomBottom,
    SlideBottomTop,
    SlideRightRight,
    SlideRightLeft,
    SlideLeftLeft,
    SlideLeftRight,
    SlideTopTop,
    SlideTopBottom,
}

impl AnimationPattern {
    /// Every pattern, in code order.
    pub const ALL: [Self; 10] = [
        Self::FadeInOut,
        Self::ZoomInOut,
        Self::SlideBottomBottom,
        Self::SlideBottomTop,
        Self::SlideRightRight,
        Self::SlideRightLeft,
        Self::SlideLeftLeft,
        Self::SlideLeftRight,
        Self::SlideTopTop,
        Self::SlideTopBottom,
    ];

    /// The pattern's stable integer code.
    pub const fn code(self) -> i32 {
        match self {
            Self::FadeInOut => 0,
            Self::ZoomInOut => 1,
            Self::SlideBottomBottom => 2,
            Self::SlideBottomTop => 3,
            Self::SlideRightRight => 4,
            Self::SlideRightLeft => 5,
            Self::SlideLeftLeft => 6,
            Self::SlideLeftRight => 7,
            Self::SlideTopTop => 8,
            Self::SlideTopBottom => 9,
        }
    }

    /// Decode a stored code back into a pattern.
    pub const fn from_code(code: i32) -> Result<Self, UnknownPattern> {
        match code {
            0 => Ok(Self::FadeInOut),
            1 => Ok(Self::ZoomInOut),
            2 => Ok(Self::SlideBottomBottom),
            3 => Ok(Self::SlideBottomTop),
            4 => Ok(Self::SlideRightRight),
            5 => Ok(Self::SlideRightLeft),
            6 => Ok(Self::SlideLeftLeft),
            7 => Ok(Self::SlideLeftRight),
            8 => Ok(Self::SlideTopTop),
            9 => Ok(Self::SlideTopBottom),
            code => Err(UnknownPattern { code }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for pattern in AnimationPattern::ALL {
            assert_eq!(AnimationPattern::from_code(pattern.code()), Ok(pattern));
        }
    }

    #[test]
    fn codes_are_dense_and_unique() {
        for (i, pattern) in AnimationPattern::ALL.iter().enumerate() {
            assert_eq!(pattern.code(), i as i32);
        }
    }

    #[test]
    fn unknown_codes_are_errors() {
        assert_eq!(
            AnimationPattern::from_code(10),
            Err(UnknownPattern { code: 10 })
        );
        assert_eq!(
            AnimationPattern::from_code(-1),
            Err(UnknownPattern { code: -1 })
        );
        assert_eq!(
            AnimationPattern::from_code(997),
            Err(UnknownPattern { code: 997 })
        );
    }

    #[test]
    fn default_is_fade() {
        assert_eq!(AnimationPattern::default(), AnimationPattern::FadeInOut);
    }
}
