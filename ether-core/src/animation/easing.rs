//! Easing curves for property tweens

use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Easing function type for animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EasingKind {
    Linear = 0,
    InQuad = 1,
    OutQuad = 2,
    InOutQuad = 3,
    #[default]
    InOutSine = 4,
}

impl EasingKind {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Linear,
            1 => Self::InQuad,
            2 => Self::OutQuad,
            3 => Self::InOutQuad,
            4 => Self::InOutSine,
            _ => Self::InOutSine,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InOutSine,
    ];

    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

impl std::fmt::Display for EasingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::InQuad => write!(f, "In Quad"),
            Self::OutQuad => write!(f, "Out Quad"),
            Self::InOutQuad => write!(f, "In/Out Quad"),
            Self::InOutSine => write!(f, "In/Out Sine"),
        }
    }
}
