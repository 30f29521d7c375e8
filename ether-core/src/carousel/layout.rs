//! Layout strategies
//!
//! Both strategies are pure functions from a [`LayoutInput`] to one target
//! point per rank of the visible window (index = rank). Points are card
//! top-left anchors.

use std::f32::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Which way an [`LayoutKind::Arc`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArcOpening {
    /// Focused card at the bottom, neighbours rising towards the top edge.
    #[default]
    Up,
    /// Focused card at the top, neighbours falling towards the bottom edge.
    Down,
}

/// Cross-axis anchor for [`LayoutKind::Linear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LinearAnchor {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Position strategy of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum LayoutKind {
    /// Elliptical arc spanning the bounds' width.
    Arc {
        #[cfg_attr(feature = "serde", serde(default))]
        opening: ArcOpening,
    },
    /// Cards stacked side by side along the horizontal axis.
    Linear {
        #[cfg_attr(feature = "serde", serde(default))]
        anchor: LinearAnchor,
    },
}

impl Default for LayoutKind {
    fn default() -> Self {
        Self::Arc {
            opening: ArcOpening::default(),
        }
    }
}

/// Geometry a strategy needs to place the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub bounds: Rect,
    /// Effective card size (height already clamped to the bounds).
    pub card_size: Size,
    /// Effective per-step scale falloff.
    pub scale_factor: f32,
    pub max_visible: usize,
    /// Number of ranks to place, `min(max_visible, N)`.
    pub window_len: usize,
    pub gap: f32,
}

impl LayoutKind {
    pub fn slot_positions(&self, input: &LayoutInput) -> Vec<Point> {
        match *self {
            Self::Arc { opening } => arc_positions(input, opening),
            Self::Linear { anchor } => linear_positions(input, anchor),
        }
    }

    /// Parking point for items outside the visible window.
    pub fn hide_point(&self, input: &LayoutInput) -> Point {
        match *self {
            Self::Arc { opening } => {
                let frame = ArcFrame::new(input, opening);
                Point::new(frame.offset, frame.bias)
            }
            Self::Linear { anchor } => linear_origin(input, anchor),
        }
    }
}

/// Spacing between neighbouring slots so the window fits the bounds' width.
///
/// The reserved width is the geometric series of shrinking card widths
/// (or plain `max_visible * width` when cards do not shrink); the leftover
/// space is split across the gaps and capped at `max_gap`.
pub fn compute_gap(
    bounds_width: f32,
    card_width: f32,
    scale_factor: f32,
    max_visible: usize,
    max_gap: f32,
) -> f32 {
    if max_visible == 0 {
        return 0.0;
    }
    let half = (max_visible / 2) as i32;
    let reserved = if scale_factor < 1.0 {
        let series =
            (1.0 - scale_factor.powi(half + 1)) / (1.0 - scale_factor);
        card_width * series * 2.0 - card_width
    } else {
        max_visible as f32 * card_width
    };

    let slots = if max_visible % 2 == 0 {
        max_visible + 1
    } else {
        max_visible
    };
    if slots <= 1 {
        return 0.0;
    }

    let gap = (bounds_width - reserved) / (slots - 1) as f32;
    if !gap.is_finite() {
        return 0.0;
    }
    gap.clamp(0.0, max_gap.max(0.0))
}

/// Ellipse parameters shared by positions and hide point.
struct ArcFrame {
    width_radius: f32,
    height: f32,
    offset: f32,
    bias: f32,
    start_phase: f32,
}

impl ArcFrame {
    fn new(input: &LayoutInput, opening: ArcOpening) -> Self {
        let bounds = input.bounds;
        let width_radius =
            ((bounds.width - input.card_size.width) / 2.0).max(0.0);
        let height = (bounds.height - input.card_size.height).max(0.0);
        let (start_phase, bias) = match opening {
            ArcOpening::Up => (FRAC_PI_2, bounds.top()),
            ArcOpening::Down => (-FRAC_PI_2, bounds.top() + height),
        };
        Self {
            width_radius,
            height,
            offset: bounds.left() + width_radius,
            bias,
            start_phase,
        }
    }
}

/// Points along the arc: rank 0 at the start phase, the outermost ranks at
/// phase 0 (the bounds' side edges).
pub fn arc_positions(input: &LayoutInput, opening: ArcOpening) -> Vec<Point> {
    let frame = ArcFrame::new(input, opening);
    let half = input.max_visible / 2;
    let step = if half == 0 {
        0.0
    } else {
        -frame.start_phase / half as f32
    };

    (0..input.window_len)
        .map(|rank| {
            let distance = rank.div_ceil(2);
            let phase = frame.start_phase + distance as f32 * step;
            let reach = phase.cos() * frame.width_radius;
            let x = match rank {
                0 => frame.offset,
                r if r % 2 == 1 => frame.offset + reach,
                _ => frame.offset - reach,
            };
            let y = frame.bias + phase.sin() * frame.height;
            Point::new(x, y)
        })
        .collect()
}

fn linear_origin(input: &LayoutInput, anchor: LinearAnchor) -> Point {
    let bounds = input.bounds;
    let card = input.card_size;
    let y = match anchor {
        LinearAnchor::Top => bounds.top(),
        LinearAnchor::Middle => bounds.top() + (bounds.height - card.height) / 2.0,
        LinearAnchor::Bottom => bounds.bottom() - card.height,
    };
    Point::new(bounds.center().x - card.width / 2.0, y)
}

/// Cards side by side around the horizontal center. Each rank steps from
/// the previous rank on its side by the rank's shrunken width plus the gap.
pub fn linear_positions(
    input: &LayoutInput,
    anchor: LinearAnchor,
) -> Vec<Point> {
    if input.window_len == 0 {
        return Vec::new();
    }
    let origin = linear_origin(input, anchor);
    let width = input.card_size.width;
    let factor = input.scale_factor.max(0.0);

    let mut positions = Vec::with_capacity(input.window_len);
    positions.push(origin);
    let (mut right_x, mut left_x) = (origin.x, origin.x);

    for rank in 1..input.window_len {
        let exponent = rank.div_ceil(2) as i32;
        let shrinkage = width * (1.0 - factor.powi(exponent));
        let advance = width - shrinkage + input.gap;
        let x = if rank % 2 == 1 {
            right_x += advance;
            right_x
        } else {
            left_x -= advance;
            left_x
        };
        positions.push(Point::new(x, origin.y));
    }
    positions
}
