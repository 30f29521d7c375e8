//! Shared types for the carousel module

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::CardId;
use crate::constants::shape;
use crate::geometry::{Point, Rect, Size};

/// Shape parameters passed to `Carousel::initialize`. These can come from
/// presets or be provided ad-hoc by callsites.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarouselShape {
    /// Nominal (unscaled) card size.
    pub card_max_size: Size,
    /// Scale lost per step away from focus; `0 < scale_factor`, usually `<= 1`.
    pub scale_factor: f32,
    /// Ranks given real on-screen positions. Odd values keep the window
    /// symmetric; even values bias the extra slot to the right.
    pub max_visible_objects: usize,
    /// Opacity lost per step away from focus. `<= 0` disables the falloff.
    pub opacity_factor: f32,
    /// Cap on the spacing between slots.
    pub max_gap: f32,
}

impl Default for CarouselShape {
    fn default() -> Self {
        Self {
            card_max_size: Size::new(shape::CARD_WIDTH, shape::CARD_HEIGHT),
            scale_factor: shape::SCALE_FACTOR,
            max_visible_objects: shape::MAX_VISIBLE_OBJECTS,
            opacity_factor: shape::OPACITY_FACTOR,
            max_gap: shape::MAX_GAP,
        }
    }
}

impl CarouselShape {
    /// Defaults with a different window width.
    pub fn with_visible(max_visible_objects: usize) -> Self {
        Self {
            max_visible_objects,
            ..Self::default()
        }
    }
}

/// Notifications raised by a carousel, drained with `take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CarouselEvent {
    /// The card at rank 0 changed.
    FocusChanged(CardId),
}

/// Target presentation for one rank of the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotPresentation {
    pub rank: usize,
    pub position: Point,
    pub scale: f32,
    /// `None` when opacity falloff is disabled and opacity is left alone.
    pub opacity: Option<f32>,
    pub z: f32,
}

/// A visible rank together with the card currently assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignedSlot {
    pub card: CardId,
    pub item_index: usize,
    pub slot: usize,
    pub presentation: SlotPresentation,
}

/// Point-in-time view of a carousel's layout state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarouselSnapshot {
    pub bounds: Rect,
    pub focused: Option<CardId>,
    /// `priority[rank] == item index`.
    pub priority: Vec<usize>,
    pub visible_window: Range<usize>,
    pub gap: f32,
    pub hide_point: Point,
    pub current_scale_factor: f32,
    pub current_card_size: Size,
    pub slots: Vec<AssignedSlot>,
}
