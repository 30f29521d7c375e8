//! Focus carousel
//!
//! - `priority`: center-out rank/slot ring and the visible window
//! - `layout`: arc and linear slot positions plus the hide point
//! - `presentation`: per-rank scale, opacity and z-order
//! - `state`: the [`Carousel`] itself
//! - `types`: shape, events and snapshots

pub mod layout;
pub mod presentation;
pub mod priority;
pub mod state;
pub mod types;

pub use layout::{ArcOpening, LayoutInput, LayoutKind, LinearAnchor, compute_gap};
pub use presentation::Falloff;
pub use priority::{PriorityRing, center_slot, visible_window};
pub use state::Carousel;
pub use types::{
    AssignedSlot, CarouselEvent, CarouselShape, CarouselSnapshot,
    SlotPresentation,
};
