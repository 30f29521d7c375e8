//! Layout engine for a focus carousel: a ring of host-owned cards where one
//! card is focused at the center and its neighbours fan out with shrinking
//! scale and opacity.
//!
//! The engine never owns or draws cards. Hosts implement
//! [`AnimationScheduler`] over their own card objects (or use the bundled
//! [`Timeline`]) and hand it to every operation that moves cards.
//!
//! ```
//! use ether_core::{Carousel, CardId, CarouselShape, LayoutKind, Rect, Timeline};
//!
//! let mut timeline = Timeline::new();
//! let cards: Vec<CardId> = (0..7).map(|i| CardId::from_name(&i.to_string())).collect();
//! let mut carousel = Carousel::new(LayoutKind::default());
//! carousel.initialize(
//!     &mut timeline,
//!     Rect::new(0.0, 0.0, 1280.0, 400.0),
//!     &cards,
//!     CarouselShape::default(),
//! );
//! assert_eq!(carousel.focused(), Some(cards[3]));
//!
//! carousel.scroll_left(&mut timeline);
//! timeline.finish_all();
//! assert_eq!(carousel.focused(), Some(cards[4]));
//! ```

pub mod animation;
pub mod card;
pub mod carousel;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod scene;

pub use animation::{
    AnimationId, AnimationProfile, AnimationScheduler, EasingKind, Property,
    PropertyTiming, PropertyValue, Timeline, Transition,
};
pub use card::{CardId, CardState};
pub use carousel::{
    ArcOpening, Carousel, CarouselEvent, CarouselShape, CarouselSnapshot,
    LayoutKind, LinearAnchor, SlotPresentation,
};
pub use error::{CarouselError, Result};
pub use geometry::{Point, Rect, Size};
pub use scene::{Row, RowConfig, SceneConfig, SceneController, SceneEvent};
