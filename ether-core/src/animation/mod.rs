//! Property animation plumbing: easing curves, the scheduler seam the host
//! implements, carousel-owned animation handles and a reference
//! [`Timeline`] scheduler.

pub mod easing;
pub mod scheduler;
pub mod timeline;

pub use easing::EasingKind;
pub use scheduler::{
    AnimationId, AnimationProfile, AnimationScheduler, CardAnimations,
    Property, PropertyAnimation, PropertyTiming, PropertyValue, Transition,
};
pub use timeline::{SettledCallback, Timeline, Tween};
