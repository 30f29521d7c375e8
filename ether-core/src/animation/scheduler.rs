//! Seam between the carousel and the host's animation clock.
//!
//! The carousel never ticks animations. It starts, stops and retargets
//! property transitions through [`AnimationScheduler`], which the host
//! implements on top of whatever timer or toolkit drives its frames.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::easing::EasingKind;
use crate::card::{CardId, CardState};
use crate::constants::animation as defaults;
use crate::geometry::Point;

/// Animatable card property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Property {
    Position,
    Scale,
    Opacity,
    Z,
}

/// A value for one [`Property`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    Position(Point),
    Scale(f32),
    Opacity(f32),
    Z(f32),
}

impl PropertyValue {
    pub fn property(&self) -> Property {
        match self {
            Self::Position(_) => Property::Position,
            Self::Scale(_) => Property::Scale,
            Self::Opacity(_) => Property::Opacity,
            Self::Z(_) => Property::Z,
        }
    }

    /// Read `property` out of a stored card state.
    pub fn read(state: &CardState, property: Property) -> Self {
        match property {
            Property::Position => Self::Position(state.position),
            Property::Scale => Self::Scale(state.scale),
            Property::Opacity => Self::Opacity(state.opacity),
            Property::Z => Self::Z(state.z),
        }
    }

    pub fn write(self, state: &mut CardState) {
        match self {
            Self::Position(p) => state.position = p,
            Self::Scale(s) => state.scale = s,
            Self::Opacity(o) => state.opacity = o,
            Self::Z(z) => state.z = z,
        }
    }

    /// Interpolate towards `to` by eased progress `t`.
    ///
    /// Mismatched properties resolve to `to`.
    pub fn interpolate(self, to: Self, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        match (self, to) {
            (Self::Position(a), Self::Position(b)) => {
                Self::Position(a.lerp(b, t))
            }
            (Self::Scale(a), Self::Scale(b)) => Self::Scale(lerp(a, b)),
            (Self::Opacity(a), Self::Opacity(b)) => Self::Opacity(lerp(a, b)),
            (Self::Z(a), Self::Z(b)) => Self::Z(lerp(a, b)),
            (_, to) => to,
        }
    }
}

/// Handle to an animation started on a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// A single property transition request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub card: CardId,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub duration: Duration,
    pub easing: EasingKind,
}

/// Host-provided animation clock and card property store.
pub trait AnimationScheduler {
    /// Live (possibly mid-animation) value of a card property.
    fn current(&self, card: CardId, property: Property) -> PropertyValue;

    /// Set a property immediately, without animating.
    fn apply(&mut self, card: CardId, value: PropertyValue);

    /// Begin a transition. The scheduler writes interpolated values onto
    /// the card as its clock advances.
    fn start(&mut self, transition: Transition) -> AnimationId;

    /// Stop an animation, leaving the property at its current value.
    /// Stopping a finished or unknown animation is a no-op.
    fn stop(&mut self, id: AnimationId);

    fn is_running(&self, id: AnimationId) -> bool;
}

/// Duration and easing for one property.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyTiming {
    pub duration: Duration,
    pub easing: EasingKind,
}

impl PropertyTiming {
    pub const fn new(duration_ms: u64, easing: EasingKind) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }
}

/// Timing for all four card properties.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationProfile {
    pub position: PropertyTiming,
    pub scale: PropertyTiming,
    pub opacity: PropertyTiming,
    pub z: PropertyTiming,
}

impl Default for AnimationProfile {
    fn default() -> Self {
        Self::uniform(defaults::DURATION_MS)
    }
}

impl AnimationProfile {
    /// Default easings with one shared duration.
    pub fn uniform(duration_ms: u64) -> Self {
        Self {
            position: PropertyTiming::new(
                duration_ms,
                EasingKind::from_u8(defaults::POSITION_EASING),
            ),
            scale: PropertyTiming::new(
                duration_ms,
                EasingKind::from_u8(defaults::SCALE_EASING),
            ),
            opacity: PropertyTiming::new(
                duration_ms,
                EasingKind::from_u8(defaults::OPACITY_EASING),
            ),
            z: PropertyTiming::new(
                duration_ms,
                EasingKind::from_u8(defaults::Z_EASING),
            ),
        }
    }

    pub fn timing(&self, property: Property) -> PropertyTiming {
        match property {
            Property::Position => self.position,
            Property::Scale => self.scale,
            Property::Opacity => self.opacity,
            Property::Z => self.z,
        }
    }
}

/// Carousel-owned handle for one property of one card.
///
/// Mirrors a retargetable property animation: every new target stops the
/// in-flight transition and starts from the scheduler's current value.
#[derive(Debug, Clone)]
pub struct PropertyAnimation {
    card: CardId,
    property: Property,
    timing: PropertyTiming,
    running: Option<AnimationId>,
}

impl PropertyAnimation {
    pub fn new(card: CardId, property: Property, timing: PropertyTiming) -> Self {
        Self {
            card,
            property,
            timing,
            running: None,
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    /// Stop whatever is running and animate from the current value to `to`.
    pub fn retarget<S>(&mut self, scheduler: &mut S, to: PropertyValue) -> AnimationId
    where
        S: AnimationScheduler + ?Sized,
    {
        debug_assert_eq!(to.property(), self.property);
        self.stop(scheduler);
        let from = scheduler.current(self.card, self.property);
        let id = scheduler.start(Transition {
            card: self.card,
            from,
            to,
            duration: self.timing.duration,
            easing: self.timing.easing,
        });
        self.running = Some(id);
        id
    }

    /// Stop whatever is running and set `value` immediately.
    pub fn snap<S>(&mut self, scheduler: &mut S, value: PropertyValue)
    where
        S: AnimationScheduler + ?Sized,
    {
        debug_assert_eq!(value.property(), self.property);
        self.stop(scheduler);
        scheduler.apply(self.card, value);
    }

    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        if let Some(id) = self.running.take() {
            scheduler.stop(id);
        }
    }

    /// The in-flight animation, if the scheduler still runs it.
    pub fn running<S>(&self, scheduler: &S) -> Option<AnimationId>
    where
        S: AnimationScheduler + ?Sized,
    {
        self.running.filter(|id| scheduler.is_running(*id))
    }
}

/// The four property handles of one card.
#[derive(Debug, Clone)]
pub struct CardAnimations {
    pub position: PropertyAnimation,
    pub scale: PropertyAnimation,
    pub opacity: PropertyAnimation,
    pub z: PropertyAnimation,
}

impl CardAnimations {
    pub fn new(card: CardId, profile: &AnimationProfile) -> Self {
        Self {
            position: PropertyAnimation::new(
                card,
                Property::Position,
                profile.position,
            ),
            scale: PropertyAnimation::new(card, Property::Scale, profile.scale),
            opacity: PropertyAnimation::new(
                card,
                Property::Opacity,
                profile.opacity,
            ),
            z: PropertyAnimation::new(card, Property::Z, profile.z),
        }
    }

    pub fn get_mut(&mut self, property: Property) -> &mut PropertyAnimation {
        match property {
            Property::Position => &mut self.position,
            Property::Scale => &mut self.scale,
            Property::Opacity => &mut self.opacity,
            Property::Z => &mut self.z,
        }
    }

    pub fn stop_all<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        self.position.stop(scheduler);
        self.scale.stop(scheduler);
        self.opacity.stop(scheduler);
        self.z.stop(scheduler);
    }
}
