//! Deterministic reference scheduler.
//!
//! `Timeline` stores a [`CardState`] per card and advances tweens by an
//! explicit `dt`, so hosts without their own animation toolkit (and the
//! test suite) can drive the carousel frame by frame.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use super::scheduler::{
    AnimationId, AnimationScheduler, Property, PropertyValue, Transition,
};
use crate::card::{CardId, CardState};

/// Callback fired once when an animation runs to completion.
pub type SettledCallback = Box<dyn FnOnce(CardId)>;

/// Simple time-based tween towards a target value
#[derive(Debug, Clone)]
pub struct Tween {
    transition: Transition,
    elapsed: Duration,
}

impl Tween {
    pub fn new(transition: Transition) -> Self {
        Self {
            transition,
            elapsed: Duration::ZERO,
        }
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Advance by `dt`; returns the value to write and whether the tween
    /// has reached its target.
    pub fn tick(&mut self, dt: Duration) -> (PropertyValue, bool) {
        self.elapsed = self.elapsed.saturating_add(dt);
        let duration = self.transition.duration;
        if self.elapsed >= duration {
            return (self.transition.to, true);
        }
        let t = (self.elapsed.as_secs_f32() / duration.as_secs_f32())
            .clamp(0.0, 1.0);
        let te = self.transition.easing.apply(t);
        (self.transition.from.interpolate(self.transition.to, te), false)
    }
}

#[derive(Default)]
pub struct Timeline {
    cards: HashMap<CardId, CardState>,
    // BTreeMap so that, for one property, the most recently started
    // animation is applied last.
    running: BTreeMap<AnimationId, Tween>,
    settled: HashMap<AnimationId, Vec<SettledCallback>>,
    next_id: u64,
    clock: Duration,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("cards", &self.cards.len())
            .field("running", &self.running.len())
            .field("settled_callbacks", &self.settled.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card with an explicit starting state.
    pub fn insert_card(&mut self, card: CardId, state: CardState) {
        self.cards.insert(card, state);
    }

    pub fn card(&self, card: CardId) -> Option<&CardState> {
        self.cards.get(&card)
    }

    pub fn cards(&self) -> impl Iterator<Item = (&CardId, &CardState)> {
        self.cards.iter()
    }

    /// Total time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Register `callback` to run when animation `id` completes. Returns
    /// false (and drops the callback) if `id` is not running.
    pub fn on_settled<F>(&mut self, id: AnimationId, callback: F) -> bool
    where
        F: FnOnce(CardId) + 'static,
    {
        if !self.running.contains_key(&id) {
            return false;
        }
        self.settled.entry(id).or_default().push(Box::new(callback));
        true
    }

    /// Advance every running animation by `dt`. Returns the number of
    /// animations that completed during this step.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.clock = self.clock.saturating_add(dt);

        let mut finished = Vec::new();
        for (id, tween) in self.running.iter_mut() {
            let (value, done) = tween.tick(dt);
            let card = tween.transition().card;
            value.write(self.cards.entry(card).or_default());
            if done {
                finished.push((*id, card));
            }
        }

        for (id, _) in &finished {
            self.running.remove(id);
        }
        for (id, card) in &finished {
            if let Some(callbacks) = self.settled.remove(id) {
                for callback in callbacks {
                    callback(*card);
                }
            }
        }
        finished.len()
    }

    /// Run every animation to completion.
    pub fn finish_all(&mut self) -> usize {
        let longest = self
            .running
            .values()
            .map(|tween| tween.transition().duration)
            .max()
            .unwrap_or(Duration::ZERO);
        // Zero-length tweens still need one tick to land.
        self.advance(longest.max(Duration::from_nanos(1)))
    }
}

impl AnimationScheduler for Timeline {
    fn current(&self, card: CardId, property: Property) -> PropertyValue {
        let state = self.cards.get(&card).copied().unwrap_or_default();
        PropertyValue::read(&state, property)
    }

    fn apply(&mut self, card: CardId, value: PropertyValue) {
        value.write(self.cards.entry(card).or_default());
    }

    fn start(&mut self, transition: Transition) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.running.insert(id, Tween::new(transition));
        id
    }

    fn stop(&mut self, id: AnimationId) {
        self.running.remove(&id);
        self.settled.remove(&id);
    }

    fn is_running(&self, id: AnimationId) -> bool {
        self.running.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::EasingKind;
    use crate::geometry::Point;

    fn opacity_transition(card: CardId, from: f32, to: f32) -> Transition {
        Transition {
            card,
            from: PropertyValue::Opacity(from),
            to: PropertyValue::Opacity(to),
            duration: Duration::from_millis(100),
            easing: EasingKind::Linear,
        }
    }

    #[test]
    fn advance_interpolates_and_lands_on_target() {
        let card = CardId::new();
        let mut timeline = Timeline::new();
        timeline.start(opacity_transition(card, 0.0, 1.0));

        timeline.advance(Duration::from_millis(50));
        let mid = timeline.card(card).map(|s| s.opacity).unwrap_or_default();
        assert!((mid - 0.5).abs() < 1e-4);

        assert_eq!(timeline.advance(Duration::from_millis(60)), 1);
        assert_eq!(timeline.card(card).map(|s| s.opacity), Some(1.0));
        assert!(timeline.is_idle());
    }

    #[test]
    fn stop_leaves_current_value_and_drops_callbacks() {
        let card = CardId::new();
        let mut timeline = Timeline::new();
        let id = timeline.start(opacity_transition(card, 0.0, 1.0));
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        assert!(timeline.on_settled(id, move |_| flag.set(true)));

        timeline.advance(Duration::from_millis(25));
        timeline.stop(id);
        timeline.advance(Duration::from_millis(500));

        let opacity = timeline.card(card).map(|s| s.opacity).unwrap_or_default();
        assert!((opacity - 0.25).abs() < 1e-4);
        assert!(!fired.get());
    }

    #[test]
    fn settled_callback_receives_card() {
        let card = CardId::new();
        let mut timeline = Timeline::new();
        let id = timeline.start(Transition {
            card,
            from: PropertyValue::Position(Point::ORIGIN),
            to: PropertyValue::Position(Point::new(10.0, 10.0)),
            duration: Duration::from_millis(10),
            easing: EasingKind::InOutSine,
        });
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        timeline.on_settled(id, move |c| sink.set(Some(c)));

        timeline.finish_all();
        assert_eq!(seen.get(), Some(card));
        assert!(!timeline.on_settled(id, |_| {}));
    }
}
