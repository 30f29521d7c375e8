//! Randomized scroll sequences checked against the ring invariants.

use std::time::Duration;

use ether_core::constants::visibility;
use ether_core::{
    CardId, Carousel, CarouselShape, LayoutKind, Rect, Timeline,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
enum Step {
    Left,
    Right,
}

fn random_steps(rng: &mut StdRng, count: usize) -> Vec<Step> {
    (0..count)
        .map(|_| if rng.random_bool(0.5) { Step::Left } else { Step::Right })
        .collect()
}

fn apply(carousel: &mut Carousel, timeline: &mut Timeline, step: Step) {
    match step {
        Step::Left => carousel.scroll_left(timeline),
        Step::Right => carousel.scroll_right(timeline),
    }
}

fn assert_ring_invariants(carousel: &Carousel, len: usize, max_visible: usize) {
    let mut priority = carousel.priority();
    let focused_item = priority[0];
    assert_eq!(carousel.focused(), Some(carousel.items()[focused_item]));

    priority.sort_unstable();
    assert_eq!(priority, (0..len).collect::<Vec<_>>());

    let window = carousel.visible_window();
    assert_eq!(window.len(), max_visible.min(len));
    assert!(window.contains(&carousel.ring().center_slot()));
}

#[test]
fn random_scrolls_preserve_ring_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let len = rng.random_range(1..12);
        let max_visible = rng.random_range(1..8);
        let items: Vec<CardId> = (0..len).map(|_| CardId::new()).collect();

        let mut timeline = Timeline::new();
        let mut carousel = Carousel::new(LayoutKind::default());
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 1600.0, 500.0),
            &items,
            CarouselShape::with_visible(max_visible),
        );
        let initial = carousel.priority();

        let count = rng.random_range(1..30);
        let steps = random_steps(&mut rng, count);
        for step in &steps {
            apply(&mut carousel, &mut timeline, *step);
            timeline.advance(Duration::from_millis(rng.random_range(0..400)));
            assert_ring_invariants(&carousel, len, max_visible);
        }

        // Undo in reverse order.
        for step in steps.iter().rev() {
            let inverse = match step {
                Step::Left => Step::Right,
                Step::Right => Step::Left,
            };
            apply(&mut carousel, &mut timeline, inverse);
        }
        assert_eq!(carousel.priority(), initial);
        assert_eq!(carousel.focused(), Some(items[initial[0]]));
    }
}

#[test]
fn settled_cards_match_window_membership() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..30 {
        let max_visible = rng.random_range(1..8);
        let len = max_visible + rng.random_range(1..6);
        let items: Vec<CardId> = (0..len).map(|_| CardId::new()).collect();

        let mut timeline = Timeline::new();
        let mut carousel = Carousel::new(LayoutKind::default());
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 1600.0, 500.0),
            &items,
            CarouselShape::with_visible(max_visible),
        );

        for step in random_steps(&mut rng, 20) {
            apply(&mut carousel, &mut timeline, step);
        }
        timeline.finish_all();

        let window = carousel.visible_window();
        let slots: Vec<usize> = carousel.ring().slots().collect();
        for (slot, item) in slots.into_iter().enumerate() {
            let state = timeline.card(items[item]).copied().unwrap_or_default();
            if window.contains(&slot) {
                assert!(state.opacity > 0.0, "slot {slot} should be visible");
                assert!(state.z >= 0.0);
            } else {
                assert_eq!(state.opacity, visibility::INVISIBLE);
                assert_eq!(state.z, visibility::HIDDEN_Z);
                assert_eq!(state.position, carousel.hide_point());
            }
        }
    }
}
