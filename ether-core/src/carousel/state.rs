//! Carousel: focus ring, windowing and animated card placement

use std::collections::HashMap;
use std::ops::Range;

use tracing::{debug, trace, warn};

use super::layout::{LayoutInput, LayoutKind, compute_gap};
use super::presentation::Falloff;
use super::priority::{PriorityRing, visible_window};
use super::types::{
    AssignedSlot, CarouselEvent, CarouselShape, CarouselSnapshot,
    SlotPresentation,
};
use crate::animation::{
    AnimationId, AnimationProfile, AnimationScheduler, CardAnimations,
    PropertyValue,
};
use crate::card::CardId;
use crate::constants::{shape, visibility};
use crate::error::{CarouselError, Result};
use crate::geometry::{Point, Rect, Size};

/// How a state assignment reaches the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assignment {
    /// Retarget animations from the cards' current values.
    Animated,
    /// Set values directly, cancelling in-flight animations.
    Instant,
}

/// A partially visible, centrally focused ring of cards.
///
/// The carousel never owns cards: it keeps their ids and drives their
/// properties through the host's [`AnimationScheduler`], which is passed to
/// every mutating operation.
#[derive(Debug, Clone)]
pub struct Carousel {
    layout: LayoutKind,
    profile: AnimationProfile,
    slot_scale: f32,

    // Content
    items: Vec<CardId>,
    index_of: HashMap<CardId, usize>,
    ring: PriorityRing,

    // Geometry
    shape: CarouselShape,
    bounds: Rect,
    current_scale_factor: f32,
    current_card_size: Size,
    gap: f32,
    positions: Vec<Point>,
    hide_point: Point,

    // Windowing
    visible_window: Range<usize>,

    // Animation handles keyed by item index
    animations: HashMap<usize, CardAnimations>,

    highlighted: Option<CardId>,
    events: Vec<CarouselEvent>,
}

impl Carousel {
    pub fn new(layout: LayoutKind) -> Self {
        Self {
            layout,
            profile: AnimationProfile::default(),
            slot_scale: shape::SLOT_SCALE,
            items: Vec::new(),
            index_of: HashMap::new(),
            ring: PriorityRing::default(),
            shape: CarouselShape::default(),
            bounds: Rect::default(),
            current_scale_factor: shape::SCALE_FACTOR,
            current_card_size: Size::default(),
            gap: 0.0,
            positions: Vec::new(),
            hide_point: Point::ORIGIN,
            visible_window: 0..0,
            animations: HashMap::new(),
            highlighted: None,
            events: Vec::new(),
        }
    }

    /// Use custom animation timing. Takes effect at the next `initialize`.
    pub fn with_profile(mut self, profile: AnimationProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the uniform slot scale multiplier.
    pub fn with_slot_scale(mut self, slot_scale: f32) -> Self {
        self.slot_scale = slot_scale;
        self
    }

    /// Reset the carousel with a new set of cards and shape.
    ///
    /// Every card is snapped (not animated) to its rank's state so the
    /// carousel is correct before the first paint. Queues exactly one
    /// `FocusChanged` for the initial focus when `items` is non-empty.
    ///
    /// Card ids must be unique; repeats are dropped. A `max_visible_objects`
    /// of zero is raised to one so the focused card is always shown.
    pub fn initialize<S>(
        &mut self,
        scheduler: &mut S,
        bounds: Rect,
        items: &[CardId],
        shape: CarouselShape,
    ) where
        S: AnimationScheduler + ?Sized,
    {
        for animations in self.animations.values_mut() {
            animations.stop_all(scheduler);
        }
        self.animations.clear();
        self.events.clear();
        self.highlighted = None;

        // A card can hold only one slot; repeats after the first are dropped.
        self.items = Vec::with_capacity(items.len());
        self.index_of = HashMap::with_capacity(items.len());
        for card in items {
            if !self.index_of.contains_key(card) {
                self.index_of.insert(*card, self.items.len());
                self.items.push(*card);
            }
        }
        if self.items.len() != items.len() {
            warn!(
                items = items.len(),
                unique = self.items.len(),
                "carousel initialized with duplicate card ids"
            );
        }

        self.shape = shape;
        if self.shape.max_visible_objects == 0 {
            warn!("carousel window of zero cards widened to one");
            self.shape.max_visible_objects = 1;
        }
        self.ring = PriorityRing::new(self.items.len());
        self.visible_window =
            visible_window(self.items.len(), self.shape.max_visible_objects);

        self.apply_bounds(bounds);

        self.animations = self
            .items
            .iter()
            .enumerate()
            .map(|(index, card)| (index, CardAnimations::new(*card, &self.profile)))
            .collect();

        debug!(
            items = self.items.len(),
            window = ?self.visible_window,
            gap = self.gap,
            "carousel initialized"
        );

        self.settle_all(scheduler);
    }

    /// Re-layout for new bounds without animating.
    ///
    /// Never changes the ring or the focused card.
    pub fn resize<S>(&mut self, scheduler: &mut S, bounds: Rect)
    where
        S: AnimationScheduler + ?Sized,
    {
        self.apply_bounds(bounds);
        debug!(
            ?bounds,
            scale_factor = self.current_scale_factor,
            gap = self.gap,
            "carousel resized"
        );
        self.settle_all(scheduler);
    }

    /// Focus the right-hand neighbour: every card slides one slot left.
    pub fn scroll_left<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        let len = self.items.len();
        if len <= 1 {
            return;
        }
        self.ring.rotate_left();

        if len > self.shape.max_visible_objects && !self.visible_window.is_empty() {
            let entering = self.visible_window.end - 1;
            let leaving = self
                .visible_window
                .start
                .checked_sub(1)
                .unwrap_or(len - 1);
            self.show_at_slot(scheduler, entering);
            self.hide_at_slot(scheduler, leaving);
        }

        self.assign_states(scheduler, Assignment::Animated);
        debug!(focused = ?self.highlighted, "carousel scrolled left");
    }

    /// Focus the left-hand neighbour: every card slides one slot right.
    pub fn scroll_right<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        let len = self.items.len();
        if len <= 1 {
            return;
        }
        self.ring.rotate_right();

        if len > self.shape.max_visible_objects && !self.visible_window.is_empty() {
            let entering = self.visible_window.start;
            let leaving = self.visible_window.end % len;
            self.show_at_slot(scheduler, entering);
            self.hide_at_slot(scheduler, leaving);
        }

        self.assign_states(scheduler, Assignment::Animated);
        debug!(focused = ?self.highlighted, "carousel scrolled right");
    }

    /// Bring `card` to rank 0 by scrolling one step at a time, so every
    /// visible card keeps animating continuously.
    pub fn set_focus<S>(&mut self, scheduler: &mut S, card: CardId) -> Result<()>
    where
        S: AnimationScheduler + ?Sized,
    {
        let slot = self
            .index_of
            .get(&card)
            .and_then(|item| self.ring.slot_of_item(*item))
            .ok_or(CarouselError::UnknownCard(card))?;
        let center = self.ring.center_slot();

        debug!(%card, slot, center, "carousel focusing card");
        if slot < center {
            for _ in slot..center {
                self.scroll_right(scheduler);
            }
        } else {
            for _ in center..slot {
                self.scroll_left(scheduler);
            }
        }
        Ok(())
    }

    /// Card at rank 0.
    pub fn focused(&self) -> Option<CardId> {
        self.ring
            .item_at_rank(0)
            .and_then(|item| self.items.get(item).copied())
    }

    /// Last focused card announced through `FocusChanged`.
    pub fn highlighted(&self) -> Option<CardId> {
        self.highlighted
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn shape(&self) -> &CarouselShape {
        &self.shape
    }

    pub fn items(&self) -> &[CardId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.index_of.contains_key(&card)
    }

    /// `priority()[rank] == item index`.
    pub fn priority(&self) -> Vec<usize> {
        self.ring.priority()
    }

    pub fn ring(&self) -> &PriorityRing {
        &self.ring
    }

    /// Slots given real positions, as a half-open range.
    pub fn visible_window(&self) -> Range<usize> {
        self.visible_window.clone()
    }

    /// Leftmost visible slot.
    pub fn left_limit(&self) -> Option<usize> {
        (!self.visible_window.is_empty()).then_some(self.visible_window.start)
    }

    /// Rightmost visible slot.
    pub fn right_limit(&self) -> Option<usize> {
        (!self.visible_window.is_empty()).then(|| self.visible_window.end - 1)
    }

    pub fn rank_of(&self, card: CardId) -> Option<usize> {
        self.index_of
            .get(&card)
            .and_then(|item| self.ring.rank_of_item(*item))
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn hide_point(&self) -> Point {
        self.hide_point
    }

    pub fn current_scale_factor(&self) -> f32 {
        self.current_scale_factor
    }

    pub fn current_card_size(&self) -> Size {
        self.current_card_size
    }

    /// Target points per rank of the visible window.
    pub fn slot_positions(&self) -> &[Point] {
        &self.positions
    }

    /// The card's in-flight move animation, for observers that want to wait
    /// for it to settle.
    pub fn move_animation<S>(&self, scheduler: &S, card: CardId) -> Option<AnimationId>
    where
        S: AnimationScheduler + ?Sized,
    {
        let item = self.index_of.get(&card)?;
        self.animations.get(item)?.position.running(scheduler)
    }

    /// Target presentation for `rank`, if it is inside the visible window.
    pub fn presentation_for_rank(&self, rank: usize) -> Option<SlotPresentation> {
        let position = *self.positions.get(rank)?;
        Some(self.falloff().present(rank, position))
    }

    /// Visible ranks with their assigned cards, in rank order.
    pub fn assigned_slots(&self) -> Vec<AssignedSlot> {
        (0..self.visible_window.len())
            .filter_map(|rank| {
                let slot = self.ring.slot_of_rank(rank)?;
                let item_index = self.ring.item_at_slot(slot)?;
                Some(AssignedSlot {
                    card: *self.items.get(item_index)?,
                    item_index,
                    slot,
                    presentation: self.presentation_for_rank(rank)?,
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            bounds: self.bounds,
            focused: self.focused(),
            priority: self.priority(),
            visible_window: self.visible_window(),
            gap: self.gap,
            hide_point: self.hide_point,
            current_scale_factor: self.current_scale_factor,
            current_card_size: self.current_card_size,
            slots: self.assigned_slots(),
        }
    }

    fn falloff(&self) -> Falloff {
        Falloff {
            scale_factor: self.current_scale_factor,
            slot_scale: self.slot_scale,
            opacity_factor: self.shape.opacity_factor,
            max_visible: self.shape.max_visible_objects,
            card_height: self.shape.card_max_size.height,
            bounds_height: self.bounds.height,
        }
    }

    /// Derive the effective card size, scale factor, gap, slot positions and
    /// hide point from `bounds`.
    fn apply_bounds(&mut self, bounds: Rect) {
        if bounds.is_empty() {
            warn!(?bounds, "carousel bounds enclose no area");
        }
        self.bounds = bounds;

        let nominal = self.shape.card_max_size;
        self.current_card_size = nominal;
        if nominal.height > 0.0 && bounds.height < nominal.height {
            let shortfall = 1.0 - bounds.height.max(0.0) / nominal.height;
            self.current_scale_factor =
                (self.shape.scale_factor - shortfall).max(0.0);
            self.current_card_size.height = bounds.height.max(0.0);
        } else {
            self.current_scale_factor = self.shape.scale_factor;
        }

        self.gap = compute_gap(
            bounds.width,
            self.current_card_size.width,
            self.current_scale_factor,
            self.shape.max_visible_objects,
            self.shape.max_gap,
        );

        let input = LayoutInput {
            bounds,
            card_size: self.current_card_size,
            scale_factor: self.current_scale_factor,
            max_visible: self.shape.max_visible_objects,
            window_len: self.visible_window.len(),
            gap: self.gap,
        };
        self.positions = self.layout.slot_positions(&input);
        self.hide_point = self.layout.hide_point(&input);
    }

    /// Park everything outside the window, then snap the window in place.
    fn settle_all<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        if self.items.is_empty() {
            return;
        }
        let hide_point = self.hide_point;
        for slot in 0..self.ring.len() {
            if self.visible_window.contains(&slot) {
                continue;
            }
            let Some(item) = self.ring.item_at_slot(slot) else {
                continue;
            };
            if let Some(animations) = self.animations.get_mut(&item) {
                animations
                    .position
                    .snap(scheduler, PropertyValue::Position(hide_point));
                animations.opacity.snap(
                    scheduler,
                    PropertyValue::Opacity(visibility::INVISIBLE),
                );
                animations
                    .z
                    .snap(scheduler, PropertyValue::Z(visibility::HIDDEN_Z));
                animations.scale.stop(scheduler);
            }
        }
        self.assign_states(scheduler, Assignment::Instant);
    }

    /// Apply each visible rank's presentation to the card holding it.
    fn assign_states<S>(&mut self, scheduler: &mut S, mode: Assignment)
    where
        S: AnimationScheduler + ?Sized,
    {
        let falloff = self.falloff();
        for rank in 0..self.visible_window.len() {
            let Some(item) = self.ring.item_at_rank(rank) else {
                continue;
            };
            let Some(&position) = self.positions.get(rank) else {
                continue;
            };
            let Some(&card) = self.items.get(item) else {
                continue;
            };
            let target = falloff.present(rank, position);
            trace!(rank, %card, ?target, ?mode, "assigning slot");

            if let Some(animations) = self.animations.get_mut(&item) {
                let position = PropertyValue::Position(target.position);
                let scale = PropertyValue::Scale(target.scale);
                let z = PropertyValue::Z(target.z);
                match mode {
                    Assignment::Animated => {
                        animations.position.retarget(scheduler, position);
                        animations.scale.retarget(scheduler, scale);
                        animations.z.retarget(scheduler, z);
                        if let Some(opacity) = target.opacity {
                            animations
                                .opacity
                                .retarget(scheduler, PropertyValue::Opacity(opacity));
                        }
                    }
                    Assignment::Instant => {
                        animations.position.snap(scheduler, position);
                        animations.scale.snap(scheduler, scale);
                        animations.z.snap(scheduler, z);
                        let opacity =
                            target.opacity.unwrap_or(visibility::VISIBLE);
                        animations
                            .opacity
                            .snap(scheduler, PropertyValue::Opacity(opacity));
                    }
                }
            }

            if rank == 0 {
                self.note_focus(card);
            }
        }
    }

    /// An item entering the window fades in; its slot is set by the
    /// window-wide assignment that follows.
    fn show_at_slot<S>(&mut self, scheduler: &mut S, slot: usize)
    where
        S: AnimationScheduler + ?Sized,
    {
        let Some(item) = self.ring.item_at_slot(slot) else {
            return;
        };
        if let Some(animations) = self.animations.get_mut(&item) {
            animations.opacity.retarget(
                scheduler,
                PropertyValue::Opacity(visibility::VISIBLE),
            );
        }
    }

    /// An item leaving the window drops below every visible card first,
    /// then slides to the hide point while fading out.
    fn hide_at_slot<S>(&mut self, scheduler: &mut S, slot: usize)
    where
        S: AnimationScheduler + ?Sized,
    {
        let Some(item) = self.ring.item_at_slot(slot) else {
            return;
        };
        let hide_point = self.hide_point;
        if let Some(animations) = self.animations.get_mut(&item) {
            animations
                .z
                .snap(scheduler, PropertyValue::Z(visibility::HIDDEN_Z));
            animations
                .position
                .retarget(scheduler, PropertyValue::Position(hide_point));
            animations.opacity.retarget(
                scheduler,
                PropertyValue::Opacity(visibility::INVISIBLE),
            );
        }
    }

    fn note_focus(&mut self, card: CardId) {
        if self.highlighted != Some(card) {
            debug!(%card, "focus changed");
            self.highlighted = Some(card);
            self.events.push(CarouselEvent::FocusChanged(card));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Timeline;
    use crate::carousel::layout::ArcOpening;

    fn cards(n: usize) -> Vec<CardId> {
        (0..n).map(|i| CardId::from_name(&format!("card-{i}"))).collect()
    }

    fn arc() -> Carousel {
        Carousel::new(LayoutKind::Arc {
            opening: ArcOpening::Up,
        })
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut timeline = Timeline::new();
        let mut carousel = arc();
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &[],
            CarouselShape::default(),
        );
        carousel.scroll_left(&mut timeline);
        carousel.scroll_right(&mut timeline);
        carousel.resize(&mut timeline, Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(carousel.focused(), None);
        assert!(carousel.take_events().is_empty());
        assert_eq!(carousel.left_limit(), None);
        assert_eq!(carousel.right_limit(), None);
        assert!(timeline.is_idle());
    }

    #[test]
    fn initialize_snaps_without_animating() {
        let mut timeline = Timeline::new();
        let items = cards(7);
        let mut carousel = arc();
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 1000.0, 400.0),
            &items,
            CarouselShape::default(),
        );

        assert!(timeline.is_idle());
        assert_eq!(carousel.focused(), Some(items[3]));
        assert_eq!(
            carousel.take_events(),
            vec![CarouselEvent::FocusChanged(items[3])]
        );

        // Slots 0 and 6 sit outside the 5-wide window.
        for hidden in [items[0], items[6]] {
            let state = timeline.card(hidden).copied().unwrap_or_default();
            assert_eq!(state.opacity, 0.0);
            assert_eq!(state.position, carousel.hide_point());
        }
        let focused = timeline.card(items[3]).copied().unwrap_or_default();
        assert_eq!(focused.position, carousel.slot_positions()[0]);
        assert_eq!(focused.z, 5.0);
    }

    #[test]
    fn move_animation_is_exposed_while_scrolling() {
        let mut timeline = Timeline::new();
        let items = cards(3);
        let mut carousel = arc();
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 1000.0, 400.0),
            &items,
            CarouselShape::default(),
        );
        assert_eq!(carousel.move_animation(&timeline, items[1]), None);

        carousel.scroll_left(&mut timeline);
        assert!(carousel.move_animation(&timeline, items[1]).is_some());

        timeline.finish_all();
        assert_eq!(carousel.move_animation(&timeline, items[1]), None);
    }

    #[test]
    fn unknown_card_fails_loudly() {
        let mut timeline = Timeline::new();
        let mut carousel = arc();
        carousel.initialize(
            &mut timeline,
            Rect::new(0.0, 0.0, 1000.0, 400.0),
            &cards(4),
            CarouselShape::default(),
        );
        let stranger = CardId::from_name("stranger");
        assert_eq!(
            carousel.set_focus(&mut timeline, stranger),
            Err(CarouselError::UnknownCard(stranger))
        );
    }
}
