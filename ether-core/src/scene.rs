//! Two-row scene: a top and a bottom carousel sharing one scene rect,
//! with keyboard focus on one of them at a time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::animation::{
    AnimationProfile, AnimationScheduler, Property, PropertyValue,
};
use crate::card::CardId;
use crate::carousel::{Carousel, CarouselEvent, CarouselShape, LayoutKind, LinearAnchor};
use crate::constants::scene;
use crate::error::{CarouselError, Result};
use crate::geometry::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Row {
    Top,
    Bottom,
}

impl Row {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-row carousel setup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowConfig {
    pub layout: LayoutKind,
    pub shape: CarouselShape,
    pub profile: AnimationProfile,
}

impl RowConfig {
    pub fn with_visible(max_visible_objects: usize) -> Self {
        Self {
            layout: LayoutKind::Linear {
                anchor: LinearAnchor::Middle,
            },
            shape: CarouselShape {
                card_max_size: Size::new(scene::CARD_WIDTH, scene::CARD_HEIGHT),
                max_visible_objects,
                ..CarouselShape::default()
            },
            profile: AnimationProfile::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    pub top: RowConfig,
    pub bottom: RowConfig,
    /// Margin around the rows at full focused-card scale.
    pub row_margin: f32,
    /// Height reserved below the rows.
    pub controls_height: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            top: RowConfig::with_visible(scene::TOP_VISIBLE_ITEMS),
            bottom: RowConfig::with_visible(scene::BOTTOM_VISIBLE_ITEMS),
            row_margin: scene::ROW_MARGIN,
            controls_height: scene::CONTROLS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SceneEvent {
    /// `card` became the active item of `row`, either because the row's
    /// focus moved or because the row was (re)activated.
    ActiveItemChanged { row: Row, card: CardId },
}

/// Split `rect` into the top and bottom row rects.
///
/// `margin` goes above the top row, twice between the rows and below the
/// bottom row; `controls_height` is reserved at the very bottom.
pub fn split_rows(rect: Rect, margin: f32, controls_height: f32) -> (Rect, Rect) {
    let available = (rect.height - 2.0 * margin - controls_height).max(0.0);
    let row_height = (available / 2.0 - margin).max(0.0);

    let top = Rect::new(rect.x, rect.y + margin, rect.width, row_height);
    let bottom = Rect::new(
        rect.x,
        top.bottom() + 2.0 * margin,
        rect.width,
        row_height,
    );
    (top, bottom)
}

fn tenths(scale: f32) -> i32 {
    (scale * 10.0) as i32
}

/// Coordinates the two carousels of the login scene.
#[derive(Debug, Clone)]
pub struct SceneController {
    config: SceneConfig,
    top: Carousel,
    bottom: Carousel,
    active: Option<Row>,
    scene_rect: Rect,
    top_rect: Rect,
    bottom_rect: Rect,
    last_active_top: Option<CardId>,
    last_active_bottom: Option<CardId>,
    /// Focused top card scale used for the last split.
    split_scale: Option<f32>,
    events: Vec<SceneEvent>,
}

impl SceneController {
    pub fn new(config: SceneConfig, scene_rect: Rect) -> Self {
        let (top_rect, bottom_rect) =
            split_rows(scene_rect, config.row_margin, config.controls_height);
        Self {
            top: Carousel::new(config.top.layout).with_profile(config.top.profile),
            bottom: Carousel::new(config.bottom.layout)
                .with_profile(config.bottom.profile),
            config,
            active: None,
            scene_rect,
            top_rect,
            bottom_rect,
            last_active_top: None,
            last_active_bottom: None,
            split_scale: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn carousel(&self, row: Row) -> &Carousel {
        match row {
            Row::Top => &self.top,
            Row::Bottom => &self.bottom,
        }
    }

    fn carousel_mut(&mut self, row: Row) -> &mut Carousel {
        match row {
            Row::Top => &mut self.top,
            Row::Bottom => &mut self.bottom,
        }
    }

    pub fn active_row(&self) -> Option<Row> {
        self.active
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn row_rect(&self, row: Row) -> Rect {
        match row {
            Row::Top => self.top_rect,
            Row::Bottom => self.bottom_rect,
        }
    }

    /// Last card announced as active for `row`.
    pub fn last_active(&self, row: Row) -> Option<CardId> {
        match row {
            Row::Top => self.last_active_top,
            Row::Bottom => self.last_active_bottom,
        }
    }

    /// Focused card of each row (top, bottom).
    pub fn selection(&self) -> (Option<CardId>, Option<CardId>) {
        (self.top.focused(), self.bottom.focused())
    }

    pub fn all_cards(&self) -> Vec<CardId> {
        self.top
            .items()
            .iter()
            .chain(self.bottom.items())
            .copied()
            .collect()
    }

    pub fn row_of(&self, card: CardId) -> Option<Row> {
        if self.top.contains(card) {
            Some(Row::Top)
        } else if self.bottom.contains(card) {
            Some(Row::Bottom)
        } else {
            None
        }
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn load_top<S>(&mut self, scheduler: &mut S, items: &[CardId])
    where
        S: AnimationScheduler + ?Sized,
    {
        self.load(scheduler, Row::Top, items);
    }

    pub fn load_bottom<S>(&mut self, scheduler: &mut S, items: &[CardId])
    where
        S: AnimationScheduler + ?Sized,
    {
        self.load(scheduler, Row::Bottom, items);
    }

    /// Put `card` at the front of `row`'s items, reload the row and make it
    /// active. A card already in the row is moved rather than duplicated.
    pub fn add_card<S>(&mut self, scheduler: &mut S, row: Row, card: CardId)
    where
        S: AnimationScheduler + ?Sized,
    {
        let mut items = Vec::with_capacity(self.carousel(row).len() + 1);
        items.push(card);
        items.extend(
            self.carousel(row)
                .items()
                .iter()
                .copied()
                .filter(|existing| *existing != card),
        );
        self.load(scheduler, row, &items);
        self.active = Some(row);
    }

    fn load<S>(&mut self, scheduler: &mut S, row: Row, items: &[CardId])
    where
        S: AnimationScheduler + ?Sized,
    {
        let rect = self.row_rect(row);
        let shape = match row {
            Row::Top => self.config.top.shape,
            Row::Bottom => self.config.bottom.shape,
        };
        info!(%row, items = items.len(), "loading scene row");
        self.carousel_mut(row).initialize(scheduler, rect, items, shape);
        if self.active.is_none() {
            self.active = Some(row);
        }
        self.collect_events(row);
        self.relayout(scheduler);
    }

    /// Re-split the scene and resize both rows without animating.
    pub fn scene_rect_changed<S>(&mut self, scheduler: &mut S, rect: Rect)
    where
        S: AnimationScheduler + ?Sized,
    {
        self.scene_rect = rect;
        self.relayout(scheduler);
    }

    /// Re-split if the focused top card's scale moved since the last split.
    ///
    /// The row margin follows the live scale of the focused top card, so a
    /// split made mid-animation goes stale once the card settles. Hosts
    /// call this when animations finish. Scales are compared in tenths, and
    /// a card settling at or above [`scene::RESPLIT_MAX_SCALE`] keeps the
    /// current split. Returns whether a re-split happened.
    pub fn refresh_after_settle<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: AnimationScheduler + ?Sized,
    {
        let scale = self.focused_top_scale(scheduler);
        let changed = self
            .split_scale
            .is_none_or(|last| tenths(last) != tenths(scale));
        if !changed || scale >= scene::RESPLIT_MAX_SCALE {
            return false;
        }
        self.relayout(scheduler);
        true
    }

    fn relayout<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        let scale = self.focused_top_scale(scheduler);
        let margin = self.config.row_margin * scale;
        let (top, bottom) =
            split_rows(self.scene_rect, margin, self.config.controls_height);
        debug!(?top, ?bottom, margin, "scene rows split");

        self.top_rect = top;
        self.bottom_rect = bottom;
        self.split_scale = Some(scale);
        self.top.resize(scheduler, top);
        self.bottom.resize(scheduler, bottom);
        self.collect_events(Row::Top);
        self.collect_events(Row::Bottom);
    }

    fn focused_top_scale<S>(&self, scheduler: &S) -> f32
    where
        S: AnimationScheduler + ?Sized,
    {
        match self.top.focused() {
            Some(card) => match scheduler.current(card, Property::Scale) {
                PropertyValue::Scale(scale) => scale,
                _ => 1.0,
            },
            None => 1.0,
        }
    }

    /// Activate the top row and re-announce its active card.
    pub fn up_pressed(&mut self) {
        self.activate(Row::Top);
    }

    /// Activate the bottom row and re-announce its active card.
    pub fn down_pressed(&mut self) {
        self.activate(Row::Bottom);
    }

    fn activate(&mut self, row: Row) {
        self.active = Some(row);
        debug!(%row, "scene row activated");
        if let Some(card) = self.last_active(row) {
            self.events.push(SceneEvent::ActiveItemChanged { row, card });
        }
    }

    pub fn left_pressed<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        if let Some(row) = self.active {
            self.carousel_mut(row).scroll_left(scheduler);
            self.collect_events(row);
        }
    }

    pub fn right_pressed<S>(&mut self, scheduler: &mut S)
    where
        S: AnimationScheduler + ?Sized,
    {
        if let Some(row) = self.active {
            self.carousel_mut(row).scroll_right(scheduler);
            self.collect_events(row);
        }
    }

    /// Focus `card` in whichever row owns it. The active row is unchanged.
    pub fn card_clicked<S>(&mut self, scheduler: &mut S, card: CardId) -> Result<()>
    where
        S: AnimationScheduler + ?Sized,
    {
        let row = self.row_of(card).ok_or(CarouselError::UnknownCard(card))?;
        self.carousel_mut(row).set_focus(scheduler, card)?;
        self.collect_events(row);
        Ok(())
    }

    fn collect_events(&mut self, row: Row) {
        for event in self.carousel_mut(row).take_events() {
            let CarouselEvent::FocusChanged(card) = event;
            match row {
                Row::Top => self.last_active_top = Some(card),
                Row::Bottom => self.last_active_bottom = Some(card),
            }
            self.events.push(SceneEvent::ActiveItemChanged { row, card });
        }
    }
}
