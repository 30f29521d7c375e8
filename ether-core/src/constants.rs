//! Carousel constants
//!
//! Shared defaults for carousel shape, animation timing and scene split.
//! Tuning should happen here so every carousel updates consistently;
//! per-instance overrides go through `CarouselShape` and `AnimationProfile`.

/// Shape parameters handed to `Carousel::initialize` by default.
pub mod shape {
    /// Per-step scale falloff between neighbouring ranks.
    pub const SCALE_FACTOR: f32 = 0.95;
    /// Opacity lost per step away from the focused card.
    pub const OPACITY_FACTOR: f32 = 0.05;
    /// Upper bound on the spacing between two slots.
    pub const MAX_GAP: f32 = 10.0;
    /// Number of ranks given real on-screen positions.
    pub const MAX_VISIBLE_OBJECTS: usize = 5;
    /// Nominal card size (width, height).
    pub const CARD_WIDTH: f32 = 200.0;
    pub const CARD_HEIGHT: f32 = 300.0;
    /// Uniform multiplier applied to every non-clamped slot scale.
    pub const SLOT_SCALE: f32 = 0.9;
}

/// Per-property animation defaults.
pub mod animation {
    /// Duration shared by all four card properties (ms).
    pub const DURATION_MS: u64 = 300;
    /// Easing kind per property: see `EasingKind::from_u8`.
    /// 0=Linear, 1=InQuad, 2=OutQuad, 3=InOutQuad, 4=InOutSine.
    pub const POSITION_EASING: u8 = 4;
    pub const SCALE_EASING: u8 = 4;
    pub const OPACITY_EASING: u8 = 1;
    pub const Z_EASING: u8 = 0;
}

/// Opacity targets for items entering or leaving the visible window.
pub mod visibility {
    pub const VISIBLE: f32 = 1.0;
    pub const INVISIBLE: f32 = 0.0;
    /// z value for outgoing items; below every visible rank.
    pub const HIDDEN_Z: f32 = -1.0;
}

/// Two-row scene split used by `SceneController`.
pub mod scene {
    /// Margin above the top row and between rows, before scaling by the
    /// focused top card's scale.
    pub const ROW_MARGIN: f32 = 58.0;
    /// Height reserved at the bottom of the scene for controls.
    pub const CONTROLS_HEIGHT: f32 = 60.0;
    /// Visible items per row.
    pub const TOP_VISIBLE_ITEMS: usize = 5;
    pub const BOTTOM_VISIBLE_ITEMS: usize = 5;
    /// Card size used by both rows (width, height).
    pub const CARD_WIDTH: f32 = 470.0;
    pub const CARD_HEIGHT: f32 = 349.0;
    /// Focused top card scales at or above this never trigger a re-split
    /// after settling.
    pub const RESPLIT_MAX_SCALE: f32 = 0.95;
}
