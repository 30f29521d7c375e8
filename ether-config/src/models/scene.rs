use anyhow::{Context, anyhow};
use ether_core::animation::{AnimationProfile, EasingKind, PropertyTiming};
use ether_core::carousel::{CarouselShape, LayoutKind, LinearAnchor};
use ether_core::constants::{animation, scene, shape};
use ether_core::geometry::Size;
use ether_core::scene::{RowConfig, SceneConfig};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const CONFIG_PATH_ENV: &str = "ETHER_SCENE_CONFIG_PATH";
pub const CONFIG_JSON_ENV: &str = "ETHER_SCENE_CONFIG_JSON";

const CANDIDATES: &[&str] = &[
    "ether.toml",
    "ether.json",
    "config/ether.toml",
    "config/ether.json",
];

/// Source that produced the scene settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SceneSettingsSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for SceneSettingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "defaults"),
            Self::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_ENV} ({})", path.display())
            }
            Self::EnvInline => write!(f, "${CONFIG_JSON_ENV}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Per-property animation timing. All properties share one duration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Length of every card transition (ms). `0` makes moves instant.
    pub duration_ms: u64,
    pub position_easing: EasingKind,
    pub scale_easing: EasingKind,
    pub opacity_easing: EasingKind,
    pub z_easing: EasingKind,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: animation::DURATION_MS,
            position_easing: EasingKind::from_u8(animation::POSITION_EASING),
            scale_easing: EasingKind::from_u8(animation::SCALE_EASING),
            opacity_easing: EasingKind::from_u8(animation::OPACITY_EASING),
            z_easing: EasingKind::from_u8(animation::Z_EASING),
        }
    }
}

impl AnimationSettings {
    pub fn to_profile(&self) -> AnimationProfile {
        AnimationProfile {
            position: PropertyTiming::new(self.duration_ms, self.position_easing),
            scale: PropertyTiming::new(self.duration_ms, self.scale_easing),
            opacity: PropertyTiming::new(self.duration_ms, self.opacity_easing),
            z: PropertyTiming::new(self.duration_ms, self.z_easing),
        }
    }
}

/// One carousel row. Tune `max_visible_objects` to trade density for card
/// size; odd values keep the window symmetric around the focused card.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RowSettings {
    pub layout: LayoutKind,
    pub card_width: f32,
    pub card_height: f32,
    /// Scale lost per step away from focus. Values above 1 grow the
    /// neighbours instead.
    pub scale_factor: f32,
    pub max_visible_objects: usize,
    /// Opacity lost per step away from focus; `0` keeps every card opaque.
    pub opacity_factor: f32,
    /// Upper bound on the spacing between slots.
    pub max_gap: f32,
    pub animation: AnimationSettings,
}

impl Default for RowSettings {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Linear {
                anchor: LinearAnchor::Middle,
            },
            card_width: scene::CARD_WIDTH,
            card_height: scene::CARD_HEIGHT,
            scale_factor: shape::SCALE_FACTOR,
            max_visible_objects: scene::TOP_VISIBLE_ITEMS,
            opacity_factor: shape::OPACITY_FACTOR,
            max_gap: shape::MAX_GAP,
            animation: AnimationSettings::default(),
        }
    }
}

impl RowSettings {
    pub fn shape(&self) -> CarouselShape {
        CarouselShape {
            card_max_size: Size::new(self.card_width, self.card_height),
            scale_factor: self.scale_factor,
            max_visible_objects: self.max_visible_objects,
            opacity_factor: self.opacity_factor,
            max_gap: self.max_gap,
        }
    }

    pub fn to_row_config(&self) -> RowConfig {
        RowConfig {
            layout: self.layout,
            shape: self.shape(),
            profile: self.animation.to_profile(),
        }
    }
}

/// Top-level scene settings: two rows plus the split between them.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneSettings {
    pub top: RowSettings,
    pub bottom: RowSettings,
    /// Margin above, between and below the rows at full focused-card scale.
    pub row_margin: f32,
    /// Height kept free for controls at the bottom of the scene.
    pub controls_height: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            top: RowSettings::default(),
            bottom: RowSettings {
                max_visible_objects: scene::BOTTOM_VISIBLE_ITEMS,
                ..RowSettings::default()
            },
            row_margin: scene::ROW_MARGIN,
            controls_height: scene::CONTROLS_HEIGHT,
        }
    }
}

impl SceneSettings {
    pub fn to_scene_config(&self) -> SceneConfig {
        SceneConfig {
            top: self.top.to_row_config(),
            bottom: self.bottom.to_row_config(),
            row_margin: self.row_margin,
            controls_height: self.controls_height,
        }
    }

    /// Load scene settings using environment variables.
    /// Evaluation order:
    /// 1) `$ETHER_SCENE_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$ETHER_SCENE_CONFIG_JSON` (inline JSON),
    /// 3) the first default candidate file relative to the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, SceneSettingsSource)> {
        Self::load_from_env_in(Path::new(""))
    }

    /// As [`Self::load_from_env`], with default candidates resolved under
    /// `root`.
    pub fn load_from_env_in(
        root: &Path,
    ) -> anyhow::Result<(Self, SceneSettingsSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, SceneSettingsSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, SceneSettingsSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(root) {
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, SceneSettingsSource::File(path)));
        }

        Ok((Self::default(), SceneSettingsSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read scene settings from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid scene settings {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid scene settings {}: {}",
                        path.display(),
                        err
                    )
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse scene settings {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid scene settings json: {err}"))
    }

    pub fn find_default_file(root: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ether_core::carousel::ArcOpening;

    #[test]
    fn defaults_match_core_constants() {
        let settings = SceneSettings::default();
        let config = settings.to_scene_config();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(settings.top.animation.to_profile(), AnimationProfile::default());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings = SceneSettings::parse_from_str(
            r#"
                row_margin = 40.0

                [top]
                max_visible_objects = 7

                [top.layout]
                kind = "arc"
                opening = "down"

                [bottom.animation]
                duration_ms = 120
                position_easing = "linear"
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(settings.row_margin, 40.0);
        assert_eq!(settings.top.max_visible_objects, 7);
        assert_eq!(
            settings.top.layout,
            LayoutKind::Arc {
                opening: ArcOpening::Down
            }
        );
        assert_eq!(settings.top.scale_factor, shape::SCALE_FACTOR);
        assert_eq!(settings.bottom.animation.duration_ms, 120);
        assert_eq!(settings.bottom.animation.position_easing, EasingKind::Linear);
        assert_eq!(
            settings.bottom.animation.opacity_easing,
            EasingKind::InQuad
        );
    }

    #[test]
    fn json_is_accepted_when_toml_fails() {
        let settings = SceneSettings::parse_from_str(
            r#"{"top": {"layout": {"kind": "linear", "anchor": "bottom"}}}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(
            settings.top.layout,
            LayoutKind::Linear {
                anchor: LinearAnchor::Bottom
            }
        );
    }

    #[test]
    fn garbage_reports_both_parsers() {
        let err = SceneSettings::parse_from_str("[[[", "broken.cfg")
            .unwrap_err()
            .to_string();
        assert!(err.contains("broken.cfg"));
        assert!(err.contains("toml error"));
        assert!(err.contains("json error"));
    }
}
