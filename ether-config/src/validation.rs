use thiserror::Error;

use super::models::{RowSettings, SceneSettings};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("{row}.scale_factor must be a positive finite number, got {value}")]
    InvalidScaleFactor { row: &'static str, value: f32 },
    #[error("{row} card size {width}x{height} must be finite and non-negative")]
    InvalidCardSize {
        row: &'static str,
        width: f32,
        height: f32,
    },
    #[error("{row}.max_visible_objects must be at least 1")]
    EmptyWindow { row: &'static str },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f32 },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn apply_guard_rails(
    settings: &SceneSettings,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    check_row("top", &settings.top, &mut warnings)?;
    check_row("bottom", &settings.bottom, &mut warnings)?;

    finite("row_margin", settings.row_margin)?;
    finite("controls_height", settings.controls_height)?;
    if settings.row_margin < 0.0 {
        warnings.push("row_margin is negative; rows will overlap");
    }
    if settings.controls_height < 0.0 {
        warnings.push("controls_height is negative and will be ignored");
    }

    Ok(warnings)
}

fn check_row(
    row: &'static str,
    settings: &RowSettings,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if !settings.scale_factor.is_finite() || settings.scale_factor <= 0.0 {
        return Err(ConfigGuardRailError::InvalidScaleFactor {
            row,
            value: settings.scale_factor,
        });
    }

    let (width, height) = (settings.card_width, settings.card_height);
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0
    {
        return Err(ConfigGuardRailError::InvalidCardSize { row, width, height });
    }

    if settings.max_visible_objects == 0 {
        return Err(ConfigGuardRailError::EmptyWindow { row });
    }

    finite(&format!("{row}.opacity_factor"), settings.opacity_factor)?;
    finite(&format!("{row}.max_gap"), settings.max_gap)?;

    if settings.scale_factor > 1.0 {
        warnings.push_with_hint(
            format!("{row}.scale_factor is above 1; neighbours will grow away from focus"),
            "Use a value in (0, 1] to keep the focused card largest",
        );
    }
    if settings.max_visible_objects % 2 == 0 {
        warnings.push_with_hint(
            format!(
                "{row}.max_visible_objects is even ({}); the extra slot sits right of focus",
                settings.max_visible_objects
            ),
            "Use an odd count for a symmetric window",
        );
    }
    if settings.max_gap < 0.0 {
        warnings.push(format!("{row}.max_gap is negative; slots will touch"));
    }

    Ok(())
}

fn finite(field: &str, value: f32) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&SceneSettings::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn rejects_non_positive_scale_factor() {
        let mut settings = SceneSettings::default();
        settings.bottom.scale_factor = 0.0;
        assert_eq!(
            apply_guard_rails(&settings).unwrap_err(),
            ConfigGuardRailError::InvalidScaleFactor {
                row: "bottom",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_empty_window_and_negative_cards() {
        let mut settings = SceneSettings::default();
        settings.top.max_visible_objects = 0;
        assert_eq!(
            apply_guard_rails(&settings).unwrap_err(),
            ConfigGuardRailError::EmptyWindow { row: "top" }
        );

        let mut settings = SceneSettings::default();
        settings.top.card_height = -1.0;
        assert!(matches!(
            apply_guard_rails(&settings),
            Err(ConfigGuardRailError::InvalidCardSize { row: "top", .. })
        ));
    }

    #[test]
    fn warns_on_growing_scale_and_even_window() {
        let mut settings = SceneSettings::default();
        settings.top.scale_factor = 1.2;
        settings.bottom.max_visible_objects = 4;
        let warnings = apply_guard_rails(&settings).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.items.iter().all(|w| w.hint.is_some()));
    }
}
