//! Configuration for Ether carousel scenes.
//!
//! Settings come from, in order: `$ETHER_SCENE_CONFIG_PATH`,
//! `$ETHER_SCENE_CONFIG_JSON`, the first default file found
//! (`ether.toml`, `ether.json`, `config/ether.toml`, `config/ether.json`),
//! and finally the compiled defaults in `ether_core::constants`.
//! [`ConfigLoader`] adds `.env` handling and guard rails on top.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::{
    AnimationSettings, RowSettings, SceneSettings, SceneSettingsSource,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
