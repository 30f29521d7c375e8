use std::fs;
use std::path::Path;
use std::sync::Mutex;

use ether_config::models::scene::{CONFIG_JSON_ENV, CONFIG_PATH_ENV};
use ether_config::{
    ConfigGuardRailError, ConfigLoadError, ConfigLoader, SceneSettings,
    SceneSettingsSource,
};
use tempfile::TempDir;

// Process environment is shared between test threads.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    unsafe {
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var(CONFIG_JSON_ENV);
    }
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new()
        .with_env_file(dir.path().join("missing.env"))
        .with_search_root(dir.path())
}

#[test]
fn explicit_file_wins() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "scene.toml", "row_margin = 12.0\n");

    let load = loader(&dir).with_config_path(&path).load().unwrap();
    assert_eq!(load.source, SceneSettingsSource::File(path));
    assert_eq!(load.settings.row_margin, 12.0);
    assert!(!load.env_file_loaded);
    assert!(load.warnings.is_empty());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = loader(&dir)
        .with_config_path(dir.path().join("nope.toml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn guard_rails_reject_bad_settings() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "scene.json",
        r#"{"top": {"max_visible_objects": 0}}"#,
    );
    let err = loader(&dir).with_config_path(path).load().unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::EmptyWindow { row: "top" })
    ));
}

#[test]
fn env_path_beats_inline_json() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "env.toml", "controls_height = 10.0\n");
    unsafe {
        std::env::set_var(CONFIG_PATH_ENV, &path);
        std::env::set_var(CONFIG_JSON_ENV, r#"{"controls_height": 99.0}"#);
    }

    let result = SceneSettings::load_from_env_in(dir.path());
    clear_env();

    let (settings, source) = result.unwrap();
    assert_eq!(source, SceneSettingsSource::EnvPath(path));
    assert_eq!(settings.controls_height, 10.0);
}

#[test]
fn inline_json_beats_default_files() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ether.toml", "controls_height = 1.0\n");
    unsafe {
        std::env::set_var(CONFIG_JSON_ENV, r#"{"controls_height": 99.0}"#);
    }

    let result = SceneSettings::load_from_env_in(dir.path());
    clear_env();

    let (settings, source) = result.unwrap();
    assert_eq!(source, SceneSettingsSource::EnvInline);
    assert_eq!(settings.controls_height, 99.0);
}

#[test]
fn invalid_inline_json_names_the_variable() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = TempDir::new().unwrap();
    unsafe {
        std::env::set_var(CONFIG_JSON_ENV, "{not json");
    }

    let result = SceneSettings::load_from_env_in(dir.path());
    clear_env();

    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains(CONFIG_JSON_ENV));
}

#[test]
fn default_candidates_then_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = TempDir::new().unwrap();

    let (settings, source) = SceneSettings::load_from_env_in(dir.path()).unwrap();
    assert_eq!(source, SceneSettingsSource::Default);
    assert_eq!(settings, SceneSettings::default());

    let nested = write(
        dir.path(),
        "config/ether.json",
        r#"{"row_margin": 30.0}"#,
    );
    let (settings, source) = SceneSettings::load_from_env_in(dir.path()).unwrap();
    assert_eq!(source, SceneSettingsSource::File(nested));
    assert_eq!(settings.row_margin, 30.0);

    let top_level = write(dir.path(), "ether.toml", "row_margin = 20.0\n");
    let (settings, source) = SceneSettings::load_from_env_in(dir.path()).unwrap();
    assert_eq!(source, SceneSettingsSource::File(top_level));
    assert_eq!(settings.row_margin, 20.0);
}

#[test]
fn env_file_feeds_the_environment() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = TempDir::new().unwrap();
    let env_file = write(
        dir.path(),
        ".env",
        &format!("{CONFIG_JSON_ENV}='{{\"row_margin\": 5.0}}'\n"),
    );

    let result = ConfigLoader::new()
        .with_env_file(env_file)
        .with_search_root(dir.path())
        .load();
    clear_env();

    let load = result.unwrap();
    assert!(load.env_file_loaded);
    assert_eq!(load.source, SceneSettingsSource::EnvInline);
    assert_eq!(load.settings.row_margin, 5.0);
}
