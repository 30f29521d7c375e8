pub mod error;

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::models::{SceneSettings, SceneSettingsSource};
use crate::validation::{self, ConfigWarnings};
use error::ConfigLoadError;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    /// Explicit settings file; takes precedence over the environment.
    pub config_path: Option<PathBuf>,
    /// `.env` file to load instead of the default lookup.
    pub env_file: Option<PathBuf>,
    /// Directory the default candidate files are resolved against.
    pub search_root: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_search_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.options.search_root = Some(root.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let (settings, source) = match &self.options.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig {
                        path: path.clone(),
                    });
                }
                let settings = SceneSettings::load_from_file(path)
                    .map_err(ConfigLoadError::Settings)?;
                (settings, SceneSettingsSource::File(path.clone()))
            }
            None => {
                let root = self.options.search_root.clone().unwrap_or_default();
                SceneSettings::load_from_env_in(&root)
                    .map_err(ConfigLoadError::Settings)?
            }
        };
        debug!(%source, env_file_loaded, "scene settings loaded");

        let warnings = validation::apply_guard_rails(&settings)?;
        for warning in &warnings.items {
            warn!(hint = warning.hint.as_deref(), "{}", warning.message);
        }

        Ok(ConfigLoad {
            settings,
            source,
            warnings,
            env_file_loaded,
        })
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub settings: SceneSettings,
    pub source: SceneSettingsSource,
    pub warnings: ConfigWarnings,
    pub env_file_loaded: bool,
}
