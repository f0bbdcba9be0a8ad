//! Configuration file handling for the platonic greeting card.
//!
//! The config lives in `config.toml` under the platform config directory.
//! Every field is optional; anything missing falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::{info, warn};
use platonic_core::{AnimationSpeed, Tuning};
use serde::{Deserialize, Serialize};

/// Lowest accepted redraw rate.
pub const MIN_FPS: u32 = 5;
/// Highest accepted redraw rate.
pub const MAX_FPS: u32 = 120;
/// Upper bound on the particle count.
pub const MAX_PARTICLES: usize = 50_000;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene time scale.
    pub speed: AnimationSpeed,
    /// Redraw rate in frames per second.
    pub fps: u32,
    /// Number of snow particles.
    pub particle_count: usize,
    /// Capture the mouse so shapes react to hover.
    pub mouse: bool,
    /// Show the key help line.
    pub show_help: bool,
    /// Animation constants.
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: AnimationSpeed::default(),
            fps: 30,
            particle_count: 7000,
            mouse: true,
            show_help: true,
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    /// Platform project directories.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "cardinalcontor", "platonic")
    }

    /// Path of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the config from the default location, falling back to defaults
    /// when it is missing or broken.
    pub fn load() -> Self {
        match Self::default_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(err) => {
                warn!("using default config: {err}");
                Self::default()
            }
        }
    }

    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded config from {}", path.display());
        Ok(config.normalized())
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamp out-of-range values.
    pub fn normalized(mut self) -> Self {
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self.particle_count = self.particle_count.min(MAX_PARTICLES);
        self.tuning = self.tuning.normalized();
        self
    }

    /// Time between redraws.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.clamp(MIN_FPS, MAX_FPS)))
    }
}
