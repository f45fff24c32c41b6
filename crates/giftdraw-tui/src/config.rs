// Configuration loading and parsing (giftdraw.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use giftdraw_core::preview::DEFAULT_PREVIEW_SIZE;
use giftdraw_core::DrawStrategy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Name of the config file in every searched directory.
pub const CONFIG_FILE_NAME: &str = "giftdraw.toml";

/// Longest spin the config may ask for.
const MAX_SPIN_DURATION_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// giftdraw.toml structs
// ---------------------------------------------------------------------------

/// The assembled configuration. Every section and field is optional in the
/// file; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub draw: DrawConfig,
    pub animation: AnimationConfig,
}

/// `[draw]`: how receivers are chosen.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub strategy: DrawStrategy,
    /// Fixed RNG seed for reproducible draws. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl DrawConfig {
    /// RNG for a new game: seeded when `seed` is set, otherwise from entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                info!("Using fixed RNG seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        }
    }
}

/// `[animation]`: the spinning-names display before each commit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub spin_duration_ms: u64,
    pub preview_interval_ms: u64,
    pub preview_size: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            spin_duration_ms: 2000,
            preview_interval_ms: 100,
            preview_size: DEFAULT_PREVIEW_SIZE,
        }
    }
}

impl AnimationConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview_interval_ms)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Platform directories for giftdraw (config and log locations).
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "giftdraw")
}

/// Config files searched, in priority order, when no explicit path is given:
/// `<base_dir>/config/giftdraw.toml`, then the platform config directory.
pub fn default_config_paths(base_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![base_dir.join("config").join(CONFIG_FILE_NAME)];
    if let Some(dirs) = project_dirs() {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load and validate a config file that must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load the first config file found under `base_dir` or the platform config
/// directory, or defaults when none exists.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    match default_config_paths(base_dir).into_iter().find(|p| p.is_file()) {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Convenience wrapper: an explicit path must exist; otherwise search
/// relative to the current working directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let anim = &config.animation;

    if anim.preview_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "animation.preview_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if anim.preview_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "animation.preview_size".into(),
            message: "must be greater than 0".into(),
        });
    }

    if anim.spin_duration_ms > MAX_SPIN_DURATION_MS {
        return Err(ConfigError::ValidationError {
            field: "animation.spin_duration_ms".into(),
            message: format!(
                "must be at most {MAX_SPIN_DURATION_MS}, got {}",
                anim.spin_duration_ms
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
