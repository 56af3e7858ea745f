use bead_convert::{DetailBoost, ResizeMode, Rgb};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Pipeline execution settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Knob values used when a request omits them
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Shared locked palette
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Where the conversion pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Blocking thread pool, with progress events
    #[default]
    Worker,
    /// Caller's thread, no progress
    Inline,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Worker => f.write_str("worker"),
            Strategy::Inline => f.write_str("inline"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub strategy: Strategy,

    /// Retry a failed worker run once on the inline strategy
    #[serde(default = "default_retry")]
    pub retry_with_fallback: bool,
}

fn default_retry() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            retry_with_fallback: default_retry(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default = "default_dimension")]
    pub target_width: usize,

    #[serde(default = "default_dimension")]
    pub target_height: usize,

    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    #[serde(default)]
    pub detail_boost: DetailBoost,

    #[serde(default)]
    pub resize_mode: ResizeMode,

    #[serde(default)]
    pub dithering: bool,

    #[serde(default)]
    pub auto_template: bool,
}

fn default_dimension() -> usize {
    32
}

fn default_max_colors() -> usize {
    6
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target_width: default_dimension(),
            target_height: default_dimension(),
            max_colors: default_max_colors(),
            detail_boost: DetailBoost::default(),
            resize_mode: ResizeMode::default(),
            dithering: false,
            auto_template: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PaletteConfig {
    /// Hex colors used when a request asks for the lock without its own list
    #[serde(default)]
    pub locked: Option<Vec<String>>,
}

impl PaletteConfig {
    /// Remove locked entries that are not `#RRGGBB` colors.
    ///
    /// A list with nothing valid left is treated as unset.
    fn drop_invalid_colors(&mut self) {
        let Some(colors) = self.locked.take() else {
            return;
        };

        let valid: Vec<String> = colors
            .into_iter()
            .filter(|color| match Rgb::from_str(color) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(%color, %e, "Ignoring invalid locked palette color");
                    false
                }
            })
            .collect();

        self.locked = (!valid.is_empty()).then_some(valid);
    }
}

impl AppConfig {
    /// Load configuration from the `CONFIG_FILE` path, if set.
    pub fn from_env() -> Self {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load(Some(Path::new(&path))),
            Err(_) => Self::load(None),
        }
    }

    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let mut config: Self = config;
                    config.palette.drop_invalid_colors();
                    tracing::info!(
                        path = %path.display(),
                        strategy = %config.pipeline.strategy,
                        locked_colors = config.palette.locked.as_ref().map_or(0, Vec::len),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
