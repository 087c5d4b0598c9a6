use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textarea_bridge_engine::a11y::{DEFAULT_LINES_PER_PAGE, DEFAULT_MAX_CHARS};
use textarea_bridge_engine::{DeduceOptions, InputTracker, PagedScreenReaderStrategy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paging: PagingConfig,
    pub input: InputConfig,
}

/// How much of the document is pushed into the widget for screen readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub lines_per_page: usize,
    /// Cap on the text kept before and after the selection, in UTF-16 units
    pub max_chars: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Treat single graphemes inserted away from the caret as pure insertions
    pub stray_insertion_fallback: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            stray_insertion_fallback: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/textarea-bridge");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn paging_strategy(&self) -> PagedScreenReaderStrategy {
        PagedScreenReaderStrategy::new(self.paging.lines_per_page, self.paging.max_chars)
    }

    pub fn deduce_options(&self) -> DeduceOptions {
        DeduceOptions {
            stray_insertion_fallback: self.input.stray_insertion_fallback,
        }
    }

    pub fn input_tracker(&self) -> InputTracker {
        InputTracker::new(self.deduce_options(), self.paging_strategy())
    }
}
