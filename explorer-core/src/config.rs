//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver (directories only)
//!
//! Manages the user-editable settings of the explorer: search debounce and
//! display limits, view-mode defaults, index roots and logging. Loads and
//! saves settings as TOML from the proper cross-platform config path using the
//! [`directories`](https://docs.rs/directories) crate.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::model::view_mode::ViewMode;

/// Search controller and result list tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period between the last keystroke and the remote query
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,

    /// Ranked results shown before "show more"
    pub display_limit: usize,

    /// Directory paths longer than this are shortened for display
    pub max_path_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            display_limit: 10,
            max_path_len: 60,
        }
    }
}

/// View projector defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Mode selected at startup
    pub default_mode: ViewMode,

    /// List view switches to two-column cards above this many items
    pub list_compact_threshold: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_mode: ViewMode::Normal,
            list_compact_threshold: 15,
        }
    }
}

/// Roots walked by the local index service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// Empty means "the user's home directory"
    pub roots: Vec<PathBuf>,
}

/// Log file placement and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,

    pub dir: PathBuf,

    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            file_prefix: "explorer".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/Explorer/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path).await?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(&path, toml_str).await?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    fn project_dirs() -> anyhow::Result<ProjectDirs> {
        ProjectDirs::from("org", "explorer", "Explorer")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))
    }
}
