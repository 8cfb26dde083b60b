use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Tracker configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NavConfig {
    pub tracking: TrackingConfig,
    pub viewport: ViewportConfig,
    pub debounce: DebounceConfig,
    pub storage: StorageConfig,
}

/// Section tracking configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TrackingConfig {
    /// Section id reported when no section matches the scroll position
    pub default_section: String,
    /// Maximum navigation history entries before FIFO eviction
    pub history_max: usize,
    /// How far below the viewport top a section counts as active (px)
    pub section_offset: f64,
}

/// Viewport thresholds
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ViewportConfig {
    /// Scroll offset past which the navbar collapses (px)
    pub navbar_threshold: f64,
    /// Viewport width at or below which the layout is mobile (px)
    pub mobile_breakpoint: f64,
}

/// Quiet periods for bursty event sources
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DebounceConfig {
    pub scroll_ms: u64,
    pub resize_ms: u64,
}

/// Storage key names and limits
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub last_valid_section_key: String,
    pub history_key: String,
    pub language_key: String,
    pub error_log_key: String,
    /// Maximum persisted error records before FIFO eviction
    pub error_log_max: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            tracking: TrackingConfig {
                default_section: "home".to_string(),
                history_max: 10,
                section_offset: 100.0,
            },
            viewport: ViewportConfig {
                navbar_threshold: 50.0,
                mobile_breakpoint: 991.0,
            },
            debounce: DebounceConfig {
                scroll_ms: 10,
                resize_ms: 100,
            },
            storage: StorageConfig {
                last_valid_section_key: "last-valid-section".to_string(),
                history_key: "navigation-history".to_string(),
                language_key: "preferred-language".to_string(),
                error_log_key: "navigation-error-log".to_string(),
                error_log_max: 50,
            },
        }
    }
}

impl NavConfig {
    pub fn scroll_quiet(&self) -> Duration {
        Duration::from_millis(self.debounce.scroll_ms)
    }

    pub fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.debounce.resize_ms)
    }

    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "navtrack") {
            return Some(proj_dirs.config_dir().join("config.toml"));
        }
        None
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<NavConfig>(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            log::warn!("failed to parse config file, using defaults: {e}");
                        }
                    },
                    Err(e) => {
                        log::warn!("failed to read config file, using defaults: {e}");
                    }
                }
            }
        }
        NavConfig::default()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }
}
