use std::path::PathBuf;

/// Engine options (pure Rust, no config files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Record the game in the in-memory log.
    pub logging: bool,

    /// Also record selections and rejected requests.
    pub advanced_logging: bool,

    /// Directory `save_log` writes into.
    pub log_dir: PathBuf,
}

impl EngineConfig {
    pub fn new(logging: bool, advanced_logging: bool, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            logging,
            advanced_logging,
            log_dir: log_dir.into(),
        }
    }

    /// No logging at all.
    pub fn quiet() -> Self {
        Self {
            logging: false,
            advanced_logging: false,
            ..Self::default()
        }
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_advanced_logging(mut self, advanced: bool) -> Self {
        self.advanced_logging = advanced;
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logging: true,
            advanced_logging: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}
