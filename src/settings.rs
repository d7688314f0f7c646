use ::config::{Config, Environment};
use serde::Deserialize;

use crate::error::StartupError;

pub const DEFAULT_CHUNK_SIZE: usize = 512;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;
pub const DEFAULT_TITLE_MAX_CHARS: usize = 100;

/// Tuning knobs read from `RANKER_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_title_max_chars() -> usize {
    DEFAULT_TITLE_MAX_CHARS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

impl Settings {
    /// Load from the environment (`RANKER_CHUNK_SIZE`, `RANKER_CHUNK_OVERLAP`,
    /// `RANKER_TITLE_MAX_CHARS`) and validate.
    pub fn from_env() -> Result<Self, StartupError> {
        let settings: Settings = Config::builder()
            .add_source(
                Environment::with_prefix("RANKER")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| StartupError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        if self.chunk_size == 0 {
            return Err(StartupError::InvalidSettings(
                "chunk_size must be greater than zero".into(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(StartupError::InvalidSettings(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}
