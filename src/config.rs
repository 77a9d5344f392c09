use std::path::Path;

use crate::error::ConfigError;
use crate::evaluator::Evaluator;
use crate::CELLS;

/// The deepest search that can be requested, one ply per empty tile
pub const MAX_DEPTH: usize = CELLS;

/// Settings for a computer player, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched beyond the candidate move; 0 evaluates each candidate statically
    pub depth: usize,
    /// Score a win found with more remaining depth higher, preferring faster wins
    pub win_depth_bonus: bool,
    /// Credit split open-three shapes on the bottom row at the three-in-a-row weight
    pub bottom_row_open_three: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 6,
            win_depth_bonus: false,
            bottom_row_open_three: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "depth must be at most {}",
                MAX_DEPTH
            )));
        }
        Ok(())
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator {
            bottom_row_open_three: self.bottom_row_open_three,
        }
    }
}
