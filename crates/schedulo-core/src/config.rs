//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! timezone = "America/New_York"
//! max_search_days = 90
//! dst_policy = "shift_forward"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::WallClock;
use crate::dst::DstPolicy;
use crate::error::{Result, ScheduleError};
use crate::freeday::DEFAULT_MAX_SEARCH_DAYS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone whose wall clock defines calendar days.
    pub timezone: String,
    /// Maximum number of days the free-day search will try.
    pub max_search_days: u32,
    pub dst_policy: DstPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            max_search_days: DEFAULT_MAX_SEARCH_DAYS,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_search_days == 0 {
            return Err(ScheduleError::Config(
                "max_search_days must be at least 1".to_string(),
            ));
        }
        self.clock().map(|_| ())
    }

    pub fn clock(&self) -> Result<WallClock> {
        WallClock::from_name(&self.timezone)
    }
}
