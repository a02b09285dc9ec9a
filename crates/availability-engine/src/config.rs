//! Engine configuration, read from `~/.config/avail/config.toml`.
//!
//! Every field is optional in the file:
//!
//! ```toml
//! min_slot_minutes = 30
//! timezone = "Europe/Berlin"
//! lesson_minutes = 45
//! dst_policy = "shift_forward"
//! ```

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::dst::DstPolicy;
use crate::error::{AvailabilityError, Result};
use crate::validator::{SlotValidator, DEFAULT_MIN_SLOT_MINUTES};

const DEFAULT_LESSON_MINUTES: u32 = 60;

fn default_min_slot_minutes() -> u32 {
    DEFAULT_MIN_SLOT_MINUTES
}

fn default_lesson_minutes() -> u32 {
    DEFAULT_LESSON_MINUTES
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_min_slot_minutes")]
    pub min_slot_minutes: u32,

    /// IANA timezone for "today" and session projection. Host local time when unset.
    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(default = "default_lesson_minutes")]
    pub lesson_minutes: u32,

    #[serde(default)]
    pub dst_policy: DstPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_slot_minutes: DEFAULT_MIN_SLOT_MINUTES,
            timezone: None,
            lesson_minutes: DEFAULT_LESSON_MINUTES,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AvailabilityError::Config("Could not determine config directory".into()))?
            .join("avail");

        Ok(config_dir.join("config.toml"))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(raw).map_err(|e| AvailabilityError::Config(e.to_string()))?;
        config.timezone()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AvailabilityError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load the default config file, or defaults if there is none.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_default() -> Result<Self> {
        let Ok(path) = Self::config_path() else {
            tracing::debug!("no config directory, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn validator(&self) -> SlotValidator {
        SlotValidator::new(self.min_slot_minutes)
    }

    /// The configured timezone, parsed. `None` means host local time.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
            })
            .transpose()
    }
}
