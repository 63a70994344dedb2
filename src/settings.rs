use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use crate::timer::DEFAULT_TICK_INTERVAL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    pub tick_interval_ms: u64,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
        }
    }
}

impl CountdownSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// chrono format strings used when a class time is shown as an absolute date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub date_format: String,
    pub time_format: String,
    pub date_time_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: "%m/%d/%Y".into(),
            time_format: "%I:%M %p".into(),
            date_time_format: "%b %-d, %Y, %I:%M %p".into(),
        }
    }
}

impl DisplaySettings {
    /// Rejects any format chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        check_format("date_format", &self.date_format)?;
        check_format("time_format", &self.time_format)?;
        check_format("date_time_format", &self.date_time_format)
    }
}

fn check_format(field: &str, format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid {field} '{format}'");
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    countdown: CountdownSettings,
    display: DisplaySettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let mut data: UserSettings = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring unreadable settings at {}: {err}",
                    path.display()
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        if let Err(err) = data.display.validate() {
            log::warn!("Ignoring display settings at {}: {err}", path.display());
            data.display = DisplaySettings::default();
        }

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn countdown(&self) -> CountdownSettings {
        self.read().countdown.clone()
    }

    pub fn display(&self) -> DisplaySettings {
        self.read().display.clone()
    }

    pub fn update_countdown(&self, settings: CountdownSettings) -> Result<()> {
        let mut guard = self.write();
        guard.countdown = settings;
        self.persist(&guard)
    }

    pub fn update_display(&self, settings: DisplaySettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.write();
        guard.display = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
