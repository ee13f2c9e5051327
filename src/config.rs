/*
 * This file is part of Roastcurve.
 *
 * Copyright (C) 2025 Roastcurve contributors
 *
 * Roastcurve is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Roastcurve is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Roastcurve. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{chart, limits, rows, session};
use crate::error::{Result, RoastError};
use crate::profile::{InputMode, Profile, ProfileKind, ProfileRow};
use crate::session::{ProfileEntry, ProfileSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Default axis ranges handed to the chart renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartSettings {
    #[serde(default = "default_temp_axis")]
    pub temperature: AxisRange,
    #[serde(default = "default_ror_axis")]
    pub ror: AxisRange,
    #[serde(default = "default_time_axis")]
    pub time: AxisRange,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            temperature: default_temp_axis(),
            ror: default_ror_axis(),
            time: default_time_axis(),
        }
    }
}

fn default_temp_axis() -> AxisRange { AxisRange::new(chart::TEMP_MIN_C, chart::TEMP_MAX_C) }
fn default_ror_axis() -> AxisRange { AxisRange::new(chart::ROR_MIN, chart::ROR_MAX) }
fn default_time_axis() -> AxisRange { AxisRange::new(chart::TIME_MIN_S, chart::TIME_MAX_S) }
fn default_max_profiles() -> usize { limits::MAX_PROFILES }
fn default_initial_profiles() -> usize { limits::INITIAL_PROFILES }
fn default_temperature_rows() -> usize { rows::TEMPERATURE }
fn default_fan_rows() -> usize { rows::FAN }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_max_profiles")]
    pub max_profiles: usize,
    #[serde(default = "default_initial_profiles")]
    pub initial_profiles: usize,
    #[serde(default = "default_temperature_rows")]
    pub temperature_rows: usize,
    #[serde(default = "default_fan_rows")]
    pub fan_rows: usize,
    #[serde(default)]
    pub chart: ChartSettings,
    /// Append JSON event lines to `log_path` (or the default log file)
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_profiles: default_max_profiles(),
            initial_profiles: default_initial_profiles(),
            temperature_rows: default_temperature_rows(),
            fan_rows: default_fan_rows(),
            chart: ChartSettings::default(),
            logging: false,
            log_path: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("roastcurve");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config").join("roastcurve");
    }
    PathBuf::from("/etc/roastcurve")
}

pub fn config_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn validate_settings(s: &Settings) -> std::result::Result<(), String> {
    if s.max_profiles == 0 || s.max_profiles > limits::MAX_PROFILES_CEILING {
        return Err(format!("max_profiles must be 1..={}", limits::MAX_PROFILES_CEILING));
    }
    if s.initial_profiles > s.max_profiles {
        return Err("initial_profiles exceeds max_profiles".into());
    }
    if s.temperature_rows < 2 || s.temperature_rows > rows::MAX_CONFIGURABLE {
        return Err(format!("temperature_rows must be 2..={}", rows::MAX_CONFIGURABLE));
    }
    if s.fan_rows < 2 || s.fan_rows > rows::MAX_CONFIGURABLE {
        return Err(format!("fan_rows must be 2..={}", rows::MAX_CONFIGURABLE));
    }
    for (axis, range) in [("temperature", &s.chart.temperature), ("ror", &s.chart.ror), ("time", &s.chart.time)] {
        if !range.is_valid() {
            return Err(format!("invalid {} axis range", axis));
        }
    }
    Ok(())
}

/// Settings from the default location, or defaults when missing or invalid.
pub fn load_settings() -> Settings {
    try_load_settings(&config_path()).unwrap_or_default()
}

pub fn try_load_settings(path: &Path) -> Result<Settings> {
    let data = fs::read_to_string(path).map_err(|source| RoastError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = serde_json::from_str(&data)?;
    validate_settings(&settings).map_err(RoastError::InvalidSettings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    validate_settings(settings).map_err(RoastError::InvalidSettings)?;
    write_json(path, settings)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| RoastError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| RoastError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Session exchange file
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedProfile {
    pub name: String,
    #[serde(default)]
    pub mode: InputMode,
    pub rows: Vec<ProfileRow>,
    #[serde(default)]
    pub fan_mode: InputMode,
    /// Present once a fan profile was created for this entry
    #[serde(default)]
    pub fan_rows: Option<Vec<ProfileRow>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionFile {
    pub version: u8,
    pub profiles: Vec<SavedProfile>,
}

impl SessionFile {
    pub fn from_set(set: &ProfileSet) -> Self {
        Self {
            version: session::FORMAT_VERSION,
            profiles: set
                .entries()
                .iter()
                .map(|e| SavedProfile {
                    name: e.name.clone(),
                    mode: e.mode,
                    rows: e.profile.rows.clone(),
                    fan_mode: e.fan_mode,
                    fan_rows: e.fan.as_ref().map(|f| f.rows.clone()),
                })
                .collect(),
        }
    }

    pub fn into_set(self, settings: &Settings) -> Result<ProfileSet> {
        validate_session(&self, settings).map_err(RoastError::InvalidSession)?;
        let entries = self
            .profiles
            .into_iter()
            .map(|p| ProfileEntry {
                name: p.name,
                mode: p.mode,
                profile: Profile::from_rows(ProfileKind::Temperature, p.rows),
                fan_mode: p.fan_mode,
                fan: p.fan_rows.map(|rows| Profile::from_rows(ProfileKind::Fan, rows)),
            })
            .collect();
        ProfileSet::from_entries(settings, entries)
    }
}

pub fn validate_session(file: &SessionFile, settings: &Settings) -> std::result::Result<(), String> {
    if file.version == 0 {
        return Err("version must be >= 1".into());
    }
    if file.version > session::FORMAT_VERSION {
        return Err(format!("unsupported version {}", file.version));
    }
    if file.profiles.len() > settings.max_profiles {
        return Err(format!("too many profiles (max {})", settings.max_profiles));
    }
    for p in &file.profiles {
        if p.name.trim().is_empty() {
            return Err("profile name cannot be empty".into());
        }
        if p.rows.is_empty() || p.rows.len() > settings.temperature_rows {
            return Err(format!(
                "profile '{}' must have 1..={} rows",
                p.name, settings.temperature_rows
            ));
        }
        if let Some(fan) = &p.fan_rows {
            if fan.is_empty() || fan.len() > settings.fan_rows {
                return Err(format!(
                    "fan profile '{}' must have 1..={} rows",
                    p.name, settings.fan_rows
                ));
            }
        }
        let cells = p.rows.iter().chain(p.fan_rows.iter().flatten());
        for r in cells {
            if r.value.is_some_and(|v| !v.is_finite()) {
                return Err(format!("profile '{}' has a non-finite value", p.name));
            }
            if r.cumulative_seconds.is_some_and(|t| !t.is_finite() || t < 0.0) {
                return Err(format!("profile '{}' has a negative or non-finite elapsed time", p.name));
            }
        }
    }
    Ok(())
}

pub fn load_session(path: &Path, settings: &Settings) -> Result<ProfileSet> {
    let data = fs::read_to_string(path).map_err(|source| RoastError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SessionFile = serde_json::from_str(&data)?;
    file.into_set(settings)
}

pub fn save_session(path: &Path, set: &ProfileSet) -> Result<()> {
    write_json(path, &SessionFile::from_set(set))
}
