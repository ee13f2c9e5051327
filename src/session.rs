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

//! Named profile sets for one editing session
//!
//! Each entry pairs a temperature profile with an optional fan profile and
//! remembers the input mode of both. Tables change only through an explicit
//! sync; charts and lookups read an [`Analysis`] snapshot that stays as it
//! was until the next [`ProfileSet::analyze`] call.

use serde_json::json;

use crate::config::Settings;
use crate::constants::{chart, limits};
use crate::error::{Result, RoastError};
use crate::interp::{self, Reading};
use crate::logger;
use crate::normalize::{normalize, normalize_fan};
use crate::paste;
use crate::profile::{InputMode, Profile, ProfileKind};
use crate::ror::compute_ror;

/// Normalize then derive the rate of rise.
pub fn sync_profile(table: &Profile, mode: InputMode) -> Profile {
    compute_ror(&normalize(table, mode))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub name: String,
    pub mode: InputMode,
    pub profile: Profile,
    pub fan_mode: InputMode,
    pub fan: Option<Profile>,
}

impl ProfileEntry {
    pub fn new(name: impl Into<String>, temperature_rows: usize) -> Self {
        Self {
            name: name.into(),
            mode: InputMode::default(),
            profile: Profile::with_capacity(ProfileKind::Temperature, temperature_rows),
            fan_mode: InputMode::default(),
            fan: None,
        }
    }

    /// Re-normalize the stored tables under their current modes.
    fn resync(&mut self) {
        self.profile = sync_profile(&self.profile, self.mode);
        if let Some(fan) = self.fan.as_ref() {
            self.fan = Some(normalize_fan(fan, self.fan_mode));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Stored profile replaced; `rows` is the length of its valid prefix
    Synced { rows: usize },
    /// Pasted text had no usable line; the stored profile was kept
    NothingParsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SetLimits {
    max_profiles: usize,
    temperature_rows: usize,
    fan_rows: usize,
}

impl From<&Settings> for SetLimits {
    fn from(s: &Settings) -> Self {
        Self {
            max_profiles: s.max_profiles,
            temperature_rows: s.temperature_rows,
            fan_rows: s.fan_rows,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileSet {
    entries: Vec<ProfileEntry>,
    limits: SetLimits,
    chartable: bool,
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RoastError::EmptyName);
    }
    if name.chars().count() > limits::MAX_NAME_LEN {
        return Err(RoastError::NameTooLong(name.to_string()));
    }
    Ok(())
}

impl ProfileSet {
    /// A set holding `initial_profiles` empty profiles named "Profile 1".."Profile N".
    pub fn new(settings: &Settings) -> Self {
        let mut set = Self::empty(settings);
        for i in 1..=settings.initial_profiles.min(settings.max_profiles) {
            set.entries.push(ProfileEntry::new(
                format!("{}{}", limits::PROFILE_NAME_PREFIX, i),
                set.limits.temperature_rows,
            ));
        }
        set
    }

    pub fn empty(settings: &Settings) -> Self {
        Self {
            entries: Vec::new(),
            limits: SetLimits::from(settings),
            chartable: false,
        }
    }

    /// Rebuild a set from stored entries, checking names and the profile limit.
    pub fn from_entries(settings: &Settings, entries: Vec<ProfileEntry>) -> Result<Self> {
        let mut set = Self::empty(settings);
        if entries.len() > set.limits.max_profiles {
            return Err(RoastError::TooManyProfiles { max: set.limits.max_profiles });
        }
        for entry in entries {
            check_name(&entry.name)?;
            if set.index_of(&entry.name).is_some() {
                return Err(RoastError::DuplicateName(entry.name));
            }
            set.chartable |= entry.profile.has_values();
            set.entries.push(entry);
        }
        Ok(set)
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_chartable(&self) -> bool {
        self.chartable
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ProfileEntry> {
        self.index_of(name).map(|i| &self.entries[i])
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut ProfileEntry> {
        match self.index_of(name) {
            Some(i) => Ok(&mut self.entries[i]),
            None => Err(RoastError::UnknownProfile(name.to_string())),
        }
    }

    /// "Profile N" with N one past the highest number already used.
    pub fn next_default_name(&self) -> String {
        let highest = self
            .entries
            .iter()
            .filter_map(|e| e.name.strip_prefix(limits::PROFILE_NAME_PREFIX))
            .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            .filter_map(|n| n.parse::<u64>().ok())
            .max();
        format!("{}{}", limits::PROFILE_NAME_PREFIX, highest.map_or(1, |n| n + 1))
    }

    /// Append an empty profile under the next default name.
    pub fn add_profile(&mut self) -> Result<String> {
        let name = self.next_default_name();
        self.add_named(&name)?;
        Ok(name)
    }

    pub fn add_named(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        if self.entries.len() >= self.limits.max_profiles {
            return Err(RoastError::TooManyProfiles { max: self.limits.max_profiles });
        }
        if self.index_of(name).is_some() {
            return Err(RoastError::DuplicateName(name.to_string()));
        }
        self.entries.push(ProfileEntry::new(name, self.limits.temperature_rows));
        logger::log_event("profile_added", json!({ "profile": name }));
        Ok(())
    }

    /// Rename in place; position, fan profile and modes are kept.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return self.entry_mut(old).map(|_| ());
        }
        check_name(new)?;
        if self.index_of(new).is_some() {
            return Err(RoastError::DuplicateName(new.to_string()));
        }
        self.entry_mut(old)?.name = new.to_string();
        logger::log_event("profile_renamed", json!({ "from": old, "to": new }));
        Ok(())
    }

    /// Drop a profile together with its fan profile.
    pub fn remove(&mut self, name: &str) -> Result<ProfileEntry> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| RoastError::UnknownProfile(name.to_string()))?;
        let entry = self.entries.remove(idx);
        logger::log_event("profile_removed", json!({ "profile": name }));
        Ok(entry)
    }

    pub fn set_mode(&mut self, name: &str, mode: InputMode) -> Result<()> {
        self.entry_mut(name)?.mode = mode;
        Ok(())
    }

    pub fn set_fan_mode(&mut self, name: &str, mode: InputMode) -> Result<()> {
        self.entry_mut(name)?.fan_mode = mode;
        Ok(())
    }

    /// The fan profile paired with `name`, created empty on first use.
    pub fn fan_profile_mut(&mut self, name: &str) -> Result<&mut Profile> {
        let fan_rows = self.limits.fan_rows;
        let entry = self.entry_mut(name)?;
        Ok(entry
            .fan
            .get_or_insert_with(|| Profile::with_capacity(ProfileKind::Fan, fan_rows)))
    }

    /// Replace the stored profile with `table` normalized under the entry's mode.
    pub fn sync_table(&mut self, name: &str, table: &Profile) -> Result<SyncOutcome> {
        let entry = self.entry_mut(name)?;
        let mode = entry.mode;
        entry.profile = sync_profile(table, mode);
        let rows = entry.profile.valid_length();
        self.chartable = true;
        logger::log_event(
            "profile_synced",
            json!({ "profile": name, "mode": mode.to_string(), "rows": rows }),
        );
        Ok(SyncOutcome::Synced { rows })
    }

    /// Parse pasted text under the entry's mode and sync it onto a fresh table.
    ///
    /// When no line parses the stored profile is left alone.
    pub fn sync_pasted(&mut self, name: &str, text: &str) -> Result<SyncOutcome> {
        let mode = self.entry_mut(name)?.mode;
        let outcome = paste::parse_lines(text, mode);
        if outcome.rows.is_empty() {
            logger::log_event(
                "paste_empty",
                json!({ "profile": name, "skipped": outcome.skipped.len() }),
            );
            return Ok(SyncOutcome::NothingParsed);
        }
        logger::log_event(
            "paste_parsed",
            json!({
                "profile": name,
                "accepted": outcome.rows.len(),
                "skipped": outcome.skipped.len(),
            }),
        );
        let table = Profile::with_capacity(ProfileKind::Temperature, self.limits.temperature_rows)
            .merged(&outcome.rows);
        self.sync_table(name, &table)
    }

    /// Fan counterpart of [`ProfileSet::sync_pasted`], parsed under the fan mode.
    pub fn sync_fan_pasted(&mut self, name: &str, text: &str) -> Result<SyncOutcome> {
        let mode = self.entry_mut(name)?.fan_mode;
        let outcome = paste::parse_lines(text, mode);
        if outcome.rows.is_empty() {
            logger::log_event("paste_empty", json!({ "profile": name, "fan": true }));
            return Ok(SyncOutcome::NothingParsed);
        }
        let table = Profile::with_capacity(ProfileKind::Fan, self.limits.fan_rows).merged(&outcome.rows);
        self.sync_fan_table(name, &table)
    }

    pub fn sync_fan_table(&mut self, name: &str, table: &Profile) -> Result<SyncOutcome> {
        let entry = self.entry_mut(name)?;
        let fan = normalize_fan(table, entry.fan_mode);
        let rows = fan.valid_length();
        entry.fan = Some(fan);
        logger::log_event("fan_synced", json!({ "profile": name, "rows": rows }));
        Ok(SyncOutcome::Synced { rows })
    }

    /// Re-run the sync pass over one profile and its fan table.
    pub fn resync(&mut self, name: &str) -> Result<()> {
        let entry = self.entry_mut(name)?;
        entry.resync();
        let (mode, rows) = (entry.mode, entry.profile.valid_length());
        self.chartable |= rows > 0;
        logger::log_event(
            "profile_synced",
            json!({ "profile": name, "mode": mode.to_string(), "rows": rows }),
        );
        Ok(())
    }

    /// Re-run the sync pass over every stored table, fan profiles included.
    pub fn resync_all(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.resync();
            self.chartable |= entry.profile.has_values();
        }
    }

    /// Snapshot for charting and lookups; available once anything was synced.
    pub fn analyze(&self) -> Result<Analysis> {
        if !self.chartable {
            return Err(RoastError::NothingSynced);
        }
        let profiles: Vec<ProfileAnalysis> = self
            .entries
            .iter()
            .map(|e| ProfileAnalysis {
                name: e.name.clone(),
                profile: compute_ror(&e.profile),
                fan: e.fan.clone(),
            })
            .collect();
        logger::log_event("analysis_refreshed", json!({ "profiles": profiles.len() }));
        Ok(Analysis { profiles })
    }
}

/// One profile inside an [`Analysis`] snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileAnalysis {
    pub name: String,
    pub profile: Profile,
    pub fan: Option<Profile>,
}

impl ProfileAnalysis {
    /// Temperature trace; empty when fewer than two points are timed.
    pub fn temperature_series(&self) -> Vec<(f64, f64)> {
        let series = interp::value_series(&self.profile);
        if series.len() > 1 {
            series
        } else {
            Vec::new()
        }
    }

    /// Rate-of-rise trace (row 0 has no rate of rise and is left out).
    pub fn ror_series(&self) -> Vec<(f64, f64)> {
        if self.temperature_series().is_empty() {
            return Vec::new();
        }
        interp::ror_series(&self.profile)
    }

    pub fn fan_series(&self) -> Vec<(f64, f64)> {
        self.fan.as_ref().map(interp::value_series).unwrap_or_default()
    }

    /// Total roast time, see [`Profile::max_time`].
    pub fn total_time(&self) -> Option<f64> {
        self.profile.max_time()
    }

    pub fn reading_at(&self, seconds: f64) -> Option<Reading> {
        interp::lookup(&self.profile, self.fan.as_ref(), seconds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    profiles: Vec<ProfileAnalysis>,
}

impl Analysis {
    pub fn profiles(&self) -> &[ProfileAnalysis] {
        &self.profiles
    }

    pub fn get(&self, name: &str) -> Option<&ProfileAnalysis> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Upper bound for the time selector: the longest profile with at least two timed rows.
    pub fn max_time(&self) -> f64 {
        self.profiles
            .iter()
            .filter(|p| p.profile.timed_len() > 1)
            .filter_map(|p| p.total_time())
            .reduce(f64::max)
            .unwrap_or(chart::FALLBACK_MAX_TIME_S)
    }

    /// `seconds` pulled into the time selector's range `0..=max_time()`.
    pub fn selector_time(&self, seconds: f64) -> f64 {
        seconds.max(0.0).min(self.max_time().max(0.0))
    }

    /// Detail-panel readings at `seconds` for every profile that can be interpolated.
    pub fn detail_at(&self, seconds: f64) -> Vec<(&str, Reading)> {
        self.profiles
            .iter()
            .filter_map(|p| p.reading_at(seconds).map(|r| (p.name.as_str(), r)))
            .collect()
    }
}
