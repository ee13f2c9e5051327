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

//! Roast profile tables
//!
//! A profile is an ordered table of time/value points. The primary value is a
//! temperature in °C for roast profiles and a percentage for fan profiles.
//! Rows after the last row carrying a value are placeholders.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::rows;

/// Which time columns the user types in; the other columns are derived.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Minutes and seconds per point
    #[default]
    Time,
    /// Seconds from each point to the next
    Interval,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Time => write!(f, "time"),
            InputMode::Interval => write!(f, "interval"),
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "t" => Ok(InputMode::Time),
            "interval" | "i" => Ok(InputMode::Interval),
            other => Err(format!("unknown input mode '{}' (expected time or interval)", other)),
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Temperature,
    Fan,
}

impl ProfileKind {
    pub fn default_rows(self) -> usize {
        match self {
            ProfileKind::Temperature => rows::TEMPERATURE,
            ProfileKind::Fan => rows::FAN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Position in the table, rewritten on every normalization pass
    #[serde(default)]
    pub point: usize,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub minutes: Option<i64>,
    #[serde(default)]
    pub seconds: Option<i64>,
    #[serde(default)]
    pub interval_seconds: Option<i64>,
    #[serde(default)]
    pub cumulative_seconds: Option<f64>,
    /// Rate of rise in °C/s; always absent on fan profiles
    #[serde(default)]
    pub ror: Option<f64>,
}

impl ProfileRow {
    pub fn placeholder(point: usize) -> Self {
        Self { point, ..Self::default() }
    }

    /// Row 0 of a new profile: anchored at 0:00.
    pub fn origin() -> Self {
        Self {
            point: 0,
            minutes: Some(0),
            seconds: Some(0),
            cumulative_seconds: Some(0.0),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub rows: Vec<ProfileRow>,
}

impl Profile {
    /// A new all-placeholder table at the default capacity for `kind`.
    pub fn empty(kind: ProfileKind) -> Self {
        Self::with_capacity(kind, kind.default_rows())
    }

    pub fn with_capacity(kind: ProfileKind, len: usize) -> Self {
        let rows = (0..len)
            .map(|i| if i == 0 { ProfileRow::origin() } else { ProfileRow::placeholder(i) })
            .collect();
        Self { kind, rows }
    }

    pub fn from_rows(kind: ProfileKind, rows: Vec<ProfileRow>) -> Self {
        Self { kind, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows from row 0 through the last row with a value; 0 when no row has one.
    pub fn valid_length(&self) -> usize {
        self.rows
            .iter()
            .rposition(|r| r.value.is_some())
            .map(|last| last + 1)
            .unwrap_or(0)
    }

    pub fn has_values(&self) -> bool {
        self.valid_length() > 0
    }

    /// Copy of this profile with the sparse rows written over it.
    ///
    /// Only cells present in the sparse row are overwritten. Points beyond the
    /// table are dropped.
    pub fn merged(&self, sparse: &SparseProfile) -> Profile {
        let mut out = self.clone();
        for (&point, cell) in sparse.iter() {
            let Some(row) = out.rows.get_mut(point) else { continue };
            row.value = Some(cell.value);
            if cell.minutes.is_some() {
                row.minutes = cell.minutes;
            }
            if cell.seconds.is_some() {
                row.seconds = cell.seconds;
            }
            if cell.interval_seconds.is_some() {
                row.interval_seconds = cell.interval_seconds;
            }
        }
        out
    }

    /// Total roast time: the largest elapsed time on any row.
    pub fn max_time(&self) -> Option<f64> {
        self.timed_rows().reduce(f64::max)
    }

    /// Number of rows carrying an elapsed time.
    pub fn timed_len(&self) -> usize {
        self.timed_rows().count()
    }

    fn timed_rows(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(|r| r.cumulative_seconds)
    }
}

/// One parsed line of pasted text
#[derive(Debug, Clone, PartialEq)]
pub struct SparseRow {
    pub value: f64,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub interval_seconds: Option<i64>,
}

/// Rows keyed by point index, as produced by the paste parser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseProfile {
    rows: BTreeMap<usize, SparseRow>,
}

impl SparseProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, point: usize, row: SparseRow) {
        self.rows.insert(point, row);
    }

    pub fn get(&self, point: usize) -> Option<&SparseRow> {
        self.rows.get(&point)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&usize, &SparseRow)> {
        self.rows.iter()
    }
}
