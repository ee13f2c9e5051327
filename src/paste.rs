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

//! Pasted-text ingestion
//!
//! Turns whitespace-separated columns copied from a spreadsheet into sparse
//! profile rows. Each non-blank line is one point:
//!
//! ```text
//! time mode:      <temp> <minutes> <seconds>    or   <temp>
//! interval mode:  <temp> <interval seconds>     or   <temp>
//! ```
//!
//! Lines that do not fit are skipped; they still use up their point index.

use crate::profile::{InputMode, SparseProfile, SparseRow};

/// Parsed rows plus the point indices of lines that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub rows: SparseProfile,
    pub skipped: Vec<usize>,
}

pub fn parse(text: &str, mode: InputMode) -> SparseProfile {
    parse_lines(text, mode).rows
}

pub fn parse_lines(text: &str, mode: InputMode) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    for (point, line) in lines.enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match parse_tokens(&tokens, mode) {
            Some(row) => outcome.rows.insert(point, row),
            None => outcome.skipped.push(point),
        }
    }
    outcome
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}

fn parse_tokens(tokens: &[&str], mode: InputMode) -> Option<SparseRow> {
    match (mode, tokens) {
        (InputMode::Time, [value]) => Some(SparseRow {
            value: parse_value(value)?,
            minutes: Some(0),
            seconds: Some(0),
            interval_seconds: None,
        }),
        (InputMode::Time, [value, minutes, seconds, ..]) => Some(SparseRow {
            value: parse_value(value)?,
            minutes: Some(parse_int(minutes)?),
            seconds: Some(parse_int(seconds)?),
            interval_seconds: None,
        }),
        (InputMode::Interval, [value]) => Some(SparseRow {
            value: parse_value(value)?,
            minutes: None,
            seconds: None,
            interval_seconds: None,
        }),
        (InputMode::Interval, [value, interval, ..]) => Some(SparseRow {
            value: parse_value(value)?,
            minutes: None,
            seconds: None,
            interval_seconds: Some(parse_int(interval)?),
        }),
        // time mode with two tokens is ambiguous
        _ => None,
    }
}
