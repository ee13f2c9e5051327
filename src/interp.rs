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

//! Point-in-time lookup on normalized profiles
//!
//! Linear interpolation by elapsed seconds. Queries before the first point
//! take the first value; queries past the last point of a profile yield
//! [`Reading::NoData`] rather than an extrapolation.

use crate::profile::Profile;

/// Interpolated values at one moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub temperature: f64,
    pub ror: Option<f64>,
    pub fan: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Query lies past the end of the profile
    NoData,
    At(Sample),
}

/// `(elapsed seconds, value)` for every row with both.
pub fn value_series(profile: &Profile) -> Vec<(f64, f64)> {
    profile
        .rows
        .iter()
        .filter_map(|r| Some((r.cumulative_seconds?, r.value?)))
        .collect()
}

/// `(elapsed seconds, ror)` for every row with time, value and a rate of rise.
pub fn ror_series(profile: &Profile) -> Vec<(f64, f64)> {
    profile
        .rows
        .iter()
        .filter(|r| r.value.is_some())
        .filter_map(|r| Some((r.cumulative_seconds?, r.ror?)))
        .collect()
}

/// Piecewise-linear interpolation over points sorted by `x`, clamped at both ends.
pub fn interp_linear(points: &[(f64, f64)], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x <= first.0 {
        return Some(first.1);
    }
    if x >= last.0 {
        return Some(last.1);
    }
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        if x >= a.0 && x <= b.0 {
            let span = b.0 - a.0;
            if span <= 0.0 {
                return Some(a.1);
            }
            let t = (x - a.0) / span;
            return Some(a.1 + t * (b.1 - a.1));
        }
    }
    Some(last.1)
}

fn series_max(points: &[(f64, f64)]) -> Option<f64> {
    points.iter().map(|p| p.0).reduce(f64::max)
}

/// Temperature and rate of rise at `query_seconds`.
///
/// `None` when the profile has fewer than two timed points.
pub fn interpolate(profile: &Profile, query_seconds: f64) -> Option<Reading> {
    let values = value_series(profile);
    if values.len() < 2 {
        return None;
    }
    let max_time = series_max(&values)?;
    if query_seconds > max_time {
        return Some(Reading::NoData);
    }
    let temperature = interp_linear(&values, query_seconds)?;
    let ror = interp_linear(&ror_series(profile), query_seconds);
    Some(Reading::At(Sample { temperature, ror, fan: None }))
}

/// Fan percentage at `query_seconds`, or `None` past the end or with fewer than two points.
pub fn interpolate_fan(fan: &Profile, query_seconds: f64) -> Option<f64> {
    let values = value_series(fan);
    if values.len() < 2 || query_seconds > series_max(&values)? {
        return None;
    }
    interp_linear(&values, query_seconds)
}

/// Full detail-panel lookup: temperature, rate of rise and the paired fan channel.
pub fn lookup(profile: &Profile, fan: Option<&Profile>, query_seconds: f64) -> Option<Reading> {
    match interpolate(profile, query_seconds)? {
        Reading::NoData => Some(Reading::NoData),
        Reading::At(sample) => Some(Reading::At(Sample {
            fan: fan.and_then(|f| interpolate_fan(f, query_seconds)),
            ..sample
        })),
    }
}
