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

//! Conversions between clock times, interval durations and elapsed seconds.
//!
//! All values are whole seconds. Absent inputs count as zero and arithmetic
//! saturates instead of overflowing.

use crate::constants::SECONDS_PER_MINUTE;

pub fn to_cumulative_seconds(minutes: Option<i64>, seconds: Option<i64>) -> i64 {
    minutes
        .unwrap_or(0)
        .saturating_mul(SECONDS_PER_MINUTE)
        .saturating_add(seconds.unwrap_or(0))
}

/// Split elapsed seconds into `(minutes, seconds)`.
///
/// Negative totals floor towards negative infinity so that
/// `to_cumulative_seconds` always inverts this.
pub fn seconds_to_minutes_seconds(total_seconds: i64) -> (i64, i64) {
    (
        total_seconds.div_euclid(SECONDS_PER_MINUTE),
        total_seconds.rem_euclid(SECONDS_PER_MINUTE),
    )
}

/// Interval at row `i` is `cumulative[i + 1] - cumulative[i]`; the last row has none.
pub fn intervals_from_cumulative(cumulative: &[i64]) -> Vec<Option<i64>> {
    let mut out: Vec<Option<i64>> = cumulative.windows(2).map(|w| Some(w[1].saturating_sub(w[0]))).collect();
    if !cumulative.is_empty() {
        out.push(None);
    }
    out
}

/// Running sum of the preceding intervals, starting at zero.
pub fn cumulative_from_intervals(intervals: &[Option<i64>]) -> Vec<i64> {
    let mut total: i64 = 0;
    intervals
        .iter()
        .map(|interval| {
            let at = total;
            total = total.saturating_add(interval.unwrap_or(0));
            at
        })
        .collect()
}
