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

//! Profile normalization
//!
//! Fills the derived time columns of a profile from whichever columns the
//! input mode makes authoritative:
//!
//! - **Time input**: elapsed seconds come from minutes/seconds, intervals are
//!   recomputed from elapsed seconds (the last valid row has no interval).
//! - **Interval input**: elapsed seconds are the running sum of intervals,
//!   minutes/seconds are recomputed from elapsed seconds.
//!
//! Only the valid prefix (row 0 through the last row with a value) is touched.
//! Row 0 is the origin, so its clock is pinned to 0m 00s. Point indices are
//! always rewritten from row order.

use crate::profile::{InputMode, Profile, ProfileRow};
use crate::timemodel::{
    cumulative_from_intervals, intervals_from_cumulative, seconds_to_minutes_seconds,
    to_cumulative_seconds,
};

/// Authoritative time cells read from the valid prefix
enum TimeSource {
    Clock(Vec<(Option<i64>, Option<i64>)>),
    Intervals(Vec<Option<i64>>),
}

impl TimeSource {
    fn read(rows: &[ProfileRow], mode: InputMode) -> Self {
        match mode {
            InputMode::Time => TimeSource::Clock(rows.iter().map(|r| (r.minutes, r.seconds)).collect()),
            InputMode::Interval => TimeSource::Intervals(rows.iter().map(|r| r.interval_seconds).collect()),
        }
    }

    fn cumulative(&self) -> Vec<i64> {
        match self {
            TimeSource::Clock(clock) => clock.iter().map(|&(m, s)| to_cumulative_seconds(m, s)).collect(),
            TimeSource::Intervals(intervals) => cumulative_from_intervals(intervals),
        }
    }

    /// Write elapsed seconds and the non-authoritative columns back onto `rows`.
    fn apply(&self, rows: &mut [ProfileRow]) {
        let cumulative = self.cumulative();
        match self {
            TimeSource::Clock(_) => {
                let intervals = intervals_from_cumulative(&cumulative);
                for ((row, &elapsed), interval) in rows.iter_mut().zip(&cumulative).zip(intervals) {
                    row.cumulative_seconds = Some(elapsed as f64);
                    row.interval_seconds = interval;
                }
            }
            TimeSource::Intervals(_) => {
                for (row, &elapsed) in rows.iter_mut().zip(&cumulative) {
                    let (minutes, seconds) = seconds_to_minutes_seconds(elapsed);
                    row.cumulative_seconds = Some(elapsed as f64);
                    row.minutes = Some(minutes);
                    row.seconds = Some(seconds);
                }
            }
        }
    }
}

fn reindexed(profile: &Profile) -> Profile {
    let mut out = profile.clone();
    for (i, row) in out.rows.iter_mut().enumerate() {
        row.point = i;
    }
    out
}

/// Normalize a temperature profile under `mode`.
///
/// Profiles without any value come back reindexed but otherwise unchanged.
pub fn normalize(profile: &Profile, mode: InputMode) -> Profile {
    let mut out = reindexed(profile);
    let valid = out.valid_length();
    if valid == 0 {
        return out;
    }
    let prefix = &mut out.rows[..valid];
    prefix[0].minutes = Some(0);
    prefix[0].seconds = Some(0);
    TimeSource::read(prefix, mode).apply(prefix);
    out
}

/// Normalize a fan profile.
///
/// Same rules as [`normalize`], intervals included; fan rows in the valid prefix
/// never carry a rate of rise.
pub fn normalize_fan(profile: &Profile, mode: InputMode) -> Profile {
    let mut out = normalize(profile, mode);
    let valid = out.valid_length();
    for row in out.rows[..valid].iter_mut() {
        row.ror = None;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileKind;
    use crate::test_utils::{interval_profile, time_profile};

    #[test]
    fn test_time_mode_derives_cumulative_and_intervals() {
        let p = normalize(&time_profile(&[(100.0, 0, 0), (150.0, 0, 30), (200.0, 1, 15)]), InputMode::Time);
        let cumulative: Vec<_> = p.rows[..3].iter().map(|r| r.cumulative_seconds).collect();
        assert_eq!(cumulative, vec![Some(0.0), Some(30.0), Some(75.0)]);
        let intervals: Vec<_> = p.rows[..3].iter().map(|r| r.interval_seconds).collect();
        assert_eq!(intervals, vec![Some(30), Some(45), None]);
    }

    #[test]
    fn test_interval_mode_end_to_end() {
        let p = normalize(&interval_profile(&[(100.0, Some(30)), (150.0, Some(30)), (200.0, None)]), InputMode::Interval);
        let cumulative: Vec<_> = p.rows[..3].iter().map(|r| r.cumulative_seconds).collect();
        assert_eq!(cumulative, vec![Some(0.0), Some(30.0), Some(60.0)]);
        let clock: Vec<_> = p.rows[..3].iter().map(|r| (r.minutes, r.seconds)).collect();
        assert_eq!(clock, vec![(Some(0), Some(0)), (Some(0), Some(30)), (Some(1), Some(0))]);
    }

    #[test]
    fn test_interval_gap_counts_as_zero() {
        let p = normalize(
            &interval_profile(&[(100.0, Some(40)), (120.0, None), (140.0, Some(20)), (160.0, None)]),
            InputMode::Interval,
        );
        let cumulative: Vec<_> = p.rows[..4].iter().filter_map(|r| r.cumulative_seconds).collect();
        assert_eq!(cumulative, vec![0.0, 40.0, 40.0, 60.0]);
    }

    #[test]
    fn test_rows_after_valid_prefix_untouched() {
        let input = time_profile(&[(100.0, 0, 0), (150.0, 0, 30), (200.0, 1, 0)]);
        let p = normalize(&input, InputMode::Time);
        assert_eq!(p.len(), 21);
        for i in 3..p.len() {
            assert_eq!(p.rows[i], ProfileRow::placeholder(i));
        }
    }

    #[test]
    fn test_all_absent_profile_is_noop() {
        let input = Profile::empty(ProfileKind::Temperature);
        assert_eq!(normalize(&input, InputMode::Time), input);
        assert_eq!(normalize(&input, InputMode::Interval), input);
    }

    #[test]
    fn test_points_reassigned_from_row_order() {
        let mut input = time_profile(&[(100.0, 0, 0), (150.0, 0, 30)]);
        input.rows.swap(0, 1);
        input.rows[5].point = 99;
        let p = normalize(&input, InputMode::Time);
        assert!(p.rows.iter().enumerate().all(|(i, r)| r.point == i));
    }

    #[test]
    fn test_mode_switch_leaves_no_stale_columns() {
        let input = time_profile(&[(100.0, 0, 0), (150.0, 0, 30), (200.0, 1, 0)]);
        let by_time = normalize(&input, InputMode::Time);

        let mut edited = by_time.clone();
        edited.rows[0].interval_seconds = Some(50);
        let by_interval = normalize(&edited, InputMode::Interval);
        assert_eq!(by_interval.rows[1].cumulative_seconds, Some(50.0));
        assert_eq!((by_interval.rows[1].minutes, by_interval.rows[1].seconds), (Some(0), Some(50)));
        assert_eq!(by_interval.rows[2].cumulative_seconds, Some(80.0));
        assert_eq!((by_interval.rows[2].minutes, by_interval.rows[2].seconds), (Some(1), Some(20)));
    }

    #[test]
    fn test_idempotent_in_both_modes() {
        let t = time_profile(&[(100.0, 0, 0), (130.0, 0, 45), (180.0, 2, 5), (205.0, 3, 30)]);
        let once = normalize(&t, InputMode::Time);
        assert_eq!(normalize(&once, InputMode::Time), once);

        let i = interval_profile(&[(100.0, Some(45)), (130.0, None), (180.0, Some(90)), (205.0, Some(10))]);
        let once = normalize(&i, InputMode::Interval);
        assert_eq!(normalize(&once, InputMode::Interval), once);
    }

    #[test]
    fn test_first_row_is_origin() {
        let p = normalize(&time_profile(&[(100.0, 1, 30), (150.0, 2, 0)]), InputMode::Time);
        assert_eq!(p.rows[0].cumulative_seconds, Some(0.0));
        assert_eq!((p.rows[0].minutes, p.rows[0].seconds), (Some(0), Some(0)));
        assert_eq!(p.rows[0].interval_seconds, Some(120));
    }

    #[test]
    fn test_missing_clock_cells_count_as_zero() {
        let mut input = time_profile(&[(100.0, 0, 0), (150.0, 0, 0)]);
        input.rows[1].minutes = Some(2);
        input.rows[1].seconds = None;
        let p = normalize(&input, InputMode::Time);
        assert_eq!(p.rows[1].cumulative_seconds, Some(120.0));
    }

    #[test]
    fn test_fan_normalizer_leaves_rows_past_prefix() {
        let mut fan = Profile::empty(ProfileKind::Fan);
        fan.rows[0].value = Some(80.0);
        fan.rows[1].value = Some(60.0);
        fan.rows[1].seconds = Some(50);
        fan.rows[1].ror = Some(0.5);
        fan.rows[4].ror = Some(0.25);
        let p = normalize_fan(&fan, InputMode::Time);
        assert_eq!(p.rows[1].ror, None);
        assert_eq!(p.rows[4], fan.rows[4]);
    }

    #[test]
    fn test_fan_normalizer_derives_intervals_without_ror() {
        let mut fan = Profile::empty(ProfileKind::Fan);
        fan.rows[0].value = Some(80.0);
        fan.rows[1].value = Some(65.0);
        fan.rows[1].minutes = Some(1);
        fan.rows[1].seconds = Some(10);
        fan.rows[1].ror = Some(1.0);
        let p = normalize_fan(&fan, InputMode::Time);
        assert_eq!(p.rows[0].interval_seconds, Some(70));
        assert_eq!(p.rows[1].interval_seconds, None);
        assert_eq!(p.rows[1].cumulative_seconds, Some(70.0));
        assert!(p.rows.iter().all(|r| r.ror.is_none()));
        assert_eq!(p.len(), 11);
    }
}
