/*
 * Test utilities for Roastcurve
 *
 * Fixture builders shared by the unit test modules.
 */

use crate::config::Settings;
use crate::profile::{Profile, ProfileKind};

/// Settings with the stock limits (10 profiles, 3 initial, 21/11 rows).
pub fn test_settings() -> Settings {
    Settings::default()
}

/// Temperature profile with `(temp, minutes, seconds)` in the leading rows.
pub fn time_profile(points: &[(f64, i64, i64)]) -> Profile {
    let mut p = Profile::empty(ProfileKind::Temperature);
    for (row, &(value, minutes, seconds)) in p.rows.iter_mut().zip(points) {
        row.value = Some(value);
        row.minutes = Some(minutes);
        row.seconds = Some(seconds);
    }
    p
}

/// Temperature profile with `(temp, interval seconds)` in the leading rows.
pub fn interval_profile(points: &[(f64, Option<i64>)]) -> Profile {
    let mut p = Profile::empty(ProfileKind::Temperature);
    for (row, &(value, interval)) in p.rows.iter_mut().zip(points) {
        row.value = Some(value);
        row.interval_seconds = interval;
    }
    p
}
