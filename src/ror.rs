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

//! Rate of rise
//!
//! Point-to-point temperature slope in °C per second over the valid prefix.
//! Expects elapsed seconds to be filled in by [`crate::normalize::normalize`].

use crate::profile::Profile;

/// Slope between two points. Anything that is not a finite number comes back as 0.
pub fn slope(prev_value: Option<f64>, value: Option<f64>, prev_time: Option<f64>, time: Option<f64>) -> f64 {
    let (Some(v0), Some(v1), Some(t0), Some(t1)) = (prev_value, value, prev_time, time) else {
        return 0.0;
    };
    let ror = (v1 - v0) / (t1 - t0);
    if ror.is_finite() {
        ror
    } else {
        0.0
    }
}

/// Fill `ror` on every row of the valid prefix; row 0 has none.
pub fn compute_ror(profile: &Profile) -> Profile {
    let mut out = profile.clone();
    let valid = out.valid_length();
    if valid == 0 {
        return out;
    }
    out.rows[0].ror = None;
    for i in 1..valid {
        let (prev, cur) = (&out.rows[i - 1], &out.rows[i]);
        let ror = slope(prev.value, cur.value, prev.cumulative_seconds, cur.cumulative_seconds);
        out.rows[i].ror = Some(ror);
    }
    out
}
