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

//! Display formatting helpers
//!
//! Frontend-agnostic string formatting for readings and tables.

use crate::interp::Reading;
use crate::profile::{Profile, ProfileKind};
use crate::timemodel::seconds_to_minutes_seconds;

/// Shown in place of a reading past the end of a profile
pub const NO_DATA: &str = "--";

/// Temperature with one decimal place, e.g. "152.5°C"
pub fn format_temp(temp_celsius: f64) -> String {
    format!("{:.1}°C", temp_celsius)
}

/// Rate of rise with three decimal places, e.g. "0.125°C/s"
pub fn format_ror(ror: f64) -> String {
    format!("{:.3}°C/s", ror)
}

pub fn format_fan(percent: f64) -> String {
    format!("{:.0}%", percent)
}

/// Elapsed time as "3m 05s"
pub fn format_clock(total_seconds: f64) -> String {
    let (m, s) = seconds_to_minutes_seconds(total_seconds.floor() as i64);
    format!("{}m {:02}s", m, s)
}

/// (temperature, rate of rise, fan) cells for the detail panel.
pub fn format_reading(reading: &Reading) -> (String, String, String) {
    match reading {
        Reading::NoData => (NO_DATA.to_string(), NO_DATA.to_string(), NO_DATA.to_string()),
        Reading::At(s) => (
            format_temp(s.temperature),
            s.ror.map(format_ror).unwrap_or_else(|| NO_DATA.to_string()),
            s.fan.map(format_fan).unwrap_or_else(|| NO_DATA.to_string()),
        ),
    }
}

fn cell<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Plain-text rendering of a profile table, one row per line.
pub fn render_table(profile: &Profile) -> String {
    let mut out = String::new();
    let value_header = match profile.kind {
        ProfileKind::Temperature => "temp",
        ProfileKind::Fan => "fan%",
    };
    out.push_str(&format!(
        "{:>5} {:>8} {:>4} {:>4} {:>8} {:>8} {:>8}\n",
        "point", value_header, "min", "sec", "interval", "elapsed", "ror"
    ));
    for r in &profile.rows {
        out.push_str(&format!(
            "{:>5} {:>8} {:>4} {:>4} {:>8} {:>8} {:>8}\n",
            r.point,
            r.value.map(|v| format!("{:.1}", v)).unwrap_or_default(),
            cell(r.minutes),
            cell(r.seconds),
            cell(r.interval_seconds),
            r.cumulative_seconds.map(|v| format!("{:.0}", v)).unwrap_or_default(),
            r.ror.map(|v| format!("{:.3}", v)).unwrap_or_default(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Sample;

    #[test]
    fn test_format_precision() {
        assert_eq!(format_temp(125.0), "125.0°C");
        assert_eq!(format_temp(152.46), "152.5°C");
        assert_eq!(format_ror(50.0 / 30.0), "1.667°C/s");
        assert_eq!(format_fan(72.4), "72%");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0m 00s");
        assert_eq!(format_clock(65.0), "1m 05s");
        assert_eq!(format_clock(754.9), "12m 34s");
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(&Reading::NoData), ("--".into(), "--".into(), "--".into()));
        let r = Reading::At(Sample { temperature: 125.0, ror: Some(0.0), fan: None });
        assert_eq!(format_reading(&r), ("125.0°C".into(), "0.000°C/s".into(), "--".into()));
    }

    #[test]
    fn test_render_table_lists_every_row() {
        let p = Profile::empty(ProfileKind::Fan);
        let text = render_table(&p);
        assert_eq!(text.lines().count(), p.len() + 1);
        assert!(text.lines().next().unwrap().contains("fan%"));
    }
}
