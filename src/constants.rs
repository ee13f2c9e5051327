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

//! Constants and configuration defaults for Roastcurve
//!
//! Row capacities, profile-set limits and chart defaults live here so the
//! settings defaults and the engine agree on a single value.

/// Table capacities
pub mod rows {
    /// Rows in a freshly created temperature profile
    pub const TEMPERATURE: usize = 21;

    /// Rows in a freshly created fan profile
    pub const FAN: usize = 11;

    /// Upper bound accepted from settings or session files
    pub const MAX_CONFIGURABLE: usize = 256;
}

/// Profile-set limits
pub mod limits {
    /// Maximum number of profiles compared side by side
    pub const MAX_PROFILES: usize = 10;

    /// Hard ceiling for `max_profiles` in settings
    pub const MAX_PROFILES_CEILING: usize = 64;

    /// Profiles created for a new session
    pub const INITIAL_PROFILES: usize = 3;

    /// Prefix used for generated profile names ("Profile 1", "Profile 2", ...)
    pub const PROFILE_NAME_PREFIX: &str = "Profile ";

    /// Longest accepted profile name
    pub const MAX_NAME_LEN: usize = 64;
}

/// Chart axis defaults
pub mod chart {
    pub const TEMP_MIN_C: f64 = 85.0;
    pub const TEMP_MAX_C: f64 = 235.0;
    pub const ROR_MIN: f64 = 0.0;
    pub const ROR_MAX: f64 = 0.75;
    pub const TIME_MIN_S: f64 = 0.0;
    pub const TIME_MAX_S: f64 = 360.0;

    /// Upper bound of the time selector when no profile has enough points
    pub const FALLBACK_MAX_TIME_S: f64 = 1.0;
}

/// Session exchange file format
pub mod session {
    pub const FORMAT_VERSION: u8 = 1;
}

pub const SECONDS_PER_MINUTE: i64 = 60;
