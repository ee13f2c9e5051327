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

//! Roastcurve - coffee roast profile comparison
//!
//! This library normalizes sparse roast tables entered either as clock times
//! or as interval durations, derives elapsed time and rate of rise, and
//! answers "what was happening at second N" lookups across several profiles.

pub mod constants;
pub mod timemodel;
pub mod profile;
pub mod normalize;
pub mod ror;
pub mod paste;
pub mod interp;
pub mod display;
pub mod session;
pub mod config;
pub mod error;
pub mod logger;

#[cfg(test)]
pub mod test_utils;
