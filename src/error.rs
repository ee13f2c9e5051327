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

//! Error type for profile-set management and file handling.
//!
//! The normalization engine itself never fails; these errors come from the
//! layers around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoastError>;

#[derive(Debug, Error)]
pub enum RoastError {
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile name cannot be empty")]
    EmptyName,

    #[error("Profile name too long: {0}")]
    NameTooLong(String),

    #[error("A profile named '{0}' already exists")]
    DuplicateName(String),

    #[error("No profile named '{0}'")]
    UnknownProfile(String),

    #[error("Too many profiles (max {max})")]
    TooManyProfiles { max: usize },

    #[error("Nothing has been synced yet")]
    NothingSynced,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),
}
