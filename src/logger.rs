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

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::config::config_dir;

const LOG_FILE_NAME: &str = "logs.json";
const FALLBACK_LOG_PATH: &str = "/tmp/roastcurve_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub fn default_log_path() -> PathBuf {
    config_dir().join(LOG_FILE_NAME)
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Start appending events to `path` (or the default log path).
///
/// Falls back to /tmp when the chosen location cannot be opened.
pub fn init_logging(path: Option<&Path>) {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = open_append(&path).or_else(|| open_append(Path::new(FALLBACK_LOG_PATH)));
    if let (Some(f), Ok(mut guard)) = (file, LOG_FILE.lock()) {
        *guard = Some(f);
    }
}

/// Stop logging; later events are dropped.
pub fn shutdown_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Append one JSON line. No-op unless [`init_logging`] has run.
pub fn log_event(event: &str, data: Value) {
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
        }
    }
}
