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

mod cli;

use clap::Parser;

use cli::{execute_command, Cli};
use roastcurve::config::{load_settings, try_load_settings, Settings};
use roastcurve::logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the default location falls back to defaults
    let settings: Settings = match &cli.config {
        Some(path) => try_load_settings(path)?,
        None => load_settings(),
    };

    let logging_enabled = cli.logging || settings.logging;
    if logging_enabled {
        logger::init_logging(settings.log_path.as_deref());
        logger::log_event(
            "startup",
            serde_json::json!({
                "command": cli.command.name(),
                "args": std::env::args().collect::<Vec<_>>(),
            }),
        );
    }

    if let Err(err) = execute_command(&cli.command, &settings) {
        eprintln!("error: {err:#}");
        logger::log_event("fatal_error", serde_json::json!({ "error": format!("{err:#}") }));
        logger::shutdown_logging();
        std::process::exit(1);
    }

    logger::shutdown_logging();
    Ok(())
}
