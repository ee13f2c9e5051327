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

//! Command Line Interface
//!
//! Every command works on a session file holding the profile set.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;

use roastcurve::config::{load_session, save_session, Settings};
use roastcurve::display::{format_clock, format_reading, render_table};
use roastcurve::logger;
use roastcurve::profile::InputMode;
use roastcurve::session::{ProfileSet, SyncOutcome};

#[derive(Parser)]
#[command(name = "roastcurve")]
#[command(version)]
#[command(about = "Roastcurve - compare coffee roast profiles")]
#[command(long_about = "Roastcurve - compare coffee roast profiles

Normalizes roast tables typed as clock times or interval durations,
derives elapsed time and rate of rise, and reports every profile's
reading at a chosen moment.

EXAMPLES:
    roastcurve new roast.json
    roastcurve paste roast.json \"Profile 1\" < log.txt
    roastcurve paste roast.json \"Profile 2\" --mode interval --file log.txt
    roastcurve show roast.json \"Profile 1\"
    roastcurve inspect roast.json --at 300
    roastcurve summary roast.json

FILES:
    ~/.config/roastcurve/settings.json    Application settings
    ~/.config/roastcurve/logs.json        Event log (with --logging)")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Append JSON event lines to the log file
    #[arg(long, global = true)]
    pub logging: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a session file with the default profiles
    New {
        session: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Parse pasted rows (stdin unless --file) into a profile and sync it
    Paste {
        session: PathBuf,
        profile: String,
        /// Input mode for this profile (time or interval)
        #[arg(long)]
        mode: Option<InputMode>,
        /// Read the rows from a file
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
        /// Paste into the profile's fan table
        #[arg(long)]
        fan: bool,
    },

    /// Re-normalize every profile in the session
    Sync { session: PathBuf },

    /// Print normalized tables
    Show {
        session: PathBuf,
        /// Only this profile
        profile: Option<String>,
    },

    /// Print every profile's reading at a moment
    Inspect {
        session: PathBuf,
        /// Elapsed seconds to look up
        #[arg(long)]
        at: f64,
    },

    /// Total roast time per profile
    Summary { session: PathBuf },

    /// Add a profile (next free "Profile N" unless a name is given)
    Add {
        session: PathBuf,
        name: Option<String>,
    },

    /// Rename a profile
    Rename {
        session: PathBuf,
        old: String,
        new: String,
    },

    /// Remove a profile
    Remove { session: PathBuf, name: String },

    /// Change a profile's input mode and re-sync it
    Mode {
        session: PathBuf,
        profile: String,
        mode: InputMode,
        /// Apply to the fan table instead
        #[arg(long)]
        fan: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::New { .. } => "new",
            Commands::Paste { .. } => "paste",
            Commands::Sync { .. } => "sync",
            Commands::Show { .. } => "show",
            Commands::Inspect { .. } => "inspect",
            Commands::Summary { .. } => "summary",
            Commands::Add { .. } => "add",
            Commands::Rename { .. } => "rename",
            Commands::Remove { .. } => "remove",
            Commands::Mode { .. } => "mode",
        }
    }
}

// ============================================================================
// CLI Execution
// ============================================================================

pub fn execute_command(cmd: &Commands, settings: &Settings) -> anyhow::Result<()> {
    match cmd {
        Commands::New { session, force } => cmd_new(session, *force, settings),
        Commands::Paste { session, profile, mode, file, fan } => {
            cmd_paste(session, profile, *mode, file.as_deref(), *fan, settings)
        }
        Commands::Sync { session } => cmd_sync(session, settings),
        Commands::Show { session, profile } => cmd_show(session, profile.as_deref(), settings),
        Commands::Inspect { session, at } => cmd_inspect(session, *at, settings),
        Commands::Summary { session } => cmd_summary(session, settings),
        Commands::Add { session, name } => cmd_add(session, name.as_deref(), settings),
        Commands::Rename { session, old, new } => {
            edit_session(session, settings, |set| Ok(set.rename(old, new)?))?;
            println!("Renamed '{}' to '{}'", old, new);
            Ok(())
        }
        Commands::Remove { session, name } => {
            edit_session(session, settings, |set| Ok(set.remove(name).map(|_| ())?))?;
            println!("Removed '{}'", name);
            Ok(())
        }
        Commands::Mode { session, profile, mode, fan } => cmd_mode(session, profile, *mode, *fan, settings),
    }
}

fn open(session: &Path, settings: &Settings) -> anyhow::Result<ProfileSet> {
    load_session(session, settings).with_context(|| format!("cannot open session {}", session.display()))
}

fn edit_session<F>(session: &Path, settings: &Settings, edit: F) -> anyhow::Result<ProfileSet>
where
    F: FnOnce(&mut ProfileSet) -> anyhow::Result<()>,
{
    let mut set = open(session, settings)?;
    edit(&mut set)?;
    save_session(session, &set)?;
    Ok(set)
}

// ============================================================================
// Session Commands
// ============================================================================

fn cmd_new(session: &Path, force: bool, settings: &Settings) -> anyhow::Result<()> {
    if session.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", session.display());
    }
    let set = ProfileSet::new(settings);
    save_session(session, &set)?;
    println!("Created {} with {} profiles", session.display(), set.len());
    Ok(())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("cannot read stdin")?;
            Ok(text)
        }
    }
}

fn cmd_paste(
    session: &Path,
    profile: &str,
    mode: Option<InputMode>,
    file: Option<&Path>,
    fan: bool,
    settings: &Settings,
) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let mut outcome = SyncOutcome::NothingParsed;
    edit_session(session, settings, |set| {
        if let Some(mode) = mode {
            if fan {
                set.set_fan_mode(profile, mode)?;
            } else {
                set.set_mode(profile, mode)?;
            }
        }
        outcome = if fan {
            set.sync_fan_pasted(profile, &text)?
        } else {
            set.sync_pasted(profile, &text)?
        };
        Ok(())
    })?;

    match outcome {
        SyncOutcome::Synced { rows } => println!("Synced {} rows into '{}'", rows, profile),
        SyncOutcome::NothingParsed => println!("No rows recognised; '{}' left unchanged", profile),
    }
    Ok(())
}

fn cmd_sync(session: &Path, settings: &Settings) -> anyhow::Result<()> {
    let set = edit_session(session, settings, |set| {
        set.resync_all();
        Ok(())
    })?;
    println!("Re-synced {} profiles", set.len());
    Ok(())
}

fn cmd_mode(session: &Path, profile: &str, mode: InputMode, fan: bool, settings: &Settings) -> anyhow::Result<()> {
    edit_session(session, settings, |set| {
        if fan {
            set.set_fan_mode(profile, mode)?;
        } else {
            set.set_mode(profile, mode)?;
        }
        Ok(set.resync(profile)?)
    })?;
    println!("'{}' now uses {} mode", profile, mode);
    Ok(())
}

fn cmd_add(session: &Path, name: Option<&str>, settings: &Settings) -> anyhow::Result<()> {
    let mut added = String::new();
    edit_session(session, settings, |set| {
        added = match name {
            Some(n) => {
                set.add_named(n)?;
                n.to_string()
            }
            None => set.add_profile()?,
        };
        Ok(())
    })?;
    println!("Added '{}'", added);
    Ok(())
}

// ============================================================================
// Report Commands
// ============================================================================

fn cmd_show(session: &Path, profile: Option<&str>, settings: &Settings) -> anyhow::Result<()> {
    let set = open(session, settings)?;
    let entries: Vec<_> = match profile {
        Some(name) => match set.get(name) {
            Some(e) => vec![e],
            None => bail!("no profile named '{}'", name),
        },
        None => set.entries().iter().collect(),
    };

    for entry in entries {
        println!("{} ({} mode)", entry.name, entry.mode);
        print!("{}", render_table(&entry.profile));
        if let Some(fan) = &entry.fan {
            println!("{} fan ({} mode)", entry.name, entry.fan_mode);
            print!("{}", render_table(fan));
        }
        println!();
    }
    Ok(())
}

fn cmd_inspect(session: &Path, at: f64, settings: &Settings) -> anyhow::Result<()> {
    let analysis = open(session, settings)?.analyze()?;
    let max = analysis.max_time();
    let at = analysis.selector_time(at);
    logger::log_event("inspect", json!({ "seconds": at, "max_time": max }));

    println!("At {} (of {})", format_clock(at), format_clock(max));
    println!("{:<20} {:>10} {:>12} {:>6}", "profile", "temp", "ror", "fan");
    for (name, reading) in analysis.detail_at(at) {
        let (temp, ror, fan) = format_reading(&reading);
        println!("{:<20} {:>10} {:>12} {:>6}", name, temp, ror, fan);
    }
    Ok(())
}

fn cmd_summary(session: &Path, settings: &Settings) -> anyhow::Result<()> {
    let set = open(session, settings)?;
    for entry in set.entries() {
        let points = entry.profile.valid_length();
        match entry.profile.max_time() {
            Some(t) => println!("{:<20} {:>3} points  {}", entry.name, points, format_clock(t)),
            None => println!("{:<20} {:>3} points  --", entry.name, points),
        }
    }
    if let Ok(analysis) = set.analyze() {
        println!("Longest roast: {}", format_clock(analysis.max_time()));
    }
    Ok(())
}
