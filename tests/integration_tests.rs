/*
 * Integration tests for Roastcurve
 *
 * These tests drive the public API end to end: pasted text through
 * normalization and rate of rise, profile-set management, the analysis
 * snapshot and the session file on disk.
 */

use roastcurve::config::{load_session, load_settings, save_session, try_load_settings, Settings};
use roastcurve::display::{format_clock, format_reading, render_table};
use roastcurve::error::RoastError;
use roastcurve::interp::{interpolate, Reading};
use roastcurve::normalize::normalize;
use roastcurve::paste::{parse, parse_lines};
use roastcurve::profile::{InputMode, Profile, ProfileKind, ProfileRow};
use roastcurve::ror::compute_ror;
use roastcurve::session::{sync_profile, ProfileSet, SyncOutcome};
use roastcurve::timemodel::{cumulative_from_intervals, intervals_from_cumulative};
use serial_test::serial;
use tempfile::TempDir;

// Test utilities
fn table_from_paste(text: &str, mode: InputMode) -> Profile {
    Profile::empty(ProfileKind::Temperature).merged(&parse(text, mode))
}

fn cumulative(profile: &Profile) -> Vec<f64> {
    profile.rows[..profile.valid_length()]
        .iter()
        .filter_map(|r| r.cumulative_seconds)
        .collect()
}

const ROAST: &str = "\
100 0 0
95 0 45
110 1 50
135 3 10
160 4 55
185 6 40
205 8 30
";

#[test]
fn test_normalize_is_idempotent() {
    for mode in [InputMode::Time, InputMode::Interval] {
        let table = table_from_paste(ROAST, mode);
        let once = normalize(&table, mode);
        assert_eq!(normalize(&once, mode), once, "mode {}", mode);
    }
}

#[test]
fn test_time_mode_round_trips_through_intervals() {
    let p = normalize(&table_from_paste(ROAST, InputMode::Time), InputMode::Time);
    let secs: Vec<i64> = cumulative(&p).iter().map(|&c| c as i64).collect();
    assert_eq!(cumulative_from_intervals(&intervals_from_cumulative(&secs)), secs);

    let stored: Vec<Option<i64>> = p.rows[..p.valid_length()].iter().map(|r| r.interval_seconds).collect();
    assert_eq!(stored, intervals_from_cumulative(&secs));
}

#[test]
fn test_cumulative_time_is_monotonic_and_anchored() {
    let p = sync_profile(&table_from_paste(ROAST, InputMode::Time), InputMode::Time);
    let c = cumulative(&p);
    assert_eq!(c.len(), 7);
    assert_eq!(c[0], 0.0);
    assert!(c.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(c[6], 510.0);
}

#[test]
fn test_ror_zero_guard_on_repeated_time() {
    let p = sync_profile(&table_from_paste("100 0 0\n150 0 30\n170 0 30\n", InputMode::Time), InputMode::Time);
    assert_eq!(p.rows[0].ror, None);
    assert_eq!(p.rows[2].ror, Some(0.0));
    assert!(p.rows.iter().filter_map(|r| r.ror).all(f64::is_finite));
}

#[test]
fn test_parser_examples() {
    let t = parse("120 1 30", InputMode::Time);
    assert_eq!(t.len(), 1);
    let row = t.get(0).unwrap();
    assert_eq!((row.value, row.minutes, row.seconds), (120.0, Some(1), Some(30)));

    let i = parse("120 40", InputMode::Interval);
    assert_eq!(i.len(), 1);
    let row = i.get(0).unwrap();
    assert_eq!((row.value, row.interval_seconds), (120.0, Some(40)));

    assert!(parse("abc 1 30", InputMode::Time).is_empty());
}

#[test]
fn test_skipped_lines_keep_their_point() {
    let outcome = parse_lines("100 0 0\n\n150 30\n200 1 0\n", InputMode::Time);
    assert_eq!(outcome.skipped, vec![1]);
    assert!(outcome.rows.get(1).is_none());
    assert_eq!(outcome.rows.get(2).unwrap().value, 200.0);
}

#[test]
fn test_interval_mode_end_to_end() {
    let p = sync_profile(&table_from_paste("100 30\n150 30\n200\n", InputMode::Interval), InputMode::Interval);
    assert_eq!(cumulative(&p), vec![0.0, 30.0, 60.0]);
    let clock: Vec<_> = p.rows[..3].iter().map(|r| (r.minutes, r.seconds)).collect();
    assert_eq!(clock, vec![(Some(0), Some(0)), (Some(0), Some(30)), (Some(1), Some(0))]);
    assert_eq!(p.rows[1].ror, Some(50.0 / 30.0));
}

#[test]
fn test_interpolation_boundary() {
    let p = compute_ror(&normalize(&table_from_paste("100 0 0\n150 0 30\n200 1 0\n", InputMode::Time), InputMode::Time));
    match interpolate(&p, 15.0) {
        Some(Reading::At(s)) => assert!((s.temperature - 125.0).abs() < 1e-9),
        other => panic!("expected a reading, got {:?}", other),
    }
    assert_eq!(interpolate(&p, 90.0), Some(Reading::NoData));
}

#[test]
fn test_rows_past_valid_prefix_untouched() {
    let table = table_from_paste("100 0 0\n150 0 30\n200 1 0\n", InputMode::Time);
    let p = sync_profile(&table, InputMode::Time);
    for i in 3..p.len() {
        assert_eq!(p.rows[i], ProfileRow::placeholder(i));
    }
}

#[test]
fn test_profile_set_workflow() {
    let settings = Settings::default();
    let mut set = ProfileSet::new(&settings);
    assert_eq!(set.names(), vec!["Profile 1", "Profile 2", "Profile 3"]);
    assert!(matches!(set.analyze(), Err(RoastError::NothingSynced)));

    assert_eq!(set.sync_pasted("Profile 1", ROAST).unwrap(), SyncOutcome::Synced { rows: 7 });
    set.set_mode("Profile 2", InputMode::Interval).unwrap();
    assert_eq!(
        set.sync_pasted("Profile 2", "90 60\n120 120\n170 120\n200\n").unwrap(),
        SyncOutcome::Synced { rows: 4 }
    );
    set.sync_fan_pasted("Profile 1", "90 0 0\n70 5 0\n70 8 30\n").unwrap();

    set.rename("Profile 3", "Ethiopia washed").unwrap();
    assert_eq!(set.add_profile().unwrap(), "Profile 4");

    let analysis = set.analyze().unwrap();
    assert_eq!(analysis.max_time(), 510.0);

    let detail = analysis.detail_at(350.0);
    let names: Vec<&str> = detail.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["Profile 1", "Profile 2"]);

    let (_, p2) = detail[1];
    assert_eq!(p2, Reading::NoData);
    match detail[0].1 {
        Reading::At(s) => {
            assert!(s.temperature > 160.0 && s.temperature < 185.0);
            assert!(s.ror.is_some());
            assert!(s.fan.is_some_and(|f| (f - 70.0).abs() < 1e-9));
        }
        Reading::NoData => panic!("Profile 1 runs past 350s"),
    }

    let (temp, _, fan) = format_reading(&detail[0].1);
    assert!(temp.ends_with("°C"));
    assert_eq!(fan, "70%");
    assert_eq!(format_clock(analysis.max_time()), "8m 30s");
}

#[test]
fn test_analysis_is_stale_until_refreshed() {
    let mut set = ProfileSet::new(&Settings::default());
    set.sync_pasted("Profile 1", "100 0 0\n200 1 40\n").unwrap();
    let before = set.analyze().unwrap();

    set.sync_pasted("Profile 1", "100 0 0\n200 1 40\n220 3 20\n").unwrap();
    assert_eq!(before.max_time(), 100.0);
    assert_eq!(set.analyze().unwrap().max_time(), 200.0);
}

#[test]
fn test_session_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions").join("roast.json");
    let settings = Settings::default();

    let mut set = ProfileSet::new(&settings);
    set.sync_pasted("Profile 1", ROAST).unwrap();
    set.set_mode("Profile 2", InputMode::Interval).unwrap();
    set.sync_fan_pasted("Profile 2", "80\n60 0 0\n").unwrap();
    set.remove("Profile 3").unwrap();
    save_session(&path, &set).unwrap();

    let loaded = load_session(&path, &settings).unwrap();
    assert_eq!(loaded.names(), vec!["Profile 1", "Profile 2"]);
    assert_eq!(loaded.get("Profile 2").unwrap().mode, InputMode::Interval);
    let (saved, reloaded) = (&set.get("Profile 1").unwrap().profile, &loaded.get("Profile 1").unwrap().profile);
    assert_eq!(cumulative(reloaded), cumulative(saved));
    assert_eq!(reloaded.valid_length(), 7);
    assert!(loaded.get("Profile 2").unwrap().fan.is_some());
    assert!(loaded.is_chartable());

    let table = render_table(&loaded.get("Profile 1").unwrap().profile);
    assert_eq!(table.lines().count(), 1 + 21);
}

#[test]
fn test_load_session_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_session(&dir.path().join("nope.json"), &Settings::default()).unwrap_err();
    assert!(matches!(err, RoastError::FileRead { .. }));
}

#[test]
#[serial]
fn test_settings_from_config_home() {
    let dir = TempDir::new().unwrap();
    let saved_xdg = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    assert_eq!(load_settings(), Settings::default());

    let app_dir = dir.path().join("roastcurve");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("settings.json"), r#"{ "max_profiles": 4, "initial_profiles": 2 }"#).unwrap();
    let settings = load_settings();
    assert_eq!(settings.max_profiles, 4);
    assert_eq!(ProfileSet::new(&settings).len(), 2);

    std::fs::write(app_dir.join("settings.json"), r#"{ "max_profiles": 0 }"#).unwrap();
    assert!(matches!(
        try_load_settings(&app_dir.join("settings.json")),
        Err(RoastError::InvalidSettings(_))
    ));
    assert_eq!(load_settings(), Settings::default());

    match saved_xdg {
        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
}
