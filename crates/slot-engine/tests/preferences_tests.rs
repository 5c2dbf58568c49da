//! Tests for preference settings validation and TOML loading.

use chrono_tz::Tz;
use slot_engine::error::SlotError;
use slot_engine::preferences::{PreferenceProfile, PreferenceSettings, PreferredTimeOfDay};
use slot_engine::time_of_day::TimeOfDay;

#[test]
fn default_settings_validate_to_default_profile() {
    let profile = PreferenceSettings::default().validate().unwrap();
    assert_eq!(profile, PreferenceProfile::default());
    assert_eq!(profile.work_day_start().to_string(), "09:00");
    assert_eq!(profile.work_day_end().to_string(), "17:00");
    assert_eq!(profile.preferred_duration(), 60);
    assert_eq!(profile.timezone(), Tz::UTC);
    assert!(!profile.work_on_weekends());
}

#[test]
fn unparsable_clock_time_names_the_field() {
    let settings = PreferenceSettings {
        work_day_start: "9am".to_string(),
        ..Default::default()
    };
    let err = settings.validate().unwrap_err();
    assert!(matches!(err, SlotError::Validation(_)));
    assert!(err.to_string().contains("work_day_start"), "got: {}", err);
}

#[test]
fn sleep_and_wake_are_validated_even_though_unused() {
    let settings = PreferenceSettings {
        wake_time: "07:75".to_string(),
        ..Default::default()
    };
    assert!(settings.validate().unwrap_err().to_string().contains("wake_time"));
}

#[test]
fn inverted_or_empty_work_day_is_rejected() {
    let inverted = PreferenceSettings {
        work_day_start: "17:00".to_string(),
        work_day_end: "09:00".to_string(),
        ..Default::default()
    };
    assert!(inverted.validate().unwrap_err().is_validation());

    let empty = PreferenceSettings {
        work_day_start: "09:00".to_string(),
        work_day_end: "09:00".to_string(),
        ..Default::default()
    };
    assert!(empty.validate().is_err());
}

#[test]
fn zero_preferred_duration_is_rejected() {
    let settings = PreferenceSettings {
        preferred_duration: 0,
        ..Default::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn unknown_timezone_is_rejected() {
    let settings = PreferenceSettings {
        timezone: "Atlantis/Central".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        settings.validate().unwrap_err(),
        SlotError::InvalidTimezone(_)
    ));
}

#[test]
fn toml_with_partial_keys_fills_defaults() {
    let toml = r#"
work_day_start = "08:30"
buffer_before = 10
buffer_after = 5
preferred_time_of_day = "afternoon"
work_on_weekends = true
timezone = "America/Los_Angeles"
"#;
    let settings = PreferenceSettings::from_toml_str(toml).unwrap();
    assert_eq!(settings.work_day_end, "17:00");
    assert_eq!(settings.preferred_duration, 60);

    let profile = settings.validate().unwrap();
    assert_eq!(profile.work_day_start(), TimeOfDay::from_hm(8, 30).unwrap());
    assert_eq!(profile.buffer_before(), 10);
    assert_eq!(profile.buffer_after(), 5);
    assert_eq!(profile.preferred_time_of_day(), PreferredTimeOfDay::Afternoon);
    assert!(profile.work_on_weekends());
    assert_eq!(profile.timezone(), Tz::America__Los_Angeles);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = PreferenceSettings::from_toml_str("work_day_start = ").unwrap_err();
    assert!(matches!(err, SlotError::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let path = std::path::Path::new("/nonexistent/slot-engine/preferences.toml");
    assert!(matches!(
        PreferenceSettings::from_file(path).unwrap_err(),
        SlotError::Config(_)
    ));
}

#[test]
fn json_accepts_camel_case_aliases() {
    let json = r#"{"workDayStart":"10:00","workDayEnd":"16:00","preferredTimeOfDay":"morning","workOnWeekends":true}"#;
    let settings: PreferenceSettings = serde_json::from_str(json).unwrap();
    let profile = settings.validate().unwrap();
    assert_eq!(profile.work_day_start().to_string(), "10:00");
    assert_eq!(profile.work_day_end().to_string(), "16:00");
    assert_eq!(profile.preferred_time_of_day(), PreferredTimeOfDay::Morning);
}

#[test]
fn legacy_no_preference_spelling_is_accepted() {
    let pref: PreferredTimeOfDay = serde_json::from_str(r#""no preference""#).unwrap();
    assert_eq!(pref, PreferredTimeOfDay::NoPreference);
}

#[test]
fn time_of_day_windows_are_half_open() {
    let tod = |s: &str| s.parse::<TimeOfDay>().unwrap();

    assert!(PreferredTimeOfDay::Morning.contains(tod("00:00")));
    assert!(PreferredTimeOfDay::Morning.contains(tod("11:59")));
    assert!(!PreferredTimeOfDay::Morning.contains(tod("12:00")));

    assert!(PreferredTimeOfDay::Afternoon.contains(tod("12:00")));
    assert!(!PreferredTimeOfDay::Afternoon.contains(tod("17:00")));

    assert!(PreferredTimeOfDay::Evening.contains(tod("17:00")));
    assert!(PreferredTimeOfDay::Evening.contains(tod("23:59")));

    assert!(PreferredTimeOfDay::NoPreference.contains(tod("03:00")));
}

#[test]
fn profile_round_trips_through_settings() {
    let settings = PreferenceSettings {
        work_day_start: "07:15".to_string(),
        buffer_after: 30,
        timezone: "Europe/Berlin".to_string(),
        ..Default::default()
    };
    let profile = settings.validate().unwrap();
    assert_eq!(PreferenceSettings::from(&profile), settings);
}
