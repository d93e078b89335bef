use chrono::Duration;
use readmeter_lib::{
    meter::{DEFAULT_FREE_LIMIT, STORAGE_KEY},
    settings::{MeterSettings, SettingsStore, DEFAULT_RETENTION_DAYS},
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

    let settings = store.meter();
    assert_eq!(settings.free_limit, DEFAULT_FREE_LIMIT);
    assert_eq!(settings.retention_days, DEFAULT_RETENTION_DAYS);
    assert_eq!(settings.storage_key, STORAGE_KEY);
    assert_eq!(settings.policy().retention, Duration::days(7));
}

#[test]
fn corrupt_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = SettingsStore::new(path).unwrap();
    assert_eq!(store.meter(), MeterSettings::default());
}

#[test]
fn partial_file_fills_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "freeLimit": 5 }"#).unwrap();

    let store = SettingsStore::new(path).unwrap();
    let settings = store.meter();
    assert_eq!(settings.free_limit, 5);
    assert_eq!(settings.retention_days, DEFAULT_RETENTION_DAYS);
}

#[test]
fn update_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let store = SettingsStore::new(path.clone()).unwrap();

    let updated = MeterSettings {
        free_limit: 10,
        retention_days: 30,
        ..MeterSettings::default()
    };
    store.update_meter(updated.clone()).unwrap();

    let reopened = SettingsStore::new(path.clone()).unwrap();
    assert_eq!(reopened.meter(), updated);

    std::fs::write(&path, r#"{ "freeLimit": 2, "retentionDays": 1, "storageKey": "k" }"#)
        .unwrap();
    reopened.reload().unwrap();
    assert_eq!(reopened.meter().free_limit, 2);
    assert_eq!(reopened.meter().policy().retention, Duration::days(1));
}

#[test]
fn invalid_update_is_rejected_and_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let store = SettingsStore::new(path.clone()).unwrap();

    let bad = MeterSettings {
        retention_days: 0,
        ..MeterSettings::default()
    };
    assert!(store.update_meter(bad).is_err());
    assert!(!path.exists());
    assert_eq!(store.meter(), MeterSettings::default());

    let blank_key = MeterSettings {
        storage_key: "  ".into(),
        ..MeterSettings::default()
    };
    assert!(store.update_meter(blank_key).is_err());
}

#[test]
fn unreadable_existing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::create_dir(&path).unwrap();

    assert!(SettingsStore::new(path).is_err());
}
