use std::fs;
use std::path::PathBuf;

use contacts::StorageFormat;
use contacts::config::Config;
use contacts::test_utils::{TestCase, UnitTestFixture, run_table_tests};

#[test]
fn storage_format_parsing() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "text",
            input: "text",
            expected: Some(StorageFormat::Text),
            should_panic: false,
        },
        TestCase {
            name: "txt alias",
            input: "TXT",
            expected: Some(StorageFormat::Text),
            should_panic: false,
        },
        TestCase {
            name: "json",
            input: " json ",
            expected: Some(StorageFormat::Json),
            should_panic: false,
        },
        TestCase {
            name: "unknown",
            input: "yaml",
            expected: None,
            should_panic: false,
        },
    ];

    run_table_tests(cases, |raw| raw.parse::<StorageFormat>().ok())
}

#[test]
fn data_root_config_file_is_layered() {
    let fixture = UnitTestFixture::new();
    let explicit = fixture.create_file(
        "settings/contacts.toml",
        "[storage]\nformat = \"json\"\nbackup_file = \"backups/prev.json\"\n\n[log]\nretention_days = 7\n",
    );

    let config = Config::load(Some(explicit.as_path()), fixture.path()).unwrap();
    assert_eq!(config.storage.format, StorageFormat::Json);
    assert_eq!(
        config.storage.backup_file,
        fixture.path().join("backups/prev.json")
    );
    assert_eq!(config.storage.json_file, fixture.path().join("contacts.json"));
    assert_eq!(config.log.retention_days, 7);
    assert!(config.log.enabled);
}

#[test]
fn config_round_trips_through_toml() {
    let fixture = UnitTestFixture::new();
    let config = fixture.config(StorageFormat::Json);
    let raw = toml::to_string(&config).unwrap();
    let path = fixture.create_file("config.toml", &raw);

    let reloaded = Config::load(Some(path.as_path()), fixture.path()).unwrap();
    assert_eq!(reloaded.storage.format, StorageFormat::Json);
    assert_eq!(reloaded.storage.text_file, config.storage.text_file);
    assert!(fs::read_to_string(&path).unwrap().contains("retention_days = 30"));
}

#[test]
fn missing_explicit_file_uses_defaults() {
    let fixture = UnitTestFixture::new();
    let absent = fixture.path().join("absent.toml");
    let config = Config::load(Some(absent.as_path()), fixture.path()).unwrap();
    assert_eq!(
        config.storage.text_file,
        fixture.path().join(PathBuf::from("contacts.txt"))
    );
}
