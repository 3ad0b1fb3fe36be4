//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), env_from(&[]));
    assert_eq!(resolved.api_url, config.api_url);
    assert_eq!(resolved.endpoint, config.endpoint);
    assert_eq!(resolved.page_size, config.page_size);
    assert_eq!(resolved.export_dir, config.export_dir);
    assert_eq!(resolved.logging.file_rotation, config.logging.file_rotation);
}

/// Windows paths and quotes must survive serialization
#[test]
fn test_config_roundtrip_escapes_strings() {
    let mut config = Config::default();
    config.export_dir = PathBuf::from(r"C:\Users\me\exports");
    config.theme = "my \"theme\"".to_string();

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(parsed.export_dir.as_deref(), Some(r"C:\Users\me\exports"));
    assert_eq!(parsed.theme.as_deref(), Some("my \"theme\""));
}

#[test]
fn test_defaults_without_file_or_env() {
    let config = Config::resolve(FileConfig::default(), env_from(&[]));
    assert_eq!(config.api_url, "https://jsonplaceholder.typicode.com");
    assert_eq!(config.endpoint, "/posts");
    assert_eq!(config.page_size, 15);
    assert!(!config.demo_mode);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://file.example"
page_size = 20
theme = "light"
"#,
    )
    .unwrap();
    let config = Config::resolve(
        file,
        env_from(&[
            ("POSTTABLE_API_URL", "http://env.example"),
            ("POSTTABLE_DEMO", "true"),
        ]),
    );

    assert_eq!(config.api_url, "http://env.example");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.theme, "light");
    assert!(config.demo_mode);
}

#[test]
fn test_bad_env_page_size_falls_through() {
    let file: FileConfig = toml::from_str("page_size = 25").unwrap();
    let config = Config::resolve(file, env_from(&[("POSTTABLE_PAGE_SIZE", "lots")]));
    assert_eq!(config.page_size, 25);
}

#[test]
fn test_zero_page_size_is_raised() {
    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("POSTTABLE_PAGE_SIZE", "0")]),
    );
    assert_eq!(config.page_size, 1);
}

#[test]
fn test_logging_section() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "debug"
file_enabled = true
file_rotation = "HOURLY"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, env_from(&[]));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(config.logging.file_prefix, "posttable");
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
}

#[test]
fn test_logging_section_fills_gaps() {
    let section: LoggingSection = toml::from_str(
        r#"
file_dir = "/var/log/posttable"
file_prefix = "table"
"#,
    )
    .unwrap();
    let logging = LoggingConfig::resolve(Some(section));
    assert_eq!(logging.file_dir, PathBuf::from("/var/log/posttable"));
    assert_eq!(logging.file_prefix, "table");
    assert_eq!(logging.level, "info");
    assert_eq!(logging.file_rotation, LogRotation::Daily);

    let absent = LoggingConfig::resolve(None);
    assert!(!absent.file_enabled);
    assert_eq!(absent.file_dir, PathBuf::from("./logs"));
}
