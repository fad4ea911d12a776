use std::fs;
use std::path::Path;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use snaptext_config::ConfigError;

use crate::startup::{AppPaths, StartupError, fatal_notice, preflight};

fn base_dir() -> tempfile::TempDir {
    tempfile::TempDir::with_prefix("snaptext_startup").unwrap()
}

fn write_icon(base: &Path) {
    fs::create_dir_all(base.join("res")).unwrap();
    fs::write(base.join("res").join("icon.ico"), b"icon").unwrap();
}

fn write_config(base: &Path, json: &str) {
    fs::write(base.join("config.json"), json).unwrap();
}

#[test]
fn test_paths_resolve_against_base_dir() {
    let paths = AppPaths::new("/opt/snaptext", "config.json");
    assert_eq!(paths.config, Path::new("/opt/snaptext/config.json"));
    assert_eq!(paths.icon, Path::new("/opt/snaptext/res/icon.ico"));
    assert_eq!(paths.capture, Path::new("/opt/snaptext/tmp/tmp.png"));

    let paths = AppPaths::new("/opt/snaptext", "/etc/snaptext.json");
    assert_eq!(paths.config, Path::new("/etc/snaptext.json"));
}

#[test]
fn test_missing_icon_stops_startup() {
    let dir = base_dir();
    write_config(dir.path(), r#"{"url": "http://localhost/ocr", "hot-key": ["alt", "r"]}"#);

    let paths = AppPaths::new(dir.path(), "config.json");
    let err = preflight(paths.clone()).unwrap_err();

    assert!(matches!(err, StartupError::MissingIcon(_)));
    assert!(paths.tmp_dir.is_dir(), "tmp/ is created before the icon check");

    let notice = fatal_notice(&err, &paths);
    assert_eq!(notice.body, err.user_message());
    assert_eq!(notice.icon, None);
}

#[test]
fn test_missing_config_stops_startup() {
    let dir = base_dir();
    write_icon(dir.path());

    let err = preflight(AppPaths::new(dir.path(), "config.json")).unwrap_err();
    assert!(matches!(err, StartupError::Config(ConfigError::Io(_))));
}

#[test]
fn test_malformed_hotkey_pair_stops_startup() {
    let dir = base_dir();
    write_icon(dir.path());
    write_config(dir.path(), r#"{"url": "http://localhost/ocr", "hot-key": ["alt"]}"#);

    let err = preflight(AppPaths::new(dir.path(), "config.json")).unwrap_err();
    assert!(matches!(err, StartupError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_absent_hotkey_stops_startup() {
    let dir = base_dir();
    write_icon(dir.path());
    write_config(dir.path(), r#"{"url": "http://localhost/ocr"}"#);

    let err = preflight(AppPaths::new(dir.path(), "config.json")).unwrap_err();
    assert!(matches!(err, StartupError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_unknown_hotkey_name_stops_startup() {
    let dir = base_dir();
    write_icon(dir.path());
    write_config(
        dir.path(),
        r#"{"url": "http://localhost/ocr", "hot-key": ["alt", "banana"]}"#,
    );

    let paths = AppPaths::new(dir.path(), "config.json");
    let err = preflight(paths.clone()).unwrap_err();
    assert!(matches!(err, StartupError::Hotkey(_)));
    assert_eq!(fatal_notice(&err, &paths).icon, Some(paths.icon.clone()));
}

#[test]
fn test_valid_setup_passes() {
    let dir = base_dir();
    write_icon(dir.path());
    write_config(
        dir.path(),
        r#"{"url": "http://localhost/ocr", "hot-key": ["alt", "r"], "notification": {"timeout_ms": 750}}"#,
    );

    let startup = preflight(AppPaths::new(dir.path(), "config.json")).unwrap();
    assert_eq!(startup.hotkey, HotKey::new(Some(Modifiers::ALT), Code::KeyR));
    assert_eq!(startup.config.hotkey.label(), "Alt + R");

    let style = startup.notice_style();
    assert_eq!(style.timeout.as_millis(), 750);
    assert_eq!(style.icon, Some(startup.paths.icon.clone()));
}
