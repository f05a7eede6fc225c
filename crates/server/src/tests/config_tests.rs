use super::{load_settings_from, resolve_static_dir, with_port, Settings};

use std::{collections::HashMap, fs, path::Path};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/server.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "0.0.0.0:3000");
    assert_eq!(settings.static_dir, None);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
bind_addr = "127.0.0.1:8080"
static_dir = "dist/spa"
max_body_bytes = 2048
ping_message = "pong"
"#,
    )
    .expect("write");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(settings.static_dir.as_deref(), Some("dist/spa"));
    assert_eq!(settings.max_body_bytes, 2048);
    assert_eq!(settings.ping_message, "pong");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "bind_addr = \"127.0.0.1:8080\"\nlog_filter = \"warn\"\n").expect("write");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:9000"),
            ("APP__BIND_ADDR", "127.0.0.1:9100"),
            ("APP__LOG_FILTER", "debug"),
            ("APP__MAX_BODY_BYTES", "not-a-number"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:9100");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn port_variable_replaces_only_the_port() {
    let settings = load_settings_from(
        Path::new("/nonexistent/server.toml"),
        env_from(&[("PORT", "8081")]),
    );
    assert_eq!(settings.server_bind, "0.0.0.0:8081");
}

#[test]
fn unparseable_port_keeps_bind_address() {
    assert_eq!(with_port("127.0.0.1:3000", "eighty"), "127.0.0.1:3000");
    assert_eq!(with_port("localhost:3000", "80"), "localhost:3000");
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "bind_addr = [").expect("write");
    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn static_dir_resolution() {
    assert!(resolve_static_dir(None).expect("none").is_none());
    assert!(resolve_static_dir(Some("  ")).expect("blank").is_none());

    let dir = tempfile::tempdir().expect("tempdir");
    let resolved = resolve_static_dir(dir.path().to_str())
        .expect("dir")
        .expect("some");
    assert_eq!(resolved, dir.path());

    let file = dir.path().join("index.html");
    fs::write(&file, "<html></html>").expect("write");
    assert!(resolve_static_dir(file.to_str()).is_err());
    assert!(resolve_static_dir(dir.path().join("missing").to_str()).is_err());
}
