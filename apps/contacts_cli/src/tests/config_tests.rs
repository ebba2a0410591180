use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_without_file_or_env() {
    let settings = load_settings_from(None, no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
}

#[test]
fn file_values_override_defaults() {
    let settings = load_settings_from(
        Some(
            r#"
server_url = "http://contacts.internal:8080"
request_timeout_secs = 3
log_level = "debug"
"#,
        ),
        no_env,
    );
    assert_eq!(settings.server_url, "http://contacts.internal:8080");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn timeout_accepts_string_and_ignores_negative() {
    let settings = load_settings_from(Some(r#"request_timeout_secs = "7""#), no_env);
    assert_eq!(settings.request_timeout_secs, 7);

    let settings = load_settings_from(Some("request_timeout_secs = -1"), no_env);
    assert_eq!(settings.request_timeout_secs, 10);
}

#[test]
fn malformed_file_is_ignored() {
    let settings = load_settings_from(Some("server_url = ["), no_env);
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let env = |key: &str| match key {
        "CONTACTS_SERVER_URL" => Some("http://from-env:1".to_string()),
        "APP__SERVER_URL" => Some("http://from-app-env:2".to_string()),
        "APP__REQUEST_TIMEOUT_SECS" => Some("not-a-number".to_string()),
        "APP__LOG_LEVEL" => Some("warn".to_string()),
        _ => None,
    };
    let settings = load_settings_from(Some(r#"server_url = "http://from-file:3""#), env);
    assert_eq!(settings.server_url, "http://from-app-env:2");
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.log_level, "warn");
}
