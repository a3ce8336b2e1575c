use super::Config;
use super::ConfigKey;

#[test]
fn it_serializes_keys() {
    assert_eq!(ConfigKey::GeminiAPIKey.to_string(), "gemini-api-key");
    assert_eq!(ConfigKey::GeminiURL.to_string(), "gemini-url");
    assert_eq!(ConfigKey::ListenAddress.to_string(), "listen-address");
    assert_eq!(ConfigKey::Model.to_string(), "model");
    assert_eq!(ConfigKey::RelayURL.to_string(), "relay-url");
    assert_eq!(ConfigKey::Username.to_string(), "username");
}

#[test]
fn it_returns_defaults() {
    assert_eq!(
        Config::default(ConfigKey::GeminiURL),
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(Config::default(ConfigKey::ListenAddress), "127.0.0.1:3000");
    assert_eq!(
        Config::default(ConfigKey::Model),
        "models/gemini-2.5-flash-preview-09-2025"
    );
    assert_eq!(Config::default(ConfigKey::RelayURL), "http://localhost:3000");
    assert_eq!(Config::default(ConfigKey::GeminiAPIKey), "");
}

#[test]
fn it_falls_back_to_a_generic_username() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
}

#[test]
fn it_executes_get_set() {
    Config::set(ConfigKey::GeminiAPIKey, "test-key");
    assert_eq!(Config::get(ConfigKey::GeminiAPIKey), "test-key");
}
