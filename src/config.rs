#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

const KEYS: [ConfigKey; 6] = [
    ConfigKey::GeminiAPIKey,
    ConfigKey::GeminiURL,
    ConfigKey::ListenAddress,
    ConfigKey::Model,
    ConfigKey::RelayURL,
    ConfigKey::Username,
];

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GeminiAPIKey,
    GeminiURL,
    ListenAddress,
    Model,
    RelayURL,
    Username,
}

impl ToString for ConfigKey {
    fn to_string(&self) -> String {
        match self {
            ConfigKey::GeminiAPIKey => return String::from("gemini-api-key"),
            ConfigKey::GeminiURL => return String::from("gemini-url"),
            ConfigKey::ListenAddress => return String::from("listen-address"),
            ConfigKey::Model => return String::from("model"),
            ConfigKey::RelayURL => return String::from("relay-url"),
            ConfigKey::Username => return String::from("username"),
        }
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let res = match key {
            ConfigKey::GeminiAPIKey => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::ListenAddress => "127.0.0.1:3000",
            ConfigKey::Model => "models/gemini-2.5-flash-preview-09-2025",
            ConfigKey::RelayURL => "http://localhost:3000",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub fn load(clap_arg_matches: Vec<&ArgMatches>) {
        for key in KEYS {
            Config::set(key, &Config::default(key));
        }

        for matches in clap_arg_matches.as_slice() {
            for key in KEYS {
                if let Some(value) = matches.get_one::<String>(&key.to_string()) {
                    Config::set(key, value);
                }
            }
        }
    }
}
