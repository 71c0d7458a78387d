use crate::engine::Rules;
use crate::models::DEFAULT_USERNAME;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub username: String,
    pub rules: Rules,
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/ledger.json"));

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let username = lookup("APP_USERNAME")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let clicker_requires_checkin = lookup("APP_CLICKER_REQUIRES_CHECKIN")
            .and_then(|value| parse_flag(&value))
            .unwrap_or(true);

        let rng_seed = lookup("APP_RNG_SEED").and_then(|value| value.parse::<u64>().ok());

        Self {
            data_path,
            port,
            username,
            rules: Rules {
                clicker_requires_checkin,
                ..Rules::default()
            },
            rng_seed,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.data_path, PathBuf::from("data/ledger.json"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.username, DEFAULT_USERNAME);
        assert!(cfg.rules.clicker_requires_checkin);
        assert_eq!(cfg.rng_seed, None);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("APP_DATA_PATH", "/tmp/ledger.json"),
            ("PORT", "9001"),
            ("APP_USERNAME", " Ernest "),
            ("APP_CLICKER_REQUIRES_CHECKIN", "false"),
            ("APP_RNG_SEED", "42"),
        ]);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.username, "Ernest");
        assert!(!cfg.rules.clicker_requires_checkin);
        assert_eq!(cfg.rng_seed, Some(42));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[
            ("PORT", "not-a-port"),
            ("APP_CLICKER_REQUIRES_CHECKIN", "maybe"),
            ("APP_RNG_SEED", "-1"),
        ]);
        assert_eq!(cfg.port, 8080);
        assert!(cfg.rules.clicker_requires_checkin);
        assert_eq!(cfg.rng_seed, None);
    }
}
