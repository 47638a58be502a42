use crate::storage::STORAGE_KEY;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub step_interval: Duration,
    pub vitals_interval: Duration,
    pub persist_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: default_data_path(),
            step_interval: Duration::from_secs(30),
            vitals_interval: Duration::from_secs(2),
            persist_defaults: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parse_var::<u16>("PORT").unwrap_or(defaults.port),
            data_path: resolve_data_path(),
            step_interval: parse_var::<u64>("STEP_TICK_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.step_interval),
            vitals_interval: parse_var::<u64>("VITALS_TICK_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.vitals_interval),
            persist_defaults: env::var("PERSIST_DEFAULTS")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.persist_defaults),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("MONITOR_DATA_PATH") {
        return PathBuf::from(path);
    }

    default_data_path()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
