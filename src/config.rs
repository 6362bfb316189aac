//! Runtime configuration loaded from environment variables.
//!
//! Every setting has a default, and unparseable values fall back to it.
//!
//! | Variable                     | Default         | Description                                  |
//! |------------------------------|-----------------|----------------------------------------------|
//! | `MAZEWEAVE_LOG_LEVEL`        | `info`          | tracing filter (trace/debug/info/warn/error) |
//! | `MAZEWEAVE_LOG_FILE`         | `mazeweave.log` | log file of the terminal binary              |
//! | `MAZEWEAVE_FRAME_MILLIS`     | `30`            | delay per animation frame                    |
//! | `MAZEWEAVE_CHANNEL_CAPACITY` | `1`             | snapshots buffered per run (0 = rendezvous)  |
//! | `MAZEWEAVE_SEED`             | unset           | seed for reproducible runs                   |

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter string, e.g. `"mazeweave=debug,info"`.
    pub log_level: String,

    pub log_file: String,

    /// Delay between two rendered snapshots.
    pub frame_delay: Duration,

    /// Bound of the snapshot stream between producer and consumer.
    pub channel_capacity: usize,

    /// `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so callers can layer their own sources.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_str = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let env_parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Config {
            log_level: env_str("MAZEWEAVE_LOG_LEVEL", "info"),
            log_file: env_str("MAZEWEAVE_LOG_FILE", "mazeweave.log"),
            frame_delay: Duration::from_millis(env_parse("MAZEWEAVE_FRAME_MILLIS").unwrap_or(30)),
            channel_capacity: env_parse("MAZEWEAVE_CHANNEL_CAPACITY")
                .map_or(1, |v| v as usize),
            seed: env_parse("MAZEWEAVE_SEED"),
        }
    }
}
