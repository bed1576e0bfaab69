use std::env;

/// Names that receive ranking priority regardless of activity metrics.
/// Matched as case-insensitive substrings of a personnel name.
pub const DEFAULT_KEY_PERSONNEL: &[&str] = &["KAPOLRES", "WAKAPOLRES"];

/// Pipeline configuration loaded from environment variables.
/// Every knob has a default, so loading never fails.
#[derive(Debug, Clone)]
pub struct Config {
    /// Designated key-personnel names for leaderboard priority.
    pub key_personnel: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// `REKAP_KEY_PERSONNEL` is a comma-separated name list.
    pub fn from_env() -> Self {
        let key_personnel = match env::var("REKAP_KEY_PERSONNEL") {
            Ok(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
                if names.is_empty() {
                    default_key_personnel()
                } else {
                    names
                }
            }
            Err(_) => default_key_personnel(),
        };
        Self { key_personnel }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_personnel: default_key_personnel(),
        }
    }
}

fn default_key_personnel() -> Vec<String> {
    DEFAULT_KEY_PERSONNEL
        .iter()
        .map(|name| name.to_string())
        .collect()
}
