use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_url: String,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_url: "https://query1.finance.yahoo.com".to_string(),
            output_path: PathBuf::from("chart.png"),
            width: 1400,
            height: 800,
            thumbnail_size: 100,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Settings {
            data_url: lookup("EVENTCHART_DATA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.data_url),
            output_path: lookup("EVENTCHART_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            width: parse_or(&lookup, "EVENTCHART_WIDTH", defaults.width),
            height: parse_or(&lookup, "EVENTCHART_HEIGHT", defaults.height),
            thumbnail_size: parse_or(&lookup, "EVENTCHART_THUMBNAIL_SIZE", defaults.thumbnail_size),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }),
        None => default,
    }
}
