use crate::defaults::{DEFAULT_STATE_KEY, DEFAULT_VIEWPORT_ID};
use log::*;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    /// Lap index up to which the lap columns are not scrolled
    pub lap_scroll_start: u32,
    /// Horizontal distance, in pixels, scrolled for each lap advance
    pub scroll_amount_per_lap: f64,
}

impl Default for Scroll {
    fn default() -> Self {
        Self {
            lap_scroll_start: 4,
            scroll_amount_per_lap: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub viewport_id: String,
    pub state_key: String,
    pub viewport_width: f64,
    pub name_column_width: f64,
    pub lap_column_width: f64,
    pub score_column_width: f64,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            viewport_id: DEFAULT_VIEWPORT_ID.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            viewport_width: 1280.0,
            name_column_width: 300.0,
            lap_column_width: 100.0,
            score_column_width: 150.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scroll: Scroll,
    pub display: Display,
}

impl Config {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(Box::new(e));
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(Box::new(e))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;

    const SCROLL_STRING: &str = indoc!(
        r#"lap_scroll_start = 4
           scroll_amount_per_lap = 100.0"#
    );

    const DISPLAY_STRING: &str = indoc!(
        r#"viewport_id = "leaderboard_wrapper"
           state_key = "state"
           viewport_width = 1280.0
           name_column_width = 300.0
           lap_column_width = 100.0
           score_column_width = 150.0"#
    );

    #[test]
    fn test_deser_scroll() {
        let scroll: Scroll = Default::default();
        let deser = toml::from_str(SCROLL_STRING);
        assert_eq!(deser, Ok(scroll));
    }

    #[test]
    fn test_deser_display() {
        let display: Display = Default::default();
        let deser = toml::from_str(DISPLAY_STRING);
        assert_eq!(deser, Ok(display));
    }

    #[test]
    fn test_deser_config() {
        let config: Config = Default::default();
        let deser = toml::from_str(&format!(
            "[scroll]\n{}\n[display]\n{}",
            SCROLL_STRING, DISPLAY_STRING
        ));
        assert_eq!(deser, Ok(config));
    }

    #[test]
    fn test_ser_config() {
        let config: Config = Default::default();
        let serialized = toml::to_string(&config).unwrap();
        let deser = toml::from_str(&serialized);
        assert_eq!(deser, Ok(config));
    }

    #[test]
    fn test_display_uses_defaults() {
        let display = Display::default();
        assert_eq!(display.viewport_id, crate::defaults::DEFAULT_VIEWPORT_ID);
        assert_eq!(display.state_key, crate::defaults::DEFAULT_STATE_KEY);
    }

    #[test]
    fn test_new_from_missing_file() {
        assert!(Config::new_from_file("/nonexistent/leaderboard.toml").is_err());
    }
}
