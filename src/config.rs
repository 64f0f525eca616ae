//! Applet configuration.
//!
//! The configuration can be loaded from a JSON file, but panels usually own
//! the settings store and push changes one key at a time; [`Config::apply`]
//! consumes those updates.  Every field is optional — a minimal `{}` file is
//! valid and all fields fall back to their compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "scroll_enabled": true,
//!   "color": "0,0,0,0.1",
//!   "active_color": "1,1,1,1",
//!   "padding": 0,
//!   "cell_spacing": 3,
//!   "aspect_ratio": 1.0,
//!   "desk_name_pattern": "Workspace %n [%x,%y]"
//! }
//! ```

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

//  Colors

/// RGBA color with components in `[0, 1]`.
///
/// Settings stores and config files carry colors as comma-separated strings
/// like `"0,0,0,0.1"`; [`FromStr`] and [`Display`](fmt::Display) round-trip
/// that form, and the serde impls serialize through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Error parsing a comma-separated color string.
#[derive(Debug, thiserror::Error)]
#[error("invalid color string: {0:?}")]
pub struct ParseRgbaError(String);

impl FromStr for Rgba {
    type Err = ParseRgbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f32> = s
            .split(',')
            .map(|part| part.trim().parse())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseRgbaError(s.to_owned()))?;
        match parts.as_slice() {
            &[r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(ParseRgbaError(s.to_owned())),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//  Setting values

/// Typed value pushed by the host's settings store.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numbers below zero clamp to zero; pixel quantities have no use for
    /// negative values.
    fn as_u32(&self) -> Option<u32> {
        self.as_f64().map(|n| n.max(0.0) as u32)
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

//  Config

/// Applet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Switch workspaces with the scroll wheel over the icon.
    pub scroll_enabled: bool,
    /// Fill color of inactive cells.
    pub color: Rgba,
    /// Fill color of the active cell.
    pub active_color: Rgba,
    /// Padding between the icon border and the outermost cells, in pixels.
    pub padding: u32,
    /// Gap between adjacent cells, in pixels.
    pub cell_spacing: u32,
    /// Icon aspect ratio (height over width on a vertical panel).
    pub aspect_ratio: f64,
    /// Label pattern for context-menu entries; `%x`, `%y` and `%n` expand
    /// to the 1-based column, row and workspace number.
    pub desk_name_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_enabled: true,
            color: Rgba::new(0.0, 0.0, 0.0, 0.1),
            active_color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            padding: 0,
            cell_spacing: 3,
            aspect_ratio: 1.0,
            desk_name_pattern: "Workspace %n [%x,%y]".to_owned(),
        }
    }
}

/// Error loading the configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

impl Config {
    /// Load the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {e}", path.display())))
    }

    /// Apply a single setting pushed by the host.
    ///
    /// Unknown keys and values of the wrong shape are logged and ignored;
    /// a malformed color string keeps the previous color.  Settings changes
    /// must never take the applet down.
    pub fn apply(&mut self, key: &str, value: &SettingValue) {
        match key {
            "scroll_enabled" => match value.as_bool() {
                Some(v) => self.scroll_enabled = v,
                None => reject(key, value),
            },
            "color" => match value.as_text().map(str::parse) {
                Some(Ok(color)) => self.color = color,
                _ => reject(key, value),
            },
            "active_color" => match value.as_text().map(str::parse) {
                Some(Ok(color)) => self.active_color = color,
                _ => reject(key, value),
            },
            "padding" => match value.as_u32() {
                Some(v) => self.padding = v,
                None => reject(key, value),
            },
            "cell_spacing" => match value.as_u32() {
                Some(v) => self.cell_spacing = v,
                None => reject(key, value),
            },
            "aspect_ratio" => match value.as_f64() {
                Some(v) => self.aspect_ratio = v,
                None => reject(key, value),
            },
            "desk_name_pattern" => match value.as_text() {
                Some(v) => self.desk_name_pattern = v.to_owned(),
                None => reject(key, value),
            },
            _ => debug!("ignoring unknown setting {key:?}"),
        }
    }
}

fn reject(key: &str, value: &SettingValue) {
    warn!("ignoring invalid value for setting {key:?}: {value:?}");
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    //  Rgba

    #[test]
    fn color_strings_round_trip() {
        let color: Rgba = "0,0,0,0.1".parse().unwrap();
        assert_eq!(color, Rgba::new(0.0, 0.0, 0.0, 0.1));
        assert_eq!(color.to_string(), "0,0,0,0.1");
    }

    #[test]
    fn color_parsing_tolerates_whitespace() {
        let color: Rgba = " 1, 0.5 ,0, 1 ".parse().unwrap();
        assert_eq!(color, Rgba::new(1.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn malformed_color_strings_are_errors() {
        assert!("".parse::<Rgba>().is_err());
        assert!("1,1,1".parse::<Rgba>().is_err());
        assert!("1,1,1,1,1".parse::<Rgba>().is_err());
        assert!("red,1,1,1".parse::<Rgba>().is_err());
    }

    //  Serde

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: Config =
            serde_json::from_str(r#"{ "cell_spacing": 5, "active_color": "1,0,0,1" }"#).unwrap();
        assert_eq!(config.cell_spacing, 5);
        assert_eq!(config.active_color, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(config.padding, Config::default().padding);
        assert!(config.scroll_enabled);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: Config = serde_json::from_str(r#"{ "no_such_key": 1 }"#).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_serializes_colors_as_strings() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["color"], "0,0,0,0.1");
        assert_eq!(json["active_color"], "1,1,1,1");
    }

    #[test]
    fn serialized_config_round_trips() {
        let config = Config {
            cell_spacing: 7,
            desk_name_pattern: "desk %n".to_owned(),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    //  Defaults

    #[test]
    fn defaults_match_the_applet() {
        let config = Config::default();
        assert!(config.scroll_enabled);
        assert_eq!(config.color, Rgba::new(0.0, 0.0, 0.0, 0.1));
        assert_eq!(config.active_color, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(config.padding, 0);
        assert_eq!(config.cell_spacing, 3);
        assert_eq!(config.aspect_ratio, 1.0);
        assert_eq!(config.desk_name_pattern, "Workspace %n [%x,%y]");
    }

    //  apply

    #[test]
    fn apply_updates_each_known_key() {
        let mut config = Config::default();
        config.apply("scroll_enabled", &SettingValue::Bool(false));
        config.apply("color", &SettingValue::Text("0.2,0.2,0.2,1".to_owned()));
        config.apply("active_color", &SettingValue::Text("0,1,0,1".to_owned()));
        config.apply("padding", &SettingValue::Number(2.0));
        config.apply("cell_spacing", &SettingValue::Number(5.0));
        config.apply("aspect_ratio", &SettingValue::Number(1.5));
        config.apply("desk_name_pattern", &SettingValue::Text("%n".to_owned()));

        assert!(!config.scroll_enabled);
        assert_eq!(config.color, Rgba::new(0.2, 0.2, 0.2, 1.0));
        assert_eq!(config.active_color, Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(config.padding, 2);
        assert_eq!(config.cell_spacing, 5);
        assert_eq!(config.aspect_ratio, 1.5);
        assert_eq!(config.desk_name_pattern, "%n");
    }

    #[test]
    fn malformed_color_keeps_the_previous_value() {
        let mut config = Config::default();
        config.apply("active_color", &SettingValue::Text("not a color".to_owned()));
        assert_eq!(config.active_color, Config::default().active_color);
    }

    #[test]
    fn wrong_value_shapes_are_ignored() {
        let mut config = Config::default();
        config.apply("scroll_enabled", &SettingValue::Number(1.0));
        config.apply("padding", &SettingValue::Text("2".to_owned()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_setting_keys_are_ignored() {
        let mut config = Config::default();
        config.apply("no_such_key", &SettingValue::Bool(true));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn negative_pixel_quantities_clamp_to_zero() {
        let mut config = Config::default();
        config.apply("cell_spacing", &SettingValue::Number(-4.0));
        assert_eq!(config.cell_spacing, 0);
    }
}
