//! Player preferences
//!
//! Stored as JSON next to the binary. Physics constants are fixed at compile
//! time and deliberately absent from here.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Errors from reading a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display names for player 1 and player 2
    pub player_names: [String; 2],
    /// Draw the faint aim guide line while charging a shot
    pub show_aim_guide: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            show_aim_guide: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// A fresh game using these player names
    pub fn new_game(&self) -> GameState {
        GameState::with_names(self.player_names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "show_aim_guide": false }"#).unwrap();
        assert!(!settings.show_aim_guide);
        assert_eq!(settings.player_names[0], "Player 1");
    }

    #[test]
    fn test_names_flow_into_game() {
        let settings =
            Settings::from_json(r#"{ "player_names": ["Minnesota Fats", "Eddie"] }"#).unwrap();
        let state = settings.new_game();
        assert_eq!(state.players[0].name, "Minnesota Fats");
        assert_eq!(state.players[1].name, "Eddie");
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default();
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/eight-ball/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }
}
