//! Game engine selection.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Engine names in the order the library reports them.
pub const SUPPORTED_ENGINES: [&str; 4] = ["bevy", "godot", "arcade", "auto"];

/// Target engine for a generated project.
///
/// Encoded on the wire as its integer discriminant (`0` = Bevy ... `3` = Auto).
/// Decoding also accepts engine names, and maps unknown integers to `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameEngine {
    Bevy = 0,
    Godot = 1,
    Arcade = 2,
    #[default]
    Auto = 3,
}

impl GameEngine {
    /// All engines, in wire order.
    pub const ALL: [GameEngine; 4] = [Self::Bevy, Self::Godot, Self::Arcade, Self::Auto];

    /// Lowercase engine name as reported in results.
    pub fn name(self) -> &'static str {
        SUPPORTED_ENGINES[self as usize]
    }

    /// Parse an engine name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|engine| engine.name().eq_ignore_ascii_case(name))
    }

    /// Resolve a wire discriminant. Anything outside 0-3 falls back to `Auto`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Bevy,
            1 => Self::Godot,
            2 => Self::Arcade,
            _ => Self::Auto,
        }
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Serialize for GameEngine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

struct EngineVisitor;

impl Visitor<'_> for EngineVisitor {
    type Value = GameEngine;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an engine code (0-3) or engine name")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<GameEngine, E> {
        Ok(GameEngine::from_code(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<GameEngine, E> {
        Ok(GameEngine::from_code(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<GameEngine, E> {
        GameEngine::from_name(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for GameEngine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EngineVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_names_match_supported_list() {
        let names: Vec<_> = GameEngine::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names, SUPPORTED_ENGINES);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(GameEngine::from_name("Godot"), Some(GameEngine::Godot));
        assert_eq!(GameEngine::from_name(" BEVY "), Some(GameEngine::Bevy));
        assert_eq!(GameEngine::from_name("unreal"), None);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&GameEngine::Bevy).unwrap(), "0");
        assert_eq!(serde_json::to_string(&GameEngine::Auto).unwrap(), "3");
    }

    #[test]
    fn test_deserializes_codes_and_names() {
        let engine: GameEngine = serde_json::from_str("1").unwrap();
        assert_eq!(engine, GameEngine::Godot);

        let engine: GameEngine = serde_json::from_str("\"arcade\"").unwrap();
        assert_eq!(engine, GameEngine::Arcade);
    }

    #[test]
    fn test_out_of_range_code_resolves_to_auto() {
        let engine: GameEngine = serde_json::from_str("42").unwrap();
        assert_eq!(engine, GameEngine::Auto);

        let engine: GameEngine = serde_json::from_str("-1").unwrap();
        assert_eq!(engine, GameEngine::Auto);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!(serde_json::from_str::<GameEngine>("\"unity\"").is_err());
        assert!(serde_json::from_str::<GameEngine>("true").is_err());
    }
}
