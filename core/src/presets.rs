//! Ready-made configurations for common game types.

use aigamedev_shared::{GameConfig, GameEngine};

/// Names accepted by [`preset`], in display order.
pub const PRESET_NAMES: [&str; 5] = [
    "simple_platformer",
    "advanced_rts",
    "story_driven_adventure",
    "educational_game",
    "web_casual_game",
];

pub fn simple_platformer() -> GameConfig {
    GameConfig::default()
        .with_engine(GameEngine::Arcade)
        .with_complexity("simple")
        .with_target_audience("casual")
        .with_features(["jumping", "collectibles", "enemies"])
}

pub fn advanced_rts() -> GameConfig {
    GameConfig::default()
        .with_engine(GameEngine::Bevy)
        .with_complexity("advanced")
        .with_target_audience("strategy players")
        .with_features([
            "unit_selection",
            "pathfinding",
            "resource_management",
            "fog_of_war",
        ])
}

pub fn story_driven_adventure() -> GameConfig {
    GameConfig::default()
        .with_engine(GameEngine::Godot)
        .with_complexity("intermediate")
        .with_target_audience("story enthusiasts")
        .with_features(["dialogue", "inventory", "save_system"])
}

pub fn educational_game() -> GameConfig {
    GameConfig::default()
        .with_engine(GameEngine::Arcade)
        .with_complexity("simple")
        .with_target_audience("students")
        .with_features(["quizzes", "progress_tracking"])
}

pub fn web_casual_game() -> GameConfig {
    GameConfig::default()
        .with_engine(GameEngine::Arcade)
        .with_complexity("simple")
        .with_target_audience("casual")
        .with_features(["web_export", "touch_controls", "high_scores"])
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<GameConfig> {
    let config = match name {
        "simple_platformer" => simple_platformer(),
        "advanced_rts" => advanced_rts(),
        "story_driven_adventure" => story_driven_adventure(),
        "educational_game" => educational_game(),
        "web_casual_game" => web_casual_game(),
        _ => return None,
    };
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in PRESET_NAMES {
            assert!(preset(name).is_some(), "missing preset {name}");
        }
        assert!(preset("mmo").is_none());
    }

    #[test]
    fn test_preset_engines() {
        assert_eq!(advanced_rts().engine, GameEngine::Bevy);
        assert_eq!(story_driven_adventure().engine, GameEngine::Godot);
        assert_eq!(web_casual_game().engine, GameEngine::Arcade);
    }
}
