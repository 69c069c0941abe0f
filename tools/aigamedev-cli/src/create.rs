//! Create command - generate a game from a description
//!
//! Runs one request through an in-process registry and prints the result.

use anyhow::{Context, Result};
use clap::Args;

use aigamedev_core::settings::Settings;
use aigamedev_core::{GameConfig, GameEngine, GameRegistry, GameResult, presets};

/// Description used when no words are given.
pub const DEFAULT_DESCRIPTION: &str = "Simple 2D platformer game";

/// Arguments for the create command
#[derive(Args)]
pub struct CreateArgs {
    /// Natural-language description of the game
    pub words: Vec<String>,

    /// Target engine (bevy, godot, arcade, auto)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Complexity label (defaults to the configured default)
    #[arg(short, long)]
    pub complexity: Option<String>,

    /// Target audience
    #[arg(long)]
    pub audience: Option<String>,

    /// Feature to request (repeatable)
    #[arg(short, long = "feature")]
    pub features: Vec<String>,

    /// Start from a built-in preset (see `aigamedev presets`)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the create command
pub fn execute(args: CreateArgs, settings: Settings) -> Result<()> {
    let config = build_config(&args, &settings)?;
    let description = description(&args);

    let mut registry = GameRegistry::with_settings(settings);
    registry.init();

    let id = registry
        .create_game(&description, config)
        .context("Game creation failed")?;
    let result = registry.get_result(id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_summary(result);
    }
    Ok(())
}

fn description(args: &CreateArgs) -> String {
    if args.words.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        args.words.join(" ")
    }
}

/// Merge preset, settings and flags into one config. Flags win.
fn build_config(args: &CreateArgs, settings: &Settings) -> Result<GameConfig> {
    let mut config = match &args.preset {
        Some(name) => match presets::preset(name) {
            Some(config) => config,
            None => anyhow::bail!(
                "Unknown preset '{name}' (available: {})",
                presets::PRESET_NAMES.join(", ")
            ),
        },
        None => GameConfig::default().with_complexity(settings.default_complexity.clone()),
    };

    if let Some(name) = &args.engine {
        config.engine = GameEngine::from_name(name)
            .with_context(|| format!("Unknown engine '{}'", name))?;
    }
    if let Some(complexity) = &args.complexity {
        config.complexity = complexity.clone();
    }
    if let Some(audience) = &args.audience {
        config.target_audience = audience.clone();
    }
    config.features.extend(args.features.iter().cloned());

    Ok(config)
}

fn print_summary(result: &GameResult) {
    println!("✓ Game Created: {}", result.title);
    println!("  Engine: {}", result.engine);
    println!("  Files:  {}", result.files_generated.join(", "));
    println!("  Output: {}", result.output_directory);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CreateArgs {
        CreateArgs {
            words: Vec::new(),
            engine: None,
            complexity: None,
            audience: None,
            features: Vec::new(),
            preset: None,
            json: false,
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(description(&args()), DEFAULT_DESCRIPTION);

        let mut a = args();
        a.words = vec!["tiny".into(), "roguelike".into()];
        assert_eq!(description(&a), "tiny roguelike");
    }

    #[test]
    fn test_default_config_uses_settings() {
        let settings = Settings {
            default_complexity: "simple".to_string(),
            ..Settings::default()
        };
        let config = build_config(&args(), &settings).unwrap();
        assert_eq!(config.engine, GameEngine::Auto);
        assert_eq!(config.complexity, "simple");
    }

    #[test]
    fn test_flags_override_preset() {
        let mut a = args();
        a.preset = Some("advanced_rts".into());
        a.engine = Some("godot".into());
        a.features = vec!["replays".into()];

        let config = build_config(&a, &Settings::default()).unwrap();
        assert_eq!(config.engine, GameEngine::Godot);
        assert_eq!(config.complexity, "advanced");
        assert_eq!(config.features.last().map(String::as_str), Some("replays"));
    }

    #[test]
    fn test_unknown_engine_and_preset() {
        let mut a = args();
        a.engine = Some("unreal".into());
        assert!(build_config(&a, &Settings::default()).is_err());

        let mut a = args();
        a.preset = Some("mmo".into());
        let err = build_config(&a, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("simple_platformer"));
    }

    #[test]
    fn test_execute_rejects_empty_description() {
        let mut a = args();
        a.words = vec![String::new()];
        assert!(execute(a, Settings::default()).is_err());
    }
}
