//! Template-driven game generation.
//!
//! All functions here are pure: a description and a config map to the
//! same [`GameResult`] every time.

use aigamedev_shared::{GameConfig, GameEngine, GameResult};

use crate::error::GenerationError;

/// Title used when the description has no words.
pub const FALLBACK_TITLE: &str = "AI Generated Game";

/// Directory name used when sanitization leaves nothing.
pub const FALLBACK_DIR_NAME: &str = "ai_game";

/// Root that output directories are placed under by default.
pub const DEFAULT_OUTPUT_ROOT: &str = "./generated_games";

const TITLE_PREFIX: &str = "AI Generated";
const TITLE_MAX_WORDS: usize = 3;

/// Build the result for one generation request.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyDescription`] for an empty description.
/// A whitespace-only description is accepted and gets the fallback title.
pub fn generate_game(
    description: &str,
    config: &GameConfig,
    output_root: &str,
) -> Result<GameResult, GenerationError> {
    if description.is_empty() {
        return Err(GenerationError::EmptyDescription);
    }

    Ok(GameResult {
        title: generate_title(description),
        description: description.to_string(),
        engine: config.engine.name().to_string(),
        success: true,
        files_generated: file_list(config.engine)
            .iter()
            .map(|path| path.to_string())
            .collect(),
        output_directory: format!(
            "{}/{}",
            output_root.trim_end_matches('/'),
            sanitize(description)
        ),
        error_message: String::new(),
    })
}

/// Derive a title from the first three words of a description.
///
/// `"a fast paced space shooter"` becomes `"AI Generated A Fast Paced"`.
pub fn generate_title(description: &str) -> String {
    let mut words = description
        .split_whitespace()
        .take(TITLE_MAX_WORDS)
        .peekable();

    if words.peek().is_none() {
        return FALLBACK_TITLE.to_string();
    }

    let mut title = String::from(TITLE_PREFIX);
    for word in words {
        title.push(' ');
        title.push_str(&title_case(word));
    }
    title
}

/// Lowercase a word, then title-case every letter that starts a run.
///
/// A run starts at the beginning of the word and after any separator, so
/// `"FAST-paced"` becomes `"Fast-Paced"`. Mapping is per character and never
/// changes the character count: `ß` stays `ß` and `ǆ` becomes `ǅ`.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;

    for c in word.chars().map(to_lower) {
        out.push(if at_boundary { to_title(c) } else { c });
        at_boundary = is_separator(c);
    }
    out
}

fn to_lower(c: char) -> char {
    // Only U+0130 lowercases to more than one char; its first is `i`
    c.to_lowercase().next().unwrap_or(c)
}

fn to_title(c: char) -> char {
    match c {
        // Latin digraphs have a titlecase form distinct from uppercase
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

/// Project skeleton for an engine. Paths ending in `/` are directories.
pub fn file_list(engine: GameEngine) -> &'static [&'static str] {
    match engine {
        GameEngine::Bevy => &[
            "Cargo.toml",
            "src/main.rs",
            "src/components.rs",
            "src/systems.rs",
            "src/resources.rs",
            "assets/sprites/",
            "assets/audio/",
        ],
        GameEngine::Godot => &[
            "project.godot",
            "scenes/Main.tscn",
            "scripts/Main.gd",
            "scripts/Player.gd",
            "assets/sprites/",
            "assets/audio/",
        ],
        GameEngine::Arcade => &[
            "main.py",
            "game.py",
            "sprites.py",
            "assets/",
            "requirements.txt",
            "web_config.json",
        ],
        GameEngine::Auto => &["main.py", "assets/"],
    }
}

/// Reduce a description to a safe directory name.
///
/// Keeps ASCII letters, digits, `_` and `-`, turns spaces into `_` and drops
/// everything else. Falls back to `"ai_game"` if nothing survives.
pub fn sanitize(input: &str) -> String {
    let sanitized: String = input
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => Some(c),
            ' ' => Some('_'),
            _ => None,
        })
        .collect();

    if sanitized.is_empty() {
        FALLBACK_DIR_NAME.to_string()
    } else {
        sanitized
    }
}
