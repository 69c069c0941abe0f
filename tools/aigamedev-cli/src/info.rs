//! Informational commands (engines, presets)

use aigamedev_core::{SUPPORTED_ENGINES, presets};

pub fn engines() {
    for engine in SUPPORTED_ENGINES {
        println!("{engine}");
    }
}

pub fn presets() {
    for name in presets::PRESET_NAMES {
        if let Some(config) = presets::preset(name) {
            println!(
                "{:<24} engine={:<7} complexity={}",
                name, config.engine, config.complexity
            );
        }
    }
}
