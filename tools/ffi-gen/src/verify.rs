//! Compile checks for the generated headers

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Translation unit that touches every public piece of the C++ header.
const SMOKE_TEST: &str = r#"#include "ai_game_dev.hpp"

void smoke_test() {
    aigamedev::Session session;
    aigamedev::GameConfig config = aigamedev::presets::advanced_rts();
    config.add_feature("replays");

    aigamedev::GameResult result = session.create_game("space shooter", config);
    std::future<aigamedev::GameResult> pending = session.create_game_async("kart racer");
    result = pending.get();
    result = session.create_arcade_game("breakout");
    (void)result;

    std::vector<std::string> engines = session.supported_engines();
    std::optional<aigamedev::GameEngine> engine = aigamedev::string_to_engine(engines.front());
    std::string name = aigamedev::engine_to_string(engine.value_or(aigamedev::GameEngine::Auto));
    std::string envelope = aigamedev::raw::get_result_envelope(0);
    (void)name;
    (void)envelope;
}
"#;

/// C++ compiler used for the checks: `$CXX`, else `c++`.
pub fn compiler() -> String {
    std::env::var("CXX").unwrap_or_else(|_| "c++".to_string())
}

/// Whether the compiler from [`compiler`] can be run.
pub fn compiler_available() -> bool {
    Command::new(compiler())
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Compile the C++ header, which includes the C header, without linking.
pub fn verify_headers(include_dir: &Path) -> Result<()> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let source = scratch.path().join("smoke_test.cpp");
    std::fs::write(&source, SMOKE_TEST)?;

    let cxx = compiler();
    let output = Command::new(&cxx)
        .args(["-std=c++17", "-fsyntax-only"])
        .args(["-Wall", "-Wextra", "-Werror"])
        .arg("-I")
        .arg(include_dir)
        .arg(&source)
        .output()
        .with_context(|| format!("Failed to run {cxx} - is a C++ compiler installed?"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("C++ header failed to compile:\n{stderr}");
    }

    Ok(())
}
