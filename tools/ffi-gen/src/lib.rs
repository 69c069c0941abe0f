//! FFI binding generator library
//!
//! Reads the exported functions of `ffi/src/lib.rs` and writes the C and
//! C++ headers under `include/`.

pub mod generators;
pub mod model;
pub mod parser;
pub mod verify;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::generators::{C_HEADER_NAME, CPP_HEADER_NAME};
use crate::model::FfiModel;

/// Location of the exported functions, relative to the workspace root.
const FFI_SOURCE: &str = "ffi/src/lib.rs";

/// A generated header and where it belongs.
struct Output {
    path: PathBuf,
    contents: String,
    label: &'static str,
}

/// Parse the library's exported functions.
pub fn load_model(workspace_root: &Path) -> Result<FfiModel> {
    let source = workspace_root.join(FFI_SOURCE);
    parser::parse_ffi_file(&source)
        .with_context(|| format!("Failed to parse FFI source {}", source.display()))
}

fn render(workspace_root: &Path, model: &FfiModel) -> Result<Vec<Output>> {
    let include = workspace_root.join("include");
    Ok(vec![
        Output {
            path: include.join(C_HEADER_NAME),
            contents: generators::c::generate_c_header(model)
                .context("Failed to generate C header")?,
            label: "C header",
        },
        Output {
            path: include.join(CPP_HEADER_NAME),
            contents: generators::cpp::generate_cpp_header(model)
                .context("Failed to generate C++ header")?,
            label: "C++ header",
        },
    ])
}

/// Write both headers.
pub fn generate(workspace_root: &Path) -> Result<()> {
    let model = load_model(workspace_root)?;
    println!("Parsed {} functions", model.functions.len());

    let include = workspace_root.join("include");
    std::fs::create_dir_all(&include)
        .with_context(|| format!("Failed to create {}", include.display()))?;

    for output in render(workspace_root, &model)? {
        std::fs::write(&output.path, &output.contents)
            .with_context(|| format!("Failed to write {}", output.path.display()))?;
        println!("Generated {}: {}", output.label, output.path.display());
    }

    Ok(())
}

/// Compare the headers on disk with freshly generated ones.
///
/// A missing header counts as out of sync.
pub fn check(workspace_root: &Path) -> Result<bool> {
    let model = load_model(workspace_root)?;
    let mut in_sync = true;

    for output in render(workspace_root, &model)? {
        let existing = std::fs::read_to_string(&output.path).unwrap_or_default();
        if existing == output.contents {
            println!("✓ {} in sync: {}", output.label, output.path.display());
        } else {
            println!("✗ {} out of sync: {}", output.label, output.path.display());
            in_sync = false;
        }
    }

    Ok(in_sync)
}

/// Compile the headers on disk with the system C++ compiler.
pub fn verify(workspace_root: &Path) -> Result<()> {
    let include = workspace_root.join("include");
    verify::verify_headers(&include)?;
    let header = include.join(CPP_HEADER_NAME);
    println!("  ✓ C++ header compiles: {}", header.display());
    Ok(())
}

/// Find the workspace root: the nearest ancestor with a Cargo.toml and the
/// FFI source.
pub fn find_workspace_root() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;

    loop {
        if current.join("Cargo.toml").exists() && current.join(FFI_SOURCE).exists() {
            return Ok(current);
        }

        if !current.pop() {
            anyhow::bail!("Could not find workspace root (no {FFI_SOURCE} above the current directory)");
        }
    }
}
