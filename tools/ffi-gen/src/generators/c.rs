//! C header generator

use anyhow::Result;
use std::fmt::Write as FmtWrite;

use super::GENERATED_NOTICE;
use crate::model::{FfiFunction, FfiModel};

const GUARD: &str = "AI_GAME_DEV_H";

/// Generate C header file from FFI model
pub fn generate_c_header(model: &FfiModel) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "{GENERATED_NOTICE}")?;

    writeln!(output, "#ifndef {GUARD}")?;
    writeln!(output, "#define {GUARD}")?;
    writeln!(output)?;

    writeln!(output, "#include <stdint.h>")?;
    writeln!(output)?;

    writeln!(output, "#ifdef __cplusplus")?;
    writeln!(output, "extern \"C\" {{")?;
    writeln!(output, "#endif")?;
    writeln!(output)?;

    // Group functions by category
    let mut current_category = String::new();
    for func in &model.functions {
        if func.category != current_category {
            current_category = func.category.clone();
            write_banner(&mut output, &current_category)?;
        }

        write_doc(&mut output, &func.doc_comment)?;
        writeln!(output, "{};", declaration(func))?;
        writeln!(output)?;
    }

    writeln!(output, "#ifdef __cplusplus")?;
    writeln!(output, "}}")?;
    writeln!(output, "#endif")?;
    writeln!(output)?;

    writeln!(output, "#endif /* {GUARD} */")?;

    Ok(output)
}

/// `int32_t name(const char* a, ...)`
pub fn declaration(func: &FfiFunction) -> String {
    let params = if func.params.is_empty() {
        "void".to_string()
    } else {
        func.params
            .iter()
            .map(|p| format!("{} {}", p.ty.c_type, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{} {}({})", func.return_type.c_type, func.name, params)
}

fn write_banner(output: &mut String, title: &str) -> Result<()> {
    let rule = "=".repeat(77);
    writeln!(output, "// {rule}")?;
    writeln!(output, "// {title}")?;
    writeln!(output, "// {rule}")?;
    writeln!(output)?;
    Ok(())
}

fn write_doc(output: &mut String, doc: &str) -> Result<()> {
    if doc.is_empty() {
        return Ok(());
    }
    writeln!(output, "/**")?;
    for line in doc.lines() {
        if line.is_empty() {
            writeln!(output, " *")?;
        } else {
            writeln!(output, " * {line}")?;
        }
    }
    writeln!(output, " */")?;
    Ok(())
}
