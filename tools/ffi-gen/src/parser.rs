//! Parser for exported `extern "C"` functions using syn

use anyhow::{Context, Result};
use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use std::path::Path;
use syn::{Item, ItemFn, ReturnType, Type as SynType};

use crate::model::{Category, FfiFunction, FfiModel, Parameter, Type};

/// Category used for functions that appear before any section banner.
const DEFAULT_CATEGORY: &str = "General";

/// Parse exported functions from a Rust source file.
pub fn parse_ffi_file(path: impl AsRef<Path>) -> Result<FfiModel> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_ffi_source(&content)
}

/// Parse exported functions from Rust source code.
///
/// A function is exported when it is `pub`, uses the C ABI and carries a
/// `no_mangle` attribute. Categories come from `// ====` section banners.
pub fn parse_ffi_source(source: &str) -> Result<FfiModel> {
    let file = syn::parse_file(source).context("Failed to parse Rust source")?;
    let sections = scan_sections(source);

    let mut functions = Vec::new();
    let mut categories: Vec<Category> = Vec::new();

    for item in &file.items {
        let Item::Fn(func) = item else {
            continue;
        };
        if !is_exported(func) {
            continue;
        }

        let name = func.sig.ident.to_string();
        let category = sections
            .iter()
            .find(|(fn_name, _)| *fn_name == name)
            .map(|(_, category)| category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        if !categories.iter().any(|c| c.name == category) {
            categories.push(Category {
                name: category.clone(),
            });
        }

        functions.push(parse_function(func, &category));
    }

    Ok(FfiModel {
        functions,
        categories,
    })
}

fn is_exported(func: &ItemFn) -> bool {
    let is_pub = matches!(func.vis, syn::Visibility::Public(_));
    let is_c_abi = func
        .sig
        .abi
        .as_ref()
        .and_then(|abi| abi.name.as_ref())
        .is_some_and(|name| name.value() == "C");
    let no_mangle = func
        .attrs
        .iter()
        .any(|attr| contains_ident(attr.meta.to_token_stream(), "no_mangle"));

    is_pub && is_c_abi && no_mangle
}

/// Search a token stream, including nested groups, for an identifier.
///
/// Covers both `#[no_mangle]` and `#[unsafe(no_mangle)]`.
fn contains_ident(tokens: TokenStream, ident: &str) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(i) => i == ident,
        TokenTree::Group(g) => contains_ident(g.stream(), ident),
        _ => false,
    })
}

fn parse_function(func: &ItemFn, category: &str) -> FfiFunction {
    let params = func
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Typed(pat_type) => Some(pat_type),
            syn::FnArg::Receiver(_) => None,
        })
        .map(|pat_type| {
            let name = if let syn::Pat::Ident(ident) = &*pat_type.pat {
                ident.ident.to_string()
            } else {
                "arg".to_string()
            };
            Parameter {
                name,
                ty: Type::new(&type_to_string(&pat_type.ty)),
            }
        })
        .collect();

    let return_type = match &func.sig.output {
        ReturnType::Default => Type::new("()"),
        ReturnType::Type(_, ty) => Type::new(&type_to_string(ty)),
    };

    FfiFunction {
        name: func.sig.ident.to_string(),
        params,
        return_type,
        doc_comment: extract_doc_comments(&func.attrs),
        category: category.to_string(),
        is_unsafe: func.sig.unsafety.is_some(),
    }
}

/// Map each exported function name to the section banner above it.
///
/// A banner is a `// Name` line framed by `// ====` lines. Plain comments
/// are not part of the syn tree, so this works on the raw text.
fn scan_sections(source: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = source.lines().map(str::trim).collect();
    let mut current = DEFAULT_CATEGORY.to_string();
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_banner_rule(line)
            && let (Some(title), Some(close)) = (lines.get(i + 1), lines.get(i + 2))
            && is_banner_rule(close)
            && let Some(name) = title.strip_prefix("//")
        {
            let name = name.trim();
            if !name.is_empty() {
                current = name.to_string();
            }
            continue;
        }

        if let Some(rest) = line.split("extern \"C\" fn ").nth(1)
            && let Some(name) = rest.split('(').next()
        {
            out.push((name.trim().to_string(), current.clone()));
        }
    }

    out
}

fn is_banner_rule(line: &str) -> bool {
    line.strip_prefix("//")
        .map(str::trim)
        .is_some_and(|rest| rest.len() >= 4 && rest.chars().all(|c| c == '='))
}

/// Extract documentation comments from attributes
fn extract_doc_comments(attrs: &[syn::Attribute]) -> String {
    let mut doc = String::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(meta) = &attr.meta
            && let syn::Expr::Lit(expr_lit) = &meta.value
            && let syn::Lit::Str(lit_str) = &expr_lit.lit
        {
            if !doc.is_empty() {
                doc.push('\n');
            }
            doc.push_str(lit_str.value().trim());
        }
    }

    doc
}

/// Convert syn::Type to string representation
fn type_to_string(ty: &SynType) -> String {
    match ty {
        // Last segment only: `std::ffi::c_char` and `c_char` map the same
        SynType::Path(type_path) => match type_path.path.segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => ty.to_token_stream().to_string(),
        },
        SynType::Ptr(type_ptr) => {
            let mutability = if type_ptr.mutability.is_some() {
                "*mut "
            } else {
                "*const "
            };
            format!("{}{}", mutability, type_to_string(&type_ptr.elem))
        }
        SynType::Tuple(type_tuple) if type_tuple.elems.is_empty() => "()".to_string(),
        _ => ty.to_token_stream().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        // =============================================================================
        // Lifecycle
        // =============================================================================

        /// Start up.
        #[unsafe(no_mangle)]
        pub extern "C" fn lib_init() -> i32 { 0 }

        fn helper() {}

        #[unsafe(no_mangle)]
        extern "C" fn not_public() {}

        // =============================================================================
        // Strings
        // =============================================================================

        /// Release a string.
        ///
        /// Null is ignored.
        #[no_mangle]
        pub unsafe extern "C" fn lib_free(ptr: *mut std::ffi::c_char) {}

        pub extern "C" fn missing_attr() {}
    "#;

    #[test]
    fn test_parse_exported_functions_only() {
        let model = parse_ffi_source(SAMPLE).unwrap();
        let names: Vec<_> = model.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["lib_init", "lib_free"]);
    }

    #[test]
    fn test_signature_details() {
        let model = parse_ffi_source(SAMPLE).unwrap();

        let init = model.function("lib_init").unwrap();
        assert!(init.params.is_empty());
        assert_eq!(init.return_type.c_type, "int32_t");
        assert!(!init.is_unsafe);
        assert_eq!(init.doc_comment, "Start up.");

        let free = model.function("lib_free").unwrap();
        assert!(free.is_unsafe);
        assert_eq!(free.params[0].name, "ptr");
        assert_eq!(free.params[0].ty.c_type, "char*");
        assert!(free.return_type.is_void());
        assert_eq!(free.doc_comment, "Release a string.\n\nNull is ignored.");
    }

    #[test]
    fn test_categories_follow_banners() {
        let model = parse_ffi_source(SAMPLE).unwrap();
        assert_eq!(model.function("lib_init").unwrap().category, "Lifecycle");
        assert_eq!(model.function("lib_free").unwrap().category, "Strings");

        let names: Vec<_> = model.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Lifecycle", "Strings"]);
    }

    #[test]
    fn test_type_conversion() {
        assert_eq!(
            type_to_string(&syn::parse_str::<SynType>("u32").unwrap()),
            "u32"
        );
        assert_eq!(
            type_to_string(&syn::parse_str::<SynType>("()").unwrap()),
            "()"
        );
        assert_eq!(
            type_to_string(&syn::parse_str::<SynType>("*const std::ffi::c_char").unwrap()),
            "*const c_char"
        );
    }

    #[test]
    fn test_parse_library_source() {
        let model = parse_ffi_source(include_str!("../../../ffi/src/lib.rs")).unwrap();
        assert_eq!(model.functions.len(), 10);
        assert!(model.has_all(&[
            "ai_game_dev_init",
            "ai_game_dev_cleanup",
            "ai_game_dev_create_game",
            "ai_game_dev_create_game_envelope",
            "ai_game_dev_get_result",
            "ai_game_dev_get_result_envelope",
            "ai_game_dev_supported_engines",
            "ai_game_dev_version",
            "ai_game_dev_get_last_error",
            "ai_game_dev_free_string",
        ]));
        assert_eq!(
            model.function("ai_game_dev_create_game").unwrap().category,
            "Generation"
        );
        assert_eq!(
            model.function("ai_game_dev_free_string").unwrap().category,
            "Memory"
        );
    }
}
