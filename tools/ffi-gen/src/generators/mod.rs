//! Header generators

pub mod c;
pub mod cpp;

/// Banner written at the top of every generated file.
pub const GENERATED_NOTICE: &str = "// GENERATED FILE - DO NOT EDIT\n// Source: ffi/src/lib.rs\n// Generator: tools/ffi-gen\n";

/// Base name of the C header, used by the C++ header's include.
pub const C_HEADER_NAME: &str = "ai_game_dev.h";

/// Base name of the C++ header.
pub const CPP_HEADER_NAME: &str = "ai_game_dev.hpp";
