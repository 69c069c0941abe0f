//! Intermediate representation for exported C functions

use serde::{Deserialize, Serialize};

/// Complete FFI model extracted from Rust source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfiModel {
    pub functions: Vec<FfiFunction>,
    pub categories: Vec<Category>,
}

impl FfiModel {
    pub fn function(&self, name: &str) -> Option<&FfiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn has_all(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.function(name).is_some())
    }
}

/// Single exported function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfiFunction {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub doc_comment: String,
    pub category: String,
    /// Declared `unsafe extern "C"` (takes raw pointers from the caller)
    pub is_unsafe: bool,
}

/// Function parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

/// Type representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub rust_type: String,
    pub c_type: String,
}

impl Type {
    /// Create a new type with automatic C mapping
    pub fn new(rust_type: &str) -> Self {
        Self {
            rust_type: rust_type.to_string(),
            c_type: map_rust_to_c(rust_type),
        }
    }

    pub fn is_void(&self) -> bool {
        self.rust_type == "()"
    }

    /// Library-owned string handed to the caller
    pub fn is_owned_string(&self) -> bool {
        self.rust_type == "*mut c_char"
    }

    /// Borrowed string passed in by the caller
    pub fn is_borrowed_string(&self) -> bool {
        self.rust_type == "*const c_char"
    }
}

/// Section banner title, in source order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Map Rust type to C type
pub fn map_rust_to_c(rust_type: &str) -> String {
    if let Some(inner) = rust_type.strip_prefix("*const ") {
        return format!("const {}*", map_rust_to_c(inner));
    } else if let Some(inner) = rust_type.strip_prefix("*mut ") {
        return format!("{}*", map_rust_to_c(inner));
    }

    match rust_type {
        "c_char" => "char".to_string(),
        "c_int" => "int".to_string(),
        "bool" => "bool".to_string(),
        "u8" => "uint8_t".to_string(),
        "u16" => "uint16_t".to_string(),
        "u32" => "uint32_t".to_string(),
        "u64" => "uint64_t".to_string(),
        "i8" => "int8_t".to_string(),
        "i16" => "int16_t".to_string(),
        "i32" => "int32_t".to_string(),
        "i64" => "int64_t".to_string(),
        "usize" => "size_t".to_string(),
        "f32" => "float".to_string(),
        "f64" => "double".to_string(),
        "()" => "void".to_string(),
        _ => rust_type.to_string(),
    }
}
