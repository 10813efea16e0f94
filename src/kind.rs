//! Primitive type-token classification and the Swagger `(type, format)` table.
//!
//! Resolution is a total function over a closed set of kinds: every token the
//! table does not recognize lands in [`Kind::Unresolved`], and callers fall
//! back to the raw token with the literal `"UNKNOWN"` format. The fallback is
//! deliberate output, not an error.

/// The closed set of recognized type-token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Int8,
    Int16,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint64,
    Bool,
    String,
    Float32,
    Float64,
    /// `[]T` where the element token, with all `[]` markers stripped, is a
    /// recognized primitive
    Sequence,
    /// Anything else: struct references, arrays of structs, maps, pointers,
    /// interfaces, and the 32-bit tokens the table never carried
    Unresolved,
}

impl Kind {
    /// Classify a raw type token.
    pub fn from_token(token: &str) -> Kind {
        if token.starts_with("[]") {
            let element = token.replace("[]", "");
            if Kind::primitive_from_token(&element) != Kind::Unresolved {
                return Kind::Sequence;
            }
            return Kind::Unresolved;
        }
        Kind::primitive_from_token(token)
    }

    fn primitive_from_token(token: &str) -> Kind {
        match token {
            "int" => Kind::Int,
            "int8" => Kind::Int8,
            "int16" => Kind::Int16,
            "int64" => Kind::Int64,
            "uint" => Kind::Uint,
            "uint8" => Kind::Uint8,
            "uint16" => Kind::Uint16,
            "uint64" => Kind::Uint64,
            "bool" => Kind::Bool,
            "string" => Kind::String,
            "float32" => Kind::Float32,
            "float64" => Kind::Float64,
            _ => Kind::Unresolved,
        }
    }
}

/// Swagger `(type, format)` pair for a kind.
///
/// For [`Kind::Sequence`] the "type" is the element token with the sequence
/// markers stripped and the format is empty; the caller re-resolves the
/// element. [`Kind::Unresolved`] yields `None` and the caller substitutes the
/// raw token with format `"UNKNOWN"`.
pub fn primitive_schema(kind: Kind, token: &str) -> Option<(String, String)> {
    let pair = match kind {
        Kind::Int => ("integer", "int32"),
        Kind::Int8 => ("integer", "int8"),
        Kind::Int16 => ("integer", "int16"),
        Kind::Int64 => ("integer", "int64"),
        Kind::Uint => ("integer", "uint32"),
        Kind::Uint8 => ("integer", "uint8"),
        Kind::Uint16 => ("integer", "uint16"),
        Kind::Uint64 => ("integer", "uint64"),
        Kind::Bool => ("boolean", "boolean"),
        Kind::String => ("string", ""),
        Kind::Float32 => ("number", "float"),
        Kind::Float64 => ("number", "double"),
        Kind::Sequence => return Some((token.replace("[]", ""), String::new())),
        Kind::Unresolved => return None,
    };
    Some((pair.0.to_string(), pair.1.to_string()))
}
