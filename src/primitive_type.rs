//! The seven JSON-Schema primitive type names and membership tests over
//! [`serde_json::Value`].
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// One of the seven JSON-Schema primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Null => "null",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Array => "array",
            PrimitiveType::Object => "object",
        };
        f.write_str(name)
    }
}

impl PrimitiveType {
    fn from_name(name: &str) -> Option<PrimitiveType> {
        Some(match name {
            "null" => PrimitiveType::Null,
            "boolean" => PrimitiveType::Boolean,
            "integer" => PrimitiveType::Integer,
            "number" => PrimitiveType::Number,
            "string" => PrimitiveType::String,
            "array" => PrimitiveType::Array,
            "object" => PrimitiveType::Object,
            _ => return None,
        })
    }
}

/// A JSON number whose fractional part is exactly zero counts as an
/// `integer`, regardless of how it was written (`5` or `5.0`).
fn is_integer_valued(value: &Value) -> bool {
    match value.as_f64() {
        Some(f) if value.is_i64() || value.is_u64() => {
            let _ = f;
            true
        }
        Some(f) => f.fract() == 0.0 && f.is_finite(),
        None => false,
    }
}

fn matches_builtin(instance: &Value, ty: PrimitiveType) -> bool {
    match ty {
        PrimitiveType::Null => instance.is_null(),
        PrimitiveType::Boolean => instance.is_boolean(),
        PrimitiveType::Integer => instance.is_number() && !instance.is_boolean() && is_integer_valued(instance),
        PrimitiveType::Number => instance.is_number() && !instance.is_boolean(),
        PrimitiveType::String => instance.is_string(),
        PrimitiveType::Array => instance.is_array(),
        PrimitiveType::Object => instance.is_object(),
    }
}

/// Raised when a `type` keyword (or an override table lookup) names a type
/// this registry has never heard of.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown type: {0}")]
pub struct UnknownTypeError(pub String);

/// Membership tests over the seven built-in primitive type names, with room
/// for caller-supplied overrides (extra type names backed by an arbitrary
/// predicate).
#[derive(Default)]
pub struct TypeRegistry {
    overrides: HashMap<String, Box<dyn Fn(&Value) -> bool + Send + Sync>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry { overrides: HashMap::new() }
    }

    /// Register an additional type name matched by `predicate`. Shadows a
    /// built-in name if it collides.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.overrides.insert(name.into(), Box::new(predicate));
    }

    /// `is_type(instance, type_name)`.
    pub fn is_type(&self, instance: &Value, type_name: &str) -> Result<bool, UnknownTypeError> {
        if let Some(predicate) = self.overrides.get(type_name) {
            return Ok(predicate(instance));
        }
        match PrimitiveType::from_name(type_name) {
            Some(ty) => Ok(matches_builtin(instance, ty)),
            None => Err(UnknownTypeError(type_name.to_string())),
        }
    }
}
