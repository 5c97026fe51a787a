//! The two meta-schemas, embedded as literal JSON constants (SPEC_FULL.md
//! §8 "Out of scope: ... the meta-schemas themselves are specified as
//! literal constants rather than derived").
use serde_json::Value;

const DRAFT3_JSON: &str = include_str!("meta_schemas/draft3.json");
const DRAFT4_JSON: &str = include_str!("meta_schemas/draft4.json");

lazy_static::lazy_static! {
    static ref DRAFT3: Value = serde_json::from_str(DRAFT3_JSON).expect("embedded draft-03 meta-schema is valid JSON");
    static ref DRAFT4: Value = serde_json::from_str(DRAFT4_JSON).expect("embedded draft-04 meta-schema is valid JSON");
}

/// The draft-03 meta-schema document.
pub fn draft3() -> Value {
    DRAFT3.clone()
}

/// The draft-04 meta-schema document.
pub fn draft4() -> Value {
    DRAFT4.clone()
}
