//! Draft identification: which meta-schema URI maps to which draft, and how
//! a schema declares its own resolution-scope id.
use serde_json::Value;

/// The two supported drafts. Unknown or absent `$schema` defaults to
/// [`Draft::Draft4`] (§6 "Schema dispatch").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draft {
    Draft3,
    Draft4,
}

pub(crate) const DRAFT3_URI: &str = "http://json-schema.org/draft-03/schema#";
pub(crate) const DRAFT4_URI: &str = "http://json-schema.org/draft-04/schema#";

impl Draft {
    pub fn meta_schema_uri(self) -> &'static str {
        match self {
            Draft::Draft3 => DRAFT3_URI,
            Draft::Draft4 => DRAFT4_URI,
        }
    }

    /// The keyword both drafts in scope use to declare a resolution-scope
    /// id. `$id` is a draft-06 addition and out of scope (DESIGN.md #3).
    pub(crate) fn id_keyword(self) -> &'static str {
        "id"
    }
}

fn strip_fragment(uri: &str) -> &str {
    uri.split('#').next().unwrap_or(uri)
}

/// `draft_from_url`: match a `$schema` value (fragment-stripped) against the
/// known canonical meta-schema URIs.
pub fn draft_from_url(url: &str) -> Option<Draft> {
    match strip_fragment(url) {
        u if u == strip_fragment(DRAFT3_URI) => Some(Draft::Draft3),
        u if u == strip_fragment(DRAFT4_URI) => Some(Draft::Draft4),
        _ => None,
    }
}

/// `draft_from_schema`: inspect `schema["$schema"]`, defaulting to
/// draft-04 when absent or unrecognized.
pub fn draft_from_schema(schema: &Value) -> Draft {
    schema
        .as_object()
        .and_then(|obj| obj.get("$schema"))
        .and_then(Value::as_str)
        .and_then(draft_from_url)
        .unwrap_or(Draft::Draft4)
}

/// `id_of`: the value of the scope-id keyword at this schema's root, if any.
pub(crate) fn id_of(draft: Draft, schema: &Value) -> Option<&str> {
    schema.as_object()?.get(draft.id_keyword())?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"$schema": "http://json-schema.org/draft-03/schema#"}), Draft::Draft3)]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Draft::Draft4)]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-07/schema#"}), Draft::Draft4)]
    #[test_case(json!({}), Draft::Draft4)]
    fn detects_draft(schema: Value, expected: Draft) {
        assert_eq!(draft_from_schema(&schema), expected);
    }

    #[test]
    fn id_of_reads_id_keyword() {
        let schema = json!({"id": "http://example.com/schema#"});
        assert_eq!(id_of(Draft::Draft4, &schema), Some("http://example.com/schema#"));
    }
}
