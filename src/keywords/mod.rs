//! Per-draft keyword dispatch tables (SPEC_FULL.md §4.4, §4.9 "Mixin-based
//! draft composition"): common rules shared by both drafts, plus each
//! draft's own `type`/`properties`/membership-composition rules, collected
//! into a static [`KeywordTable`] built once per draft.
use std::collections::HashMap;

use crate::eval::KeywordFn;
use crate::schemas::Draft;

pub(crate) mod array_checks;
pub(crate) mod dependencies;
pub(crate) mod draft3;
pub(crate) mod draft4;
pub(crate) mod enum_;
pub(crate) mod helpers;
pub(crate) mod items;
pub(crate) mod numeric;
pub(crate) mod properties;
pub(crate) mod ref_;
pub(crate) mod string_checks;

pub(crate) type KeywordTable = HashMap<&'static str, KeywordFn>;

fn insert_common(table: &mut KeywordTable) {
    table.insert("patternProperties", properties::pattern_properties);
    table.insert("additionalProperties", properties::additional_properties);
    table.insert("items", items::items);
    table.insert("additionalItems", items::additional_items);
    table.insert("minimum", numeric::minimum);
    table.insert("maximum", numeric::maximum);
    table.insert("minItems", array_checks::min_items);
    table.insert("maxItems", array_checks::max_items);
    table.insert("minLength", string_checks::min_length);
    table.insert("maxLength", string_checks::max_length);
    table.insert("uniqueItems", array_checks::unique_items);
    table.insert("pattern", string_checks::pattern);
    table.insert("format", string_checks::format);
    table.insert("dependencies", dependencies::dependencies);
    table.insert("enum", enum_::enum_);
}

fn build_draft3_table() -> KeywordTable {
    let mut table = KeywordTable::new();
    insert_common(&mut table);
    table.insert("divisibleBy", numeric::multiple_of);
    table.insert("type", draft3::type_);
    table.insert("properties", draft3::properties);
    table.insert("disallow", draft3::disallow);
    table.insert("extends", draft3::extends);
    table
}

fn build_draft4_table() -> KeywordTable {
    let mut table = KeywordTable::new();
    insert_common(&mut table);
    table.insert("multipleOf", numeric::multiple_of);
    table.insert("type", draft4::type_);
    table.insert("properties", draft4::properties);
    table.insert("required", draft4::required);
    table.insert("minProperties", draft4::min_properties);
    table.insert("maxProperties", draft4::max_properties);
    table.insert("allOf", draft4::all_of);
    table.insert("anyOf", draft4::any_of);
    table.insert("oneOf", draft4::one_of);
    table.insert("not", draft4::not);
    table
}

lazy_static::lazy_static! {
    static ref DRAFT3_TABLE: KeywordTable = build_draft3_table();
    static ref DRAFT4_TABLE: KeywordTable = build_draft4_table();
}

pub(crate) fn table_for(draft: Draft) -> &'static KeywordTable {
    match draft {
        Draft::Draft3 => &DRAFT3_TABLE,
        Draft::Draft4 => &DRAFT4_TABLE,
    }
}
