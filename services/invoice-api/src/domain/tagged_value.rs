/// Store-level tagged value
///
/// The invoice table stores every field as a single-entry mapping from a
/// type tag to a raw value, e.g. `{"S": "abc"}` or `{"N": "12.50"}`.
/// This type models that wrapping independently of the store SDK.
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A value wrapped with the tag naming its primitive kind
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    /// String (`S`)
    S(String),

    /// Number (`N`), kept in its textual form
    N(String),

    /// Boolean (`BOOL`)
    Bool(bool),

    /// Null (`NULL`)
    Null,

    /// List (`L`)
    L(Vec<TaggedValue>),

    /// Map (`M`)
    M(BTreeMap<String, TaggedValue>),
}

impl TaggedValue {
    /// Tag name as the store writes it
    pub fn tag(&self) -> &'static str {
        match self {
            TaggedValue::S(_) => "S",
            TaggedValue::N(_) => "N",
            TaggedValue::Bool(_) => "BOOL",
            TaggedValue::Null => "NULL",
            TaggedValue::L(_) => "L",
            TaggedValue::M(_) => "M",
        }
    }

    /// Discard the tag and keep only the raw value
    ///
    /// Total: every variant has a JSON form. Numbers stay textual; nested
    /// lists and maps are un-tagged recursively.
    pub fn untag(&self) -> Value {
        match self {
            TaggedValue::S(s) => Value::String(s.clone()),
            TaggedValue::N(n) => Value::String(n.clone()),
            TaggedValue::Bool(b) => Value::Bool(*b),
            TaggedValue::Null => Value::Null,
            TaggedValue::L(items) => Value::Array(items.iter().map(TaggedValue::untag).collect()),
            TaggedValue::M(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.untag()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Raw text usable as the source of a numeric conversion (`N` or `S`)
    pub fn as_number_text(&self) -> Option<&str> {
        match self {
            TaggedValue::N(text) | TaggedValue::S(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untag_string() {
        let value = TaggedValue::S("abc".to_string());
        assert_eq!(value.untag(), json!("abc"));
    }

    #[test]
    fn test_untag_number_keeps_text() {
        let value = TaggedValue::N("12.50".to_string());
        assert_eq!(value.untag(), json!("12.50"));
    }

    #[test]
    fn test_untag_bool_and_null() {
        assert_eq!(TaggedValue::Bool(true).untag(), json!(true));
        assert_eq!(TaggedValue::Bool(false).untag(), json!(false));
        assert_eq!(TaggedValue::Null.untag(), Value::Null);
    }

    #[test]
    fn test_untag_list_is_recursive() {
        let value = TaggedValue::L(vec![
            TaggedValue::S("a".to_string()),
            TaggedValue::N("1".to_string()),
            TaggedValue::Null,
        ]);
        assert_eq!(value.untag(), json!(["a", "1", null]));
    }

    #[test]
    fn test_untag_map_is_recursive() {
        let mut inner = BTreeMap::new();
        inner.insert("city".to_string(), TaggedValue::S("Recife".to_string()));
        inner.insert(
            "codes".to_string(),
            TaggedValue::L(vec![TaggedValue::N("2611606".to_string())]),
        );
        let value = TaggedValue::M(inner);

        assert_eq!(value.untag(), json!({"city": "Recife", "codes": ["2611606"]}));
    }

    #[test]
    fn test_untag_empty_collections() {
        assert_eq!(TaggedValue::L(vec![]).untag(), json!([]));
        assert_eq!(TaggedValue::M(BTreeMap::new()).untag(), json!({}));
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(TaggedValue::S(String::new()).tag(), "S");
        assert_eq!(TaggedValue::N(String::new()).tag(), "N");
        assert_eq!(TaggedValue::Bool(true).tag(), "BOOL");
        assert_eq!(TaggedValue::Null.tag(), "NULL");
        assert_eq!(TaggedValue::L(vec![]).tag(), "L");
        assert_eq!(TaggedValue::M(BTreeMap::new()).tag(), "M");
    }

    #[test]
    fn test_as_number_text() {
        assert_eq!(TaggedValue::N("150.5".to_string()).as_number_text(), Some("150.5"));
        assert_eq!(TaggedValue::S("150.5".to_string()).as_number_text(), Some("150.5"));
        assert_eq!(TaggedValue::Bool(true).as_number_text(), None);
        assert_eq!(TaggedValue::Null.as_number_text(), None);
        assert_eq!(TaggedValue::L(vec![]).as_number_text(), None);
    }
}
