//! YAML flattening into dot-separated keys

use serde::Deserialize;
use serde_yaml::Value;

use crate::application::errors::RuntimeConfigError;

/// Flatten every document of `content` into ordered `(key, value)` pairs.
///
/// Nested mappings join their keys with `.`, sequences append `[index]`, and
/// documents are emitted in order so later documents override earlier ones when
/// the caller inserts the pairs into a map.
pub fn flatten_yaml(content: &str) -> Result<Vec<(String, String)>, RuntimeConfigError> {
    let mut entries = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        flatten_value(None, &value, &mut entries);
    }

    Ok(entries)
}

fn flatten_value(prefix: Option<&str>, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(mapping) => {
            if mapping.is_empty() {
                if let Some(key) = prefix {
                    out.push((key.to_string(), String::new()));
                }
                return;
            }
            for (key, child) in mapping {
                let Some(segment) = scalar_to_string(key) else {
                    continue;
                };
                let path = match prefix {
                    Some(parent) => format!("{}.{}", parent, segment),
                    None => segment,
                };
                flatten_value(Some(&path), child, out);
            }
        }
        Value::Sequence(items) => {
            let Some(key) = prefix else {
                return;
            };
            if items.is_empty() {
                out.push((key.to_string(), String::new()));
                return;
            }
            for (index, item) in items.iter().enumerate() {
                flatten_value(Some(&format!("{}[{}]", key, index)), item, out);
            }
        }
        Value::Tagged(tagged) => flatten_value(prefix, &tagged.value, out),
        scalar => {
            if let (Some(key), Some(text)) = (prefix, scalar_to_string(scalar)) {
                out.push((key.to_string(), text));
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Mapping(_) | Value::Sequence(_) => None,
    }
}
