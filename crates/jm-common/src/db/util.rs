use serde_json::Value;

/// JSONB string-array column → Vec<String>. Anything that is not an array
/// of strings degrades to an empty list rather than failing the row.
pub(crate) fn parse_string_array(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => vec![],
    }
}
