//! Template data substitution

use serde_json::{Map, Value};

/// Replaces every `{{{key}}}` marker in `body` with the matching value from `data`.
///
/// Keys are applied one after another in insertion order and matched
/// literally and case-sensitively. The result is not rescanned once all keys
/// have been applied, so a value containing another key's marker is only
/// expanded if that key comes later in `data`.
pub fn substitute(body: &str, data: &Map<String, Value>) -> String {
    data.iter().fold(body.to_string(), |body, (key, value)| {
        let marker = marker(key);

        if body.contains(&marker) {
            body.replace(&marker, &stringify(value))
        } else {
            body
        }
    })
}

fn marker(key: &str) -> String {
    format!("{{{{{{{key}}}}}}}")
}

/// Strings are inserted verbatim; everything else as its JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
