//! Shape coercion for loosely-typed compose fields.
//!
//! Every check starts by normalizing the fields it reads through the
//! helpers here, so no check inspects raw value shapes itself.

use serde_yaml::Value;

/// Strip YAML tags such as `!reset` or `!override` down to the tagged value.
pub fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Coerce a scalar-or-list field into a list.
///
/// Absent and `null` give an empty list, a sequence gives its items, and any
/// other value becomes a one-element list. Tags are looked through.
pub fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value.map(untag) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Like [`as_list`], rendering every item as text.
pub fn as_text_list(value: Option<&Value>) -> Vec<String> {
    as_list(value).into_iter().map(text).collect()
}

/// Extract `(name, value)` pairs from an `environment` field.
///
/// Accepts the mapping form (`NAME: value`) and the list form
/// (`- NAME=value`, split on the first `=`; items without `=` are skipped).
pub fn env_items(environment: Option<&Value>) -> Vec<(String, Value)> {
    let Some(environment) = environment.filter(|v| is_truthy(v)) else {
        return Vec::new();
    };

    if let Value::Mapping(entries) = untag(environment) {
        return entries
            .iter()
            .map(|(name, value)| (text(name), value.clone()))
            .collect();
    }

    as_list(Some(environment))
        .into_iter()
        .filter_map(|item| {
            let entry = text(item);
            entry
                .split_once('=')
                .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        })
        .collect()
}

/// Network names referenced by a service.
///
/// The short syntax is a list of names; the long syntax is a mapping keyed
/// by network name.
pub fn network_refs(networks: Option<&Value>) -> Vec<String> {
    match networks.map(untag) {
        Some(Value::Mapping(entries)) => entries.keys().map(text).collect(),
        other => as_text_list(other),
    }
}

/// Loose truthiness: `null`, `false`, zero, and empty strings or
/// collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(entries) => !entries.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Whether an optional field is present and truthy.
pub fn is_set(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Render a value as the text a user wrote.
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml::to_string(value).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}
