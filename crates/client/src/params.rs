//! Query-string and form body helpers.
//!
//! Parameters are given as a JSON object. `null` values are skipped, arrays
//! repeat the key once per element, and nested objects in form bodies are
//! flattened into `key[nested]` names.

use reqwest::multipart::Form;
use reqwest::Url;
use serde_json::Value;

/// Append `params` to the query string of `url`.
///
/// Returns `url` untouched (no trailing `?`) when nothing is appended.
pub fn with_search_params(mut url: Url, params: &Value) -> Url {
    let Value::Object(map) = params else {
        return url;
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(values) => {
                for item in values.iter().filter(|v| !v.is_null()) {
                    pairs.push((key.as_str(), scalar_to_string(item)));
                }
            }
            Value::Null => {}
            other => pairs.push((key.as_str(), scalar_to_string(other))),
        }
    }

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    url
}

/// Flatten a JSON object into `application/x-www-form-urlencoded` pairs.
///
/// The result can be passed straight to [`reqwest::RequestBuilder::form`].
pub fn form_urlencoded(data: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = data {
        for (key, value) in map {
            flatten_into(&mut pairs, key.clone(), value);
        }
    }
    pairs
}

/// Flatten a JSON object into a multipart form of text fields.
pub fn multipart_form(data: &Value) -> Form {
    form_urlencoded(data)
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value))
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (nested, value) in map {
                flatten_into(pairs, format!("{key}[{nested}]"), value);
            }
        }
        Value::Array(values) => {
            for (index, value) in values.iter().enumerate() {
                flatten_into(pairs, format!("{key}[{index}]"), value);
            }
        }
        Value::Null => {}
        scalar => pairs.push((key, scalar_to_string(scalar))),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
