//! Request body decoding for subscription saves
//!
//! Browsers post JSON, older pages post regular forms. Both end up as a
//! JSON object so the handler only deals with one shape.

use serde_json::{Map, Value};

/// Decode the body as a JSON object, falling back to url encoded form
/// fields when it is anything else.
pub fn parse_body(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => parse_form(&String::from_utf8_lossy(body)),
    }
}

/// Form fields with bracketed keys (`subscription[keys][auth]=..`)
/// nest into objects. A `subscription` field holding a JSON object
/// string is decoded in place.
fn parse_form(raw: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode(key), decode(value)) else {
            continue;
        };
        insert_path(&mut fields, &key_path(&key), Value::String(value));
    }

    let decoded = match fields.get("subscription") {
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(obj @ Value::Object(_)) => Some(obj),
            _ => None,
        },
        _ => None,
    };
    if let Some(subscription) = decoded {
        fields.insert("subscription".to_string(), subscription);
    }

    fields
}

fn decode(s: &str) -> Option<String> {
    urlencoding::decode(&s.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

// "a[b][c]" -> ["a", "b", "c"]
fn key_path(key: &str) -> Vec<String> {
    match key.find('[') {
        Some(i) if i > 0 && key.ends_with(']') => {
            let mut path = vec![key[..i].to_string()];
            path.extend(
                key[i + 1..key.len() - 1]
                    .split("][")
                    .map(|s| s.to_string()),
            );
            path
        }
        _ => vec![key.to_string()],
    }
}

fn insert_path(fields: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        fields.insert(head.clone(), value);
        return;
    }
    let entry = fields
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_parses_json_objects() {
        let body = br#"{"subscription": {"endpoint": "https://push.example/abc"}, "csrf_token": "t"}"#;
        assert_eq!(
            Value::Object(parse_body(body)),
            json!({"subscription": {"endpoint": "https://push.example/abc"}, "csrf_token": "t"})
        );
    }

    #[test]
    fn it_falls_back_to_nested_form_fields() {
        let body = b"csrf_token=abc+123&subscription%5Bendpoint%5D=https%3A%2F%2Fpush.example%2Fabc&subscription[keys][auth]=a1&subscription[keys][p256dh]=p1";
        assert_eq!(
            Value::Object(parse_body(body)),
            json!({
                "csrf_token": "abc 123",
                "subscription": {
                    "endpoint": "https://push.example/abc",
                    "keys": {"auth": "a1", "p256dh": "p1"}
                }
            })
        );
    }

    #[test]
    fn it_decodes_a_json_subscription_form_field() {
        let body = b"subscription=%7B%22endpoint%22%3A%22https%3A%2F%2Fpush.example%2Fabc%22%7D";
        assert_eq!(
            Value::Object(parse_body(body)),
            json!({"subscription": {"endpoint": "https://push.example/abc"}})
        );
    }

    #[test]
    fn it_treats_non_object_json_as_form_input() {
        assert!(parse_body(b"[1, 2]").get("subscription").is_none());
        assert!(parse_body(b"").is_empty());
    }
}
