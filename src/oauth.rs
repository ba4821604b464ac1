//! OAuth2 helpers.
//!
//! Authorization-URL construction and the query encoder it shares with
//! other parameterized routes. Token exchange and refresh are out of scope;
//! the client only retains application credentials and builds the URL the
//! user is sent to.

use serde_json::Value;
use url::form_urlencoded;

/// Options for building an OAuth2 authorization URL.
#[derive(Debug, Clone, Default)]
pub struct AuthorizeOptions {
    /// Space-separated scopes to request.
    pub scope: Option<String>,

    /// Opaque state echoed back on the redirect.
    pub state: Option<String>,

    /// Response type; `code` when unset.
    pub response_type: Option<String>,

    /// Consent-screen behavior (`consent` or `none`).
    pub prompt: Option<String>,
}

impl AuthorizeOptions {
    /// Set the requested scopes.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the state parameter.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the prompt parameter.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// Encode a flat list of key/value pairs as a URL query string.
///
/// Falsy values are dropped entirely rather than encoded as empty
/// parameters: null, `false`, numeric zero, the empty string, and empty
/// collections all stay off the wire. Optional parameters that were never
/// set are therefore not transmitted at all. Key order follows the input.
#[must_use]
pub fn encode_query(pairs: &[(&str, Value)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in pairs {
        if let Some(text) = query_value(value) {
            serializer.append_pair(key, &text);
        }
    }

    serializer.finish()
}

/// Render a value for the query string, or `None` when it is falsy.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => b.then(|| "true".to_string()),
        Value::Number(n) => {
            if matches!(n.as_f64(), Some(f) if f == 0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                None
            } else {
                Some(
                    items
                        .iter()
                        .filter_map(query_value)
                        .collect::<Vec<_>>()
                        .join(","),
                )
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values_are_omitted_in_insertion_order() {
        let encoded = encode_query(&[
            ("a", json!("1")),
            ("b", json!("")),
            ("c", json!(0)),
            ("d", json!("x")),
        ]);

        assert_eq!(encoded, "a=1&d=x");
    }

    #[test]
    fn null_and_false_are_omitted() {
        let encoded = encode_query(&[
            ("skip_null", Value::Null),
            ("skip_false", json!(false)),
            ("keep_true", json!(true)),
            ("keep_number", json!(42)),
        ]);

        assert_eq!(encoded, "keep_true=true&keep_number=42");
    }

    #[test]
    fn values_are_percent_encoded() {
        let encoded = encode_query(&[
            ("scope", json!("identify guilds")),
            ("redirect_uri", json!("https://example.com/cb?x=1")),
        ]);

        assert_eq!(
            encoded,
            "scope=identify+guilds&redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fx%3D1"
        );
    }

    #[test]
    fn arrays_join_their_truthy_elements() {
        let encoded = encode_query(&[("ids", json!(["1", "", "2"]))]);
        assert_eq!(encoded, "ids=1%2C2");
    }
}
