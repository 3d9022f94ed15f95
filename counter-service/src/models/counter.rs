use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound counter lookup.
///
/// Any JSON document is accepted; only a document that fails to parse, or a
/// bare `null`, is malformed. Everything else that does not carry a usable
/// `character` is reported as a missing name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterRequest {
    pub character: Option<String>,
}

impl CounterRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let fields = match serde_json::from_slice::<Value>(body)? {
            Value::Null => return Err(serde_json::Error::custom("request body is null")),
            Value::Object(fields) => fields,
            // Scalars and arrays carry no `character` field.
            _ => return Ok(Self::default()),
        };

        Ok(Self {
            character: fields.get("character").and_then(character_name),
        })
    }

    /// The requested character, if present and non-empty.
    pub fn character(&self) -> Option<&str> {
        self.character.as_deref().filter(|c| !c.is_empty())
    }
}

/// Strings pass through untouched; non-zero numbers and `true` become their
/// JSON text. `null`, `false`, `0` and containers yield no name.
fn character_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Success envelope: the provider's markdown table, untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterResponse {
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(body: &str) -> Option<String> {
        CounterRequest::from_slice(body.as_bytes())
            .unwrap()
            .character()
            .map(str::to_string)
    }

    #[test]
    fn falsy_or_absent_character_is_missing() {
        for body in [
            r#"{}"#,
            r#"{"character":null}"#,
            r#"{"character":""}"#,
            r#"{"character":false}"#,
            r#"{"character":0}"#,
            r#"{"character":0.0}"#,
            r#"{"character":["Rey"]}"#,
            r#"{"character":{"name":"Rey"}}"#,
        ] {
            assert_eq!(character(body), None, "body: {}", body);
        }
    }

    #[test]
    fn non_object_documents_have_no_character() {
        for body in [r#""x""#, "[]", "5", "true"] {
            assert_eq!(character(body), None, "body: {}", body);
        }
    }

    #[test]
    fn null_document_is_malformed() {
        assert!(CounterRequest::from_slice(b"null").is_err());
    }

    #[test]
    fn unparseable_document_is_malformed() {
        assert!(CounterRequest::from_slice(b"{not json").is_err());
        assert!(CounterRequest::from_slice(b"").is_err());
    }

    #[test]
    fn truthy_scalars_become_text() {
        assert_eq!(character(r#"{"character":42}"#).as_deref(), Some("42"));
        assert_eq!(character(r#"{"character":-1.5}"#).as_deref(), Some("-1.5"));
        assert_eq!(character(r#"{"character":true}"#).as_deref(), Some("true"));
    }

    #[test]
    fn whitespace_character_is_kept_verbatim() {
        assert_eq!(character(r#"{"character":" "}"#).as_deref(), Some(" "));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert_eq!(
            character(r#"{"character":"Rey","mode":"gac"}"#).as_deref(),
            Some("Rey")
        );
    }

    #[test]
    fn response_serializes_as_result_envelope() {
        let body = serde_json::to_string(&CounterResponse {
            result: "| a | b |".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"result":"| a | b |"}"#);
    }
}
