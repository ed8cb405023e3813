//! One-shot decoding of raw template payloads.
//!
//! Upstream template records carry escaped content and a `variables` field
//! that is a JSON-encoded string, an object, or absent. Decoding resolves
//! all of that into the canonical [`Template`] shape exactly once, at
//! catalog admission; nothing downstream ever re-decodes or branches on
//! the raw shape.

use chrono::Utc;

use super::types::{CreateTemplateRequest, Template, TemplateVariable};
use crate::metrics;

/// Decode a raw template record from any JSON value.
///
/// Never fails: null, scalars, and missing fields all degrade to empty
/// strings and an empty variable set.
pub fn decode(raw: &serde_json::Value) -> Template {
    let obj = raw.as_object();
    let field =
        |key: &str| obj.and_then(|o| o.get(key)).and_then(|v| v.as_str()).unwrap_or("");

    let now = Utc::now();
    Template {
        name: field("name").to_string(),
        subject: field("subject").to_string(),
        html_content: decode_html(field("html_content")),
        text_content: decode_text(field("text_content")),
        variables: parse_variables(obj.and_then(|o| o.get("variables"))),
        created_at: now,
        updated_at: now,
    }
}

impl From<CreateTemplateRequest> for Template {
    fn from(req: CreateTemplateRequest) -> Self {
        let now = Utc::now();
        Template {
            name: req.name,
            subject: req.subject,
            html_content: decode_html(&req.html_content),
            text_content: decode_text(&req.text_content),
            variables: parse_variables(Some(&req.variables)),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Un-escape raw HTML content.
///
/// The upstream stores HTML with exactly these four literal escape
/// sequences, replaced in this fixed order, one whole-string pass each.
/// This is not general JSON or Unicode decoding.
pub(crate) fn decode_html(raw: &str) -> String {
    raw.replace("\\u003c", "<")
        .replace("\\u003e", ">")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Un-escape raw plaintext content: `\n`, `\"`, `\\`, in that fixed order.
pub(crate) fn decode_text(raw: &str) -> String {
    raw.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Resolve the raw `variables` field into an ordered declaration list.
///
/// A string is JSON-decoded; decode failure is logged and degrades to an
/// empty set, never an error. Declaration order follows the JSON object's
/// key order.
pub(crate) fn parse_variables(raw: Option<&serde_json::Value>) -> Vec<TemplateVariable> {
    let value = match raw {
        None | Some(serde_json::Value::Null) => return Vec::new(),
        Some(serde_json::Value::String(encoded)) => {
            match serde_json::from_str::<serde_json::Value>(encoded) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid template variables JSON, using empty set");
                    metrics::VARIABLES_DECODE_FAILURES_TOTAL.inc();
                    return Vec::new();
                }
            }
        }
        Some(other) => other.clone(),
    };

    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(name, description)| TemplateVariable {
                name,
                description: match description {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect(),
        other => {
            tracing::warn!(kind = %value_kind(&other), "Template variables are not an object, using empty set");
            metrics::VARIABLES_DECODE_FAILURES_TOTAL.inc();
            Vec::new()
        }
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_null_input() {
        let template = decode(&serde_json::Value::Null);
        assert_eq!(template.name, "");
        assert_eq!(template.subject, "");
        assert_eq!(template.html_content, "");
        assert_eq!(template.text_content, "");
        assert!(template.variables.is_empty());
    }

    #[test]
    fn test_decode_non_object_input() {
        let template = decode(&json!(42));
        assert_eq!(template.name, "");
        assert!(template.variables.is_empty());
    }

    #[test]
    fn test_decode_variables_roundtrip() {
        let encoded = serde_json::to_string(&json!({"a": "1"})).unwrap();
        let template = decode(&json!({"name": "t", "variables": encoded}));
        assert_eq!(
            template.variables,
            vec![TemplateVariable {
                name: "a".to_string(),
                description: "1".to_string(),
            }]
        );
    }

    #[test]
    fn test_decode_variables_invalid_json() {
        let template = decode(&json!({"name": "t", "variables": "{bad"}));
        assert!(template.variables.is_empty());
    }

    #[test]
    fn test_decode_variables_object_form() {
        let template = decode(&json!({
            "name": "t",
            "variables": {"user_name": "recipient", "course_name": "course"}
        }));
        let names: Vec<&str> = template.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["user_name", "course_name"]);
    }

    #[test]
    fn test_decode_variables_array_degrades() {
        let template = decode(&json!({"name": "t", "variables": ["a", "b"]}));
        assert!(template.variables.is_empty());
    }

    #[test]
    fn test_decode_html_escapes() {
        assert_eq!(decode_html("\\u003cb\\u003e"), "<b>");
        assert_eq!(decode_html("a \\\"quoted\\\" word"), "a \"quoted\" word");
        assert_eq!(decode_html("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn test_decode_html_leaves_clean_text_alone() {
        assert_eq!(decode_html("<b>plain</b>"), "<b>plain</b>");
    }

    #[test]
    fn test_decode_text_escapes() {
        assert_eq!(decode_text("line one\\nline two"), "line one\nline two");
        assert_eq!(decode_text("say \\\"hi\\\""), "say \"hi\"");
    }

    #[test]
    fn test_decode_missing_content_fields() {
        let template = decode(&json!({"name": "bare"}));
        assert_eq!(template.html_content, "");
        assert_eq!(template.text_content, "");
    }

    #[test]
    fn test_create_request_decodes_once() {
        let req = CreateTemplateRequest {
            name: "welcome".to_string(),
            subject: "Hi {{.user_name}}".to_string(),
            html_content: "\\u003cp\\u003eWelcome\\u003c/p\\u003e".to_string(),
            text_content: "Welcome,\\nnew student".to_string(),
            variables: json!({"user_name": "the recipient's name"}),
        };

        let template: Template = req.into();
        assert_eq!(template.html_content, "<p>Welcome</p>");
        assert_eq!(template.text_content, "Welcome,\nnew student");
        assert_eq!(template.variables.len(), 1);
    }
}
