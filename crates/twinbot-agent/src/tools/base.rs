//! Tool trait — the interface every callable tool implements.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use twinbot_core::types::ToolDefinition;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Every agent tool implements this trait.
///
/// The agent loop discovers tools via `name()`, sends their schemas to the LLM
/// via `to_definition()`, and dispatches calls via `execute()`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used by the LLM to call this tool (e.g. `"record_user_details"`).
    fn name(&self) -> &str;

    /// Human-readable description shown to the LLM.
    fn description(&self) -> &str;

    /// JSON Schema describing the parameters (as a `serde_json::Value`).
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// Returns a JSON value that is serialized into the tool-result message.
    /// Arguments are not validated against `parameters()` beforehand; an
    /// `Err` here is converted to an error object by the registry.
    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<Value>;

    /// Build the `ToolDefinition` sent to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters())
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Render a present argument as text. Strings pass through unquoted; any
/// other JSON value uses its compact JSON form. `null` counts as absent.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Extract a required param as text, returning a user-friendly error when
/// the key is absent.
pub fn require_string(params: &HashMap<String, Value>, key: &str) -> anyhow::Result<String> {
    params
        .get(key)
        .and_then(value_to_text)
        .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {key}"))
}

/// Extract an optional param as text.
pub fn optional_string(params: &HashMap<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(value_to_text)
}

/// Parse a tool call's JSON-encoded arguments into a param map.
///
/// Anything that is not a JSON object becomes an empty map.
pub fn parse_arguments(arguments: &str) -> HashMap<String, Value> {
    serde_json::from_str(arguments).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_string_present() {
        let mut params = HashMap::new();
        params.insert("email".into(), json!("a@b.com"));
        assert_eq!(require_string(&params, "email").unwrap(), "a@b.com");
    }

    #[test]
    fn test_require_string_missing() {
        let err = require_string(&HashMap::new(), "email").unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        let mut params = HashMap::new();
        params.insert("email".into(), json!(42));
        params.insert("flag".into(), json!(true));
        params.insert("tags".into(), json!(["a", "b"]));
        assert_eq!(require_string(&params, "email").unwrap(), "42");
        assert_eq!(optional_string(&params, "flag"), Some("true".into()));
        assert_eq!(optional_string(&params, "tags"), Some(r#"["a","b"]"#.into()));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let mut params = HashMap::new();
        params.insert("name".into(), Value::Null);
        assert_eq!(optional_string(&params, "name"), None);
        assert!(require_string(&params, "name").is_err());
    }

    #[test]
    fn test_optional_string() {
        let mut params = HashMap::new();
        params.insert("name".into(), json!("Ada"));
        assert_eq!(optional_string(&params, "name"), Some("Ada".into()));
        assert_eq!(optional_string(&params, "notes"), None);
    }

    #[test]
    fn test_parse_arguments() {
        let params = parse_arguments(r#"{"email": "a@b.com", "name": "Ada"}"#);
        assert_eq!(params.len(), 2);
        assert!(parse_arguments("not json").is_empty());
        assert!(parse_arguments("[1, 2]").is_empty());
        assert!(parse_arguments("").is_empty());
    }

    #[tokio::test]
    async fn test_to_definition_default() {
        struct DummyTool;

        #[async_trait]
        impl Tool for DummyTool {
            fn name(&self) -> &str { "dummy" }
            fn description(&self) -> &str { "A test tool" }
            fn parameters(&self) -> Value {
                json!({"type": "object", "properties": {}, "required": []})
            }
            async fn execute(&self, _params: HashMap<String, Value>) -> anyhow::Result<Value> {
                Ok(json!({}))
            }
        }

        let def = DummyTool.to_definition();
        assert_eq!(def.function.name, "dummy");
        assert_eq!(def.function.description, "A test tool");
        assert_eq!(def.tool_type, "function");
        assert_eq!(DummyTool.execute(HashMap::new()).await.unwrap(), json!({}));
    }
}
