//! Tool definitions advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name, description and JSON schema of a callable tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Must match the name registered in the tool registry
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Small builders for JSON-schema fragments
///
/// ```
/// use agent_llm::tools::schema;
/// use serde_json::json;
///
/// let s = schema::object(
///     json!({
///         "ticker": schema::string("Stock ticker symbol"),
///         "max_results": schema::integer("Maximum articles"),
///     }),
///     &["ticker"],
/// );
/// assert_eq!(s["required"][0], "ticker");
/// ```
pub mod schema {
    use serde_json::{Value, json};

    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn typed(kind: &str, description: &str) -> Value {
        json!({ "type": kind, "description": description })
    }

    pub fn string(description: &str) -> Value {
        typed("string", description)
    }

    /// String restricted to a fixed set of values
    pub fn string_enum(description: &str, values: &[&str]) -> Value {
        json!({ "type": "string", "description": description, "enum": values })
    }

    pub fn number(description: &str) -> Value {
        typed("number", description)
    }

    pub fn integer(description: &str) -> Value {
        typed("integer", description)
    }

    pub fn array(description: &str, items: Value) -> Value {
        json!({ "type": "array", "description": description, "items": items })
    }
}
