use serde_json::json;

use crate::document::JsonMap;

/// The parameter schemas of the stock node set, in the same JSON Schema shape
/// a live backend derives from its parameter models.
///
/// Useful for offline tooling, demos, and tests that should not depend on a
/// running schema provider.
pub fn builtin_schemas() -> JsonMap {
    let mut schemas = JsonMap::new();

    schemas.insert(
        "StartNode".to_string(),
        json!({ "properties": {}, "title": "EmptyParams", "type": "object" }),
    );
    schemas.insert(
        "EndNode".to_string(),
        json!({ "properties": {}, "title": "EmptyParams", "type": "object" }),
    );

    schemas.insert(
        "LLM".to_string(),
        json!({
            "properties": {
                "provider": {
                    "default": "openai",
                    "description": "The model provider (e.g. openai, mock)",
                    "title": "Provider",
                    "type": "string"
                },
                "model": {
                    "default": "gpt-3.5-turbo",
                    "description": "The LLM model to use",
                    "title": "Model",
                    "type": "string"
                },
                "temperature": {
                    "default": 0.7,
                    "description": "Sampling temperature",
                    "maximum": 2.0,
                    "minimum": 0.0,
                    "title": "Temperature",
                    "type": "number"
                },
                "system_prompt": {
                    "default": "",
                    "description": "System prompt",
                    "title": "System Prompt",
                    "type": "string"
                }
            },
            "title": "LLMParams",
            "type": "object"
        }),
    );

    schemas.insert(
        "HTTP".to_string(),
        json!({
            "properties": {
                "url": {
                    "description": "Target URL",
                    "title": "Url",
                    "type": "string"
                },
                "method": {
                    "default": "GET",
                    "description": "HTTP Method",
                    "pattern": "^(GET|POST|PUT|DELETE|PATCH)$",
                    "title": "Method",
                    "type": "string"
                },
                "headers": {
                    "additionalProperties": { "type": "string" },
                    "description": "HTTP Headers",
                    "title": "Headers",
                    "type": "object"
                }
            },
            "required": ["url"],
            "title": "HTTPParams",
            "type": "object"
        }),
    );

    schemas.insert(
        "Tool".to_string(),
        json!({
            "properties": {
                "tool_name": {
                    "description": "Name of the tool to execute",
                    "title": "Tool Name",
                    "type": "string"
                }
            },
            "required": ["tool_name"],
            "title": "ToolParams",
            "type": "object"
        }),
    );

    schemas.insert(
        "Condition".to_string(),
        json!({
            "properties": {
                "expression": {
                    "default": "True",
                    "description": "Expression to evaluate",
                    "title": "Expression",
                    "type": "string"
                },
                "true_target": {
                    "anyOf": [{ "type": "string" }, { "type": "null" }],
                    "default": null,
                    "description": "Node ID to go to if true",
                    "title": "True Target"
                },
                "false_target": {
                    "anyOf": [{ "type": "string" }, { "type": "null" }],
                    "default": null,
                    "description": "Node ID to go to if false",
                    "title": "False Target"
                }
            },
            "title": "ConditionParams",
            "type": "object"
        }),
    );

    schemas.insert(
        "Loop".to_string(),
        json!({
            "properties": {
                "expression": {
                    "default": "True",
                    "description": "Loop condition expression",
                    "title": "Expression",
                    "type": "string"
                },
                "body_target": {
                    "anyOf": [{ "type": "string" }, { "type": "null" }],
                    "default": null,
                    "description": "Node ID for loop body",
                    "title": "Body Target"
                },
                "end_target": {
                    "anyOf": [{ "type": "string" }, { "type": "null" }],
                    "default": null,
                    "description": "Node ID to exit loop",
                    "title": "End Target"
                }
            },
            "title": "LoopParams",
            "type": "object"
        }),
    );

    schemas
}
