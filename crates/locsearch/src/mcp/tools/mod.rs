mod loc;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn text(text: String) -> Self {
        CallToolResult {
            content: vec![Content::Text { text }],
            is_error: None,
        }
    }

    /// A tool-level failure the model should see, as opposed to a protocol error
    pub fn error(text: String) -> Self {
        CallToolResult {
            content: vec![Content::Text { text }],
            is_error: Some(true),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}"))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let category_keys: Vec<&str> = locsearch_core::categories::PARTOF_V0.to_vec();

    let tools = vec![
        Tool {
            name: "loc_search".to_string(),
            description: "Search the Library of Congress catalog (loc.gov) for document records. Returns a table with the columns id, Title, Contributor, Subject, Original format, Location, Description, Date, LCCN and Languages; missing fields are null. Fetches at most 750 records.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "q": {
                        "type": "string",
                        "description": "Search phrase"
                    },
                    "partof": {
                        "description": "Collection to search within. A collection key (empty string for all collections), or a legacy integer index into the same list.",
                        "oneOf": [
                            { "type": "string", "enum": category_keys },
                            { "type": "integer", "minimum": 0 }
                        ]
                    }
                },
                "required": ["q"]
            }),
        },
        Tool {
            name: "loc_migrate_params".to_string(),
            description: "Upgrade stored loc_search parameters to the current format: a legacy integer 'partof' index becomes the collection key. Other fields are returned unchanged.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "params": {
                        "type": "object",
                        "description": "Stored parameter object, e.g. {\"q\": \"football\", \"partof\": 2}"
                    }
                },
                "required": ["params"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "loc_search" => loc::handle_loc_search(params.arguments, global).await,
        "loc_migrate_params" => loc::handle_loc_migrate_params(params.arguments, global),
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}
