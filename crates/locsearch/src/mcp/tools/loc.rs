use crate::prelude::{eprintln, *};
use locsearch_core::params::{migrate, migrate_value, SearchParams};
use locsearch_core::SearchOutcome;
use serde::Deserialize;

use super::{CallToolResult, JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};

fn invalid_arguments(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError::new(INVALID_PARAMS, f!("Invalid arguments: {e}"))
}

fn to_result_value(result: CallToolResult) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, f!("Internal error: {e}")))
}

pub async fn handle_loc_search(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: SearchParams =
        serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
            .map_err(invalid_arguments)?;

    // Hosts may still hold parameters saved with a legacy index.
    let args = migrate(args);

    if global.verbose {
        eprintln!(
            "Calling loc_search: q={:?}, partof={:?}",
            args.query,
            args.category.category_key()
        );
    }

    let outcome = crate::loc::search_data(
        &args.query,
        args.category.category_key(),
        &global.base_url,
    )
    .await
    .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, f!("Tool execution error: {e:#}")))?;

    let result = match outcome {
        SearchOutcome::Table(table) => {
            let json_string = serde_json::to_string_pretty(&table).map_err(|e| {
                JsonRpcError::new(INTERNAL_ERROR, f!("Serialization error: {e}"))
            })?;
            CallToolResult::text(json_string)
        }
        SearchOutcome::Failed(err) => CallToolResult::error(err.to_string()),
    };

    to_result_value(result)
}

pub fn handle_loc_migrate_params(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct MigrateArgs {
        params: serde_json::Map<String, serde_json::Value>,
    }

    let args: MigrateArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!("Calling loc_migrate_params: {:?}", args.params);
    }

    let migrated = migrate_value(serde_json::Value::Object(args.params));

    let json_string = serde_json::to_string_pretty(&migrated)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, f!("Serialization error: {e}")))?;

    to_result_value(CallToolResult::text(json_string))
}
