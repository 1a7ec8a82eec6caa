use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use waypoint_common::place::SearchMode;
use waypoint_common::WaypointError;

use crate::normalize::normalize;
use crate::tools::registry::{ToolHandler, ToolHandlerContext};

#[derive(Deserialize)]
struct Args {
    place_id: String,
    #[serde(default)]
    mode: Option<SearchMode>,
}

pub fn handler() -> ToolHandler {
    Arc::new(|args: Value, ctx: Arc<ToolHandlerContext>| {
        Box::pin(async move {
            let args: Args =
                serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

            let document = ctx
                .backend
                .get_place(&args.place_id)
                .await
                .map_err(|e| match e {
                    WaypointError::NotFound(msg) => format!("Place not found: {}", msg),
                    other => format!("Place lookup failed: {}", other),
                })?;

            match args.mode.unwrap_or_default() {
                SearchMode::Raw => Ok(document.raw),
                SearchMode::Summary => serde_json::to_value(normalize(&document.record))
                    .map_err(|e| format!("Failed to serialize place: {}", e)),
            }
        })
    })
}
