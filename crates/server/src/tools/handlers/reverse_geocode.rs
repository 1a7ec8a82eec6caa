use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use waypoint_common::place::{Position, SearchMode};

use crate::tools::envelope::{render_places, truncate_places};
use crate::tools::registry::{ToolHandler, ToolHandlerContext};

#[derive(Deserialize)]
struct Args {
    longitude: f64,
    latitude: f64,
    #[serde(default)]
    max_results: Option<u32>,
    #[serde(default)]
    mode: Option<SearchMode>,
}

pub fn handler() -> ToolHandler {
    Arc::new(|args: Value, ctx: Arc<ToolHandlerContext>| {
        Box::pin(async move {
            let args: Args =
                serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

            let max_results = super::resolve_max_results(args.max_results, &ctx.search_defaults)?;
            let mode = args.mode.unwrap_or_default();
            let position = Position {
                longitude: args.longitude,
                latitude: args.latitude,
            };

            let documents = ctx
                .backend
                .reverse_geocode(position, max_results)
                .await
                .map_err(|e| format!("Reverse geocode failed: {}", e))?;

            let mut result = json!({
                "position": position,
                "places": render_places(documents, mode)?,
            });
            truncate_places(&mut result, max_results);
            Ok(result)
        })
    })
}
