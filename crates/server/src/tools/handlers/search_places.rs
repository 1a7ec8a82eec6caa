use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use waypoint_common::place::SearchMode;

use crate::tools::envelope::{render_places, truncate_places};
use crate::tools::registry::{ToolHandler, ToolHandlerContext};

#[derive(Deserialize)]
struct Args {
    query: String,
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

            let documents = ctx
                .backend
                .search_text(&args.query, None, None, max_results)
                .await
                .map_err(|e| format!("Search failed: {}", e))?;

            let mut result = json!({
                "query": args.query,
                "places": render_places(documents, mode)?,
            });
            truncate_places(&mut result, max_results);
            Ok(result)
        })
    })
}
