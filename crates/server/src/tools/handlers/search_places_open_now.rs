use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use waypoint_common::place::{Position, SearchMode};

use crate::search::expanding_open_now;
use crate::tools::envelope::{render_places, truncate_places};
use crate::tools::registry::{ToolHandler, ToolHandlerContext};

#[derive(Deserialize)]
struct Args {
    query: String,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    max_results: Option<u32>,
    #[serde(default)]
    mode: Option<SearchMode>,
    #[serde(flatten)]
    expansion: super::ExpansionOverrides,
}

pub fn handler() -> ToolHandler {
    Arc::new(|args: Value, ctx: Arc<ToolHandlerContext>| {
        Box::pin(async move {
            let args: Args =
                serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

            let max_results = super::resolve_max_results(args.max_results, &ctx.search_defaults)?;
            let mode = args.mode.unwrap_or_default();
            let params = args.expansion.apply(&ctx.search_defaults);

            let bias = match (args.longitude, args.latitude) {
                (Some(longitude), Some(latitude)) => Some(Position {
                    longitude,
                    latitude,
                }),
                (None, None) => None,
                _ => {
                    return Err(
                        "longitude and latitude must be provided together".to_string()
                    )
                }
            };

            // The expansion loop fetches full candidate pages; the caller's
            // cap applies after the open-now filter, in truncation.
            let outcome = expanding_open_now(ctx.backend.as_ref(), params, &args.query, bias)
                .await
                .map_err(|e| format!("Open-now search failed: {}", e))?;

            let mut result = json!({
                "query": args.query,
                "open_now": true,
                "places": render_places(outcome.into_documents(), mode)?,
            });
            truncate_places(&mut result, max_results);
            Ok(result)
        })
    })
}
