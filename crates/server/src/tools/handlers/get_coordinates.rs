use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::normalize::normalize;
use crate::tools::registry::{ToolHandler, ToolHandlerContext};

#[derive(Deserialize)]
struct Args {
    query: String,
}

pub fn handler() -> ToolHandler {
    Arc::new(|args: Value, ctx: Arc<ToolHandlerContext>| {
        Box::pin(async move {
            let args: Args =
                serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

            let documents = ctx
                .backend
                .search_text(&args.query, None, None, 1)
                .await
                .map_err(|e| format!("Coordinate lookup failed: {}", e))?;

            let Some(document) = documents.into_iter().next() else {
                return Err(format!("No results found for location: '{}'", args.query));
            };

            let place = normalize(&document.record);
            Ok(json!({
                "query": args.query,
                "place_id": place.place_id,
                "name": place.name,
                "address": place.address,
                "coordinates": place.coordinates,
            }))
        })
    })
}
