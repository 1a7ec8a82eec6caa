use serde_json::Value;

use waypoint_common::place::{PlaceDocument, SearchMode};

use crate::normalize::normalize;

/// Render backend documents for a tool response: the normalized shape in
/// summary mode, the untouched backend JSON in raw mode.
pub fn render_places(documents: Vec<PlaceDocument>, mode: SearchMode) -> Result<Vec<Value>, String> {
    match mode {
        SearchMode::Raw => Ok(documents.into_iter().map(|doc| doc.raw).collect()),
        SearchMode::Summary => documents
            .into_iter()
            .map(|doc| {
                serde_json::to_value(normalize(&doc.record))
                    .map_err(|e| format!("Failed to serialize place: {}", e))
            })
            .collect(),
    }
}

/// Truncate the `places` array to the requested cap, preserving backend
/// order, and set `count`. When entries were dropped, note the original
/// total.
pub fn truncate_places(result: &mut Value, max_results: u32) {
    let max = max_results as usize;
    let mut dropped_from = None;

    if let Some(arr) = result.get_mut("places").and_then(|v| v.as_array_mut()) {
        if arr.len() > max {
            dropped_from = Some(arr.len());
            arr.truncate(max);
        }
    }

    let count = result
        .get("places")
        .and_then(|v| v.as_array())
        .map_or(0, Vec::len);

    if let Some(obj) = result.as_object_mut() {
        if let Some(total) = dropped_from {
            obj.insert("total_results".into(), Value::from(total));
            obj.insert(
                "truncated".into(),
                Value::String(format!("[{} more results omitted]", total - max)),
            );
        }
        obj.insert("count".into(), Value::from(count));
    }
}
