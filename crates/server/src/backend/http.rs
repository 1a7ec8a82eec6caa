use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use waypoint_common::config::BackendConfig;
use waypoint_common::place::{BoundingBox, PlaceDocument, Position};
use waypoint_common::{Result, WaypointError};

use super::PlaceBackend;

// ---------------------------------------------------------------------------
// Request wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchTextRequest<'a> {
    query_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bias_position: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<SearchFilter>,
    max_results: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchFilter {
    /// [west, south, east, north] degrees.
    bounding_box: [f64; 4],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchNearbyRequest<'a> {
    query_position: [f64; 2],
    query_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_text: Option<&'a str>,
    max_results: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ReverseGeocodeRequest {
    query_position: [f64; 2],
    max_results: u32,
}

// ---------------------------------------------------------------------------
// Response wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultPage {
    #[serde(default)]
    result_items: Vec<Value>,
}

/// Place-index client over the v2 HTTP API.
///
/// One instance is shared across all in-flight requests; reqwest handles
/// connection pooling and timeouts.
pub struct HttpPlaceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPlaceClient {
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn post_for_page(&self, endpoint: &str, body: Value) -> Result<Vec<PlaceDocument>> {
        let start = std::time::Instant::now();
        let url = format!("{}/v2/{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| WaypointError::Backend(format!("{} request failed: {}", endpoint, e)))?;

        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("backend.request.latency", "endpoint" => endpoint.to_string())
            .record(latency);

        let page: ResultPage = check_status(endpoint, response)
            .await?
            .json()
            .await
            .map_err(|e| {
                WaypointError::Backend(format!("Failed to parse {} response: {}", endpoint, e))
            })?;

        Ok(page
            .result_items
            .into_iter()
            .map(PlaceDocument::from_raw)
            .collect())
    }
}

async fn check_status(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        metrics::counter!("backend.request.errors", "endpoint" => endpoint.to_string())
            .increment(1);
        return Err(WaypointError::Backend(format!(
            "{} authentication rejected ({}): {}",
            endpoint, status, body
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        metrics::counter!("backend.request.errors", "endpoint" => endpoint.to_string())
            .increment(1);
        return Err(WaypointError::Backend(format!(
            "{} returned {}: {}",
            endpoint, status, body
        )));
    }

    Ok(response)
}

#[async_trait]
impl PlaceBackend for HttpPlaceClient {
    async fn search_text(
        &self,
        query: &str,
        bias: Option<Position>,
        filter_box: Option<BoundingBox>,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>> {
        let request = SearchTextRequest {
            query_text: query,
            bias_position: bias.map(|p| [p.longitude, p.latitude]),
            filter: filter_box.map(|b| SearchFilter {
                bounding_box: [b.west, b.south, b.east, b.north],
            }),
            max_results,
        };
        self.post_for_page("search-text", serde_json::to_value(&request)?)
            .await
    }

    async fn search_nearby(
        &self,
        position: Position,
        radius_m: f64,
        query: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>> {
        let request = SearchNearbyRequest {
            query_position: [position.longitude, position.latitude],
            query_radius: radius_m,
            query_text: query,
            max_results,
        };
        self.post_for_page("search-nearby", serde_json::to_value(&request)?)
            .await
    }

    async fn get_place(&self, place_id: &str) -> Result<PlaceDocument> {
        let start = std::time::Instant::now();
        let url = format!("{}/v2/place/{}", self.base_url, place_id);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WaypointError::Backend(format!("place request failed: {}", e)))?;

        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("backend.request.latency", "endpoint" => "place").record(latency);

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(WaypointError::NotFound(format!(
                "no place with id '{}'",
                place_id
            )));
        }

        let raw: Value = check_status("place", response)
            .await?
            .json()
            .await
            .map_err(|e| {
                WaypointError::Backend(format!("Failed to parse place response: {}", e))
            })?;

        Ok(PlaceDocument::from_raw(raw))
    }

    async fn reverse_geocode(
        &self,
        position: Position,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>> {
        let request = ReverseGeocodeRequest {
            query_position: [position.longitude, position.latitude],
            max_results,
        };
        self.post_for_page("reverse-geocode", serde_json::to_value(&request)?)
            .await
    }
}
