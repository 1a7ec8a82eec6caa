use async_trait::async_trait;

use waypoint_common::place::{BoundingBox, PlaceDocument, Position};
use waypoint_common::Result;

mod http;

pub use http::HttpPlaceClient;

/// Operations the place-index backend provides. Implementations are shared
/// process-wide, hold no per-request state, and must be safe for concurrent
/// use by multiple in-flight requests.
#[async_trait]
pub trait PlaceBackend: Send + Sync {
    /// Free-text place search, optionally biased toward a position or
    /// constrained to a bounding box.
    async fn search_text(
        &self,
        query: &str,
        bias: Option<Position>,
        filter_box: Option<BoundingBox>,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>>;

    /// Places within `radius_m` meters of `position`, optionally filtered
    /// by a text query.
    async fn search_nearby(
        &self,
        position: Position,
        radius_m: f64,
        query: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>>;

    /// Look up one place by id. Returns `WaypointError::NotFound` when the
    /// backend signals an unknown id rather than a transport failure.
    async fn get_place(&self, place_id: &str) -> Result<PlaceDocument>;

    /// Places at or around the given coordinates.
    async fn reverse_geocode(
        &self,
        position: Position,
        max_results: u32,
    ) -> Result<Vec<PlaceDocument>>;
}
