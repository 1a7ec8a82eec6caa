use waypoint_common::config::SearchDefaults;
use waypoint_common::place::{BoundingBox, PlaceDocument, Position};
use waypoint_common::{Result, WaypointError};

use crate::backend::PlaceBackend;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Candidate page size for the open-now variant. The open-now filter runs
/// locally, so the fetch always uses the backend's result ceiling; the
/// caller's result cap is applied after filtering, in post-processing.
const OPEN_NOW_CANDIDATE_PAGE: u32 = 50;

/// Radius-expansion parameters for one adaptive search.
#[derive(Clone, Copy, Debug)]
pub struct ExpansionParams {
    pub initial_radius_m: f64,
    pub max_radius_m: f64,
    pub expansion_factor: f64,
}

impl From<&SearchDefaults> for ExpansionParams {
    fn from(defaults: &SearchDefaults) -> Self {
        Self {
            initial_radius_m: defaults.initial_radius_m,
            max_radius_m: defaults.max_radius_m,
            expansion_factor: defaults.expansion_factor,
        }
    }
}

impl ExpansionParams {
    /// Reject parameters under which the expansion loop would never
    /// terminate or shrink. Runs before any backend call.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.initial_radius_m <= 0.0 {
            errors.push(format!(
                "initial_radius_m must be > 0, got {}",
                self.initial_radius_m
            ));
        }
        if self.max_radius_m < self.initial_radius_m {
            errors.push(format!(
                "max_radius_m ({}) must be >= initial_radius_m ({})",
                self.max_radius_m, self.initial_radius_m
            ));
        }
        if self.expansion_factor <= 1.0 {
            errors.push(format!(
                "expansion_factor must be > 1.0, got {}",
                self.expansion_factor
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WaypointError::Config(errors.join("; ")))
        }
    }
}

/// Terminal state of an adaptive search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// At least one result was found (for the open-now variant, at least
    /// one candidate passed the filter).
    Success(Vec<PlaceDocument>),
    /// The radius ceiling was queried and nothing was found.
    Exhausted(Vec<PlaceDocument>),
}

impl SearchOutcome {
    pub fn into_documents(self) -> Vec<PlaceDocument> {
        match self {
            Self::Success(docs) | Self::Exhausted(docs) => docs,
        }
    }
}

/// Nearby search with geometric radius expansion.
///
/// Issues one `search_nearby` call per step, growing the radius by
/// `expansion_factor` (clamped to the ceiling) whenever a step comes back
/// empty. The loop is bounded: each retry strictly increases the radius
/// toward `max_radius_m`, and the ceiling itself is queried exactly once.
/// A backend error aborts the whole operation; only a successful empty
/// response expands.
pub async fn expanding_nearby(
    backend: &dyn PlaceBackend,
    params: ExpansionParams,
    position: Position,
    query: Option<&str>,
    max_results: u32,
) -> Result<SearchOutcome> {
    params.validate()?;

    let mut radius = params.initial_radius_m;
    loop {
        let results = backend
            .search_nearby(position, radius, query, max_results)
            .await?;
        metrics::counter!("search.expansion.steps", "variant" => "nearby").increment(1);

        if !results.is_empty() {
            tracing::debug!(radius_m = radius, count = results.len(), "Nearby search hit");
            return Ok(SearchOutcome::Success(results));
        }

        if radius >= params.max_radius_m {
            tracing::debug!(radius_m = radius, "Nearby search exhausted radius ceiling");
            metrics::counter!("search.expansion.exhausted", "variant" => "nearby").increment(1);
            return Ok(SearchOutcome::Exhausted(Vec::new()));
        }

        radius = (radius * params.expansion_factor).min(params.max_radius_m);
        tracing::debug!(radius_m = radius, "Expanding nearby search radius");
    }
}

/// Text search filtered to places that are open right now, with the same
/// radius expansion. The radius parameterizes a bounding box around the
/// bias point; without a bias point a wider radius cannot change the
/// query, so a single unbounded step is issued.
///
/// When the ceiling is reached with no open candidate the result is an
/// empty list, never the unfiltered batch: the tool's contract is "places
/// open now".
///
/// Each step fetches a full candidate page rather than the caller's
/// result cap: an open place ranked below the cap must still be found.
pub async fn expanding_open_now(
    backend: &dyn PlaceBackend,
    params: ExpansionParams,
    query: &str,
    bias: Option<Position>,
) -> Result<SearchOutcome> {
    params.validate()?;

    let mut radius = params.initial_radius_m;
    loop {
        let filter_box = bias.map(|p| bounding_box_around(p, radius));
        let candidates = backend
            .search_text(query, bias, filter_box, OPEN_NOW_CANDIDATE_PAGE)
            .await?;
        metrics::counter!("search.expansion.steps", "variant" => "open_now").increment(1);

        let open: Vec<PlaceDocument> = candidates
            .into_iter()
            .filter(|doc| doc.record.is_open_now())
            .collect();

        if !open.is_empty() {
            tracing::debug!(radius_m = radius, count = open.len(), "Open-now search hit");
            return Ok(SearchOutcome::Success(open));
        }

        if bias.is_none() || radius >= params.max_radius_m {
            tracing::debug!(radius_m = radius, "Open-now search exhausted");
            metrics::counter!("search.expansion.exhausted", "variant" => "open_now").increment(1);
            return Ok(SearchOutcome::Exhausted(Vec::new()));
        }

        radius = (radius * params.expansion_factor).min(params.max_radius_m);
        tracing::debug!(radius_m = radius, "Expanding open-now search radius");
    }
}

/// Square bounding box of `radius_m` meters around a point, in degrees.
/// Longitude span widens with latitude; near the poles it degenerates to
/// the full circle.
fn bounding_box_around(center: Position, radius_m: f64) -> BoundingBox {
    let delta_lat = radius_m / METERS_PER_DEGREE;
    let cos_lat = center.latitude.to_radians().cos().max(1e-6);
    let delta_lon = (radius_m / (METERS_PER_DEGREE * cos_lat)).min(180.0);

    BoundingBox {
        west: (center.longitude - delta_lon).max(-180.0),
        south: (center.latitude - delta_lat).max(-90.0),
        east: (center.longitude + delta_lon).min(180.0),
        north: (center.latitude + delta_lat).min(90.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_sane_params() {
        let params = ExpansionParams {
            initial_radius_m: 500.0,
            max_radius_m: 10_000.0,
            expansion_factor: 2.0,
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_factor_of_one() {
        let params = ExpansionParams {
            initial_radius_m: 500.0,
            max_radius_m: 10_000.0,
            expansion_factor: 1.0,
        };
        let err = params.validate().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("expansion_factor"));
    }

    #[test]
    fn test_validate_collects_every_violation() {
        let params = ExpansionParams {
            initial_radius_m: 0.0,
            max_radius_m: -1.0,
            expansion_factor: 0.5,
        };
        let msg = params.validate().unwrap_err().to_string();
        assert!(msg.contains("initial_radius_m"));
        assert!(msg.contains("max_radius_m"));
        assert!(msg.contains("expansion_factor"));
    }

    #[test]
    fn test_bounding_box_is_centered_and_clamped() {
        let center = Position {
            longitude: -122.33,
            latitude: 47.6,
        };
        let bbox = bounding_box_around(center, 1000.0);

        assert!(bbox.west < center.longitude && center.longitude < bbox.east);
        assert!(bbox.south < center.latitude && center.latitude < bbox.north);

        // North pole: latitude clamped, longitude span capped.
        let polar = bounding_box_around(
            Position {
                longitude: 0.0,
                latitude: 89.999,
            },
            50_000.0,
        );
        assert!(polar.north <= 90.0);
        assert!(polar.east <= 180.0 && polar.west >= -180.0);
    }
}
