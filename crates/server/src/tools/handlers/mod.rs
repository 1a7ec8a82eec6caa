mod get_coordinates;
mod get_place;
mod reverse_geocode;
mod search_nearby;
mod search_places;
mod search_places_open_now;

use serde::Deserialize;

use waypoint_common::config::SearchDefaults;

use super::registry::ToolRegistry;
use crate::search::ExpansionParams;

/// Register every place tool with the registry.
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register("search_places", search_places::handler());
    registry.register("get_place", get_place::handler());
    registry.register("reverse_geocode", reverse_geocode::handler());
    registry.register("search_nearby", search_nearby::handler());
    registry.register("search_places_open_now", search_places_open_now::handler());
    registry.register("get_coordinates", get_coordinates::handler());
}

/// Resolve the per-call result cap against the configured default and the
/// documented 1..=50 range.
pub(crate) fn resolve_max_results(
    requested: Option<u32>,
    defaults: &SearchDefaults,
) -> Result<u32, String> {
    let max_results = requested.unwrap_or(defaults.max_results);
    if !(1..=50).contains(&max_results) {
        return Err(format!(
            "max_results must be in 1..=50, got {}",
            max_results
        ));
    }
    Ok(max_results)
}

/// Per-call overrides for the adaptive-search parameters.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExpansionOverrides {
    #[serde(default)]
    initial_radius_m: Option<f64>,
    #[serde(default)]
    max_radius_m: Option<f64>,
    #[serde(default)]
    expansion_factor: Option<f64>,
}

impl ExpansionOverrides {
    /// Overlay on the configured defaults. Validation happens inside the
    /// search loop entry points, before any backend call.
    pub(crate) fn apply(&self, defaults: &SearchDefaults) -> ExpansionParams {
        let base = ExpansionParams::from(defaults);
        ExpansionParams {
            initial_radius_m: self.initial_radius_m.unwrap_or(base.initial_radius_m),
            max_radius_m: self.max_radius_m.unwrap_or(base.max_radius_m),
            expansion_factor: self.expansion_factor.unwrap_or(base.expansion_factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_max_results_defaults_and_bounds() {
        let defaults = SearchDefaults::default();

        assert_eq!(resolve_max_results(None, &defaults).unwrap(), 5);
        assert_eq!(resolve_max_results(Some(50), &defaults).unwrap(), 50);
        assert!(resolve_max_results(Some(0), &defaults).is_err());
        assert!(resolve_max_results(Some(51), &defaults).is_err());
    }

    #[test]
    fn test_expansion_overrides_overlay() {
        let defaults = SearchDefaults::default();
        let overrides = ExpansionOverrides {
            max_radius_m: Some(10_000.0),
            ..Default::default()
        };

        let params = overrides.apply(&defaults);
        assert_eq!(params.initial_radius_m, defaults.initial_radius_m);
        assert_eq!(params.max_radius_m, 10_000.0);
        assert_eq!(params.expansion_factor, defaults.expansion_factor);
    }
}
