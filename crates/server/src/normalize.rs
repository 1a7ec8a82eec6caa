use waypoint_common::place::{
    Contacts, Coordinates, NormalizedPlace, OpeningHoursEntry, RawCategory, RawContactDetail,
    RawPlaceRecord, NOT_AVAILABLE,
};

/// Map a raw backend record into the stable output shape.
///
/// Total: every raw shape, including the fully-empty record, yields a
/// valid `NormalizedPlace`. Missing scalars become the sentinel string,
/// missing lists become empty lists, and coordinate components default
/// independently. Structural defaulting only; duplicate categories across
/// opening-hours entries are kept as-is.
pub fn normalize(record: &RawPlaceRecord) -> NormalizedPlace {
    let contacts = record
        .contacts
        .as_ref()
        .map(|c| Contacts {
            phones: contact_values(&c.phones),
            websites: contact_values(&c.websites),
            emails: contact_values(&c.emails),
            faxes: contact_values(&c.faxes),
        })
        .unwrap_or_default();

    let coordinates = Coordinates {
        longitude: record.position.first().copied().into(),
        latitude: record.position.get(1).copied().into(),
    };

    let opening_hours = record
        .opening_hours
        .iter()
        .map(|entry| OpeningHoursEntry {
            display: entry.display.clone(),
            components: entry.components.clone(),
            open_now: entry.open_now.into(),
            categories: category_names(&entry.categories),
        })
        .collect();

    NormalizedPlace {
        place_id: or_sentinel(record.place_id.as_deref()),
        name: or_sentinel(record.title.as_deref()),
        address: or_sentinel(record.address.as_ref().and_then(|a| a.label.as_deref())),
        contacts,
        categories: category_names(&record.categories),
        coordinates,
        opening_hours,
    }
}

fn or_sentinel(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
}

fn category_names(categories: &[RawCategory]) -> Vec<String> {
    categories.iter().filter_map(|c| c.name.clone()).collect()
}

fn contact_values(details: &[RawContactDetail]) -> Vec<String> {
    details.iter().filter_map(|d| d.value.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use waypoint_common::place::{CoordValue, OpenNow};

    fn record(value: serde_json::Value) -> RawPlaceRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_record_normalizes_fully() {
        let place = normalize(&RawPlaceRecord::default());

        assert_eq!(place.place_id, NOT_AVAILABLE);
        assert_eq!(place.name, NOT_AVAILABLE);
        assert_eq!(place.address, NOT_AVAILABLE);
        assert_eq!(place.contacts, Contacts::default());
        assert!(place.categories.is_empty());
        assert_eq!(place.coordinates.longitude, CoordValue::NotAvailable);
        assert_eq!(place.coordinates.latitude, CoordValue::NotAvailable);
        assert!(place.opening_hours.is_empty());
    }

    #[test]
    fn test_present_scalars_preserved_missing_get_sentinel() {
        let place = normalize(&record(json!({ "PlaceId": "abc-123" })));

        assert_eq!(place.place_id, "abc-123");
        assert_eq!(place.name, NOT_AVAILABLE);
        assert_eq!(place.address, NOT_AVAILABLE);
    }

    #[test]
    fn test_coordinate_components_are_independent() {
        // Longitude present, latitude absent.
        let place = normalize(&record(json!({ "Position": [-122.34] })));

        assert_eq!(place.coordinates.longitude, CoordValue::Known(-122.34));
        assert_eq!(place.coordinates.latitude, CoordValue::NotAvailable);
    }

    #[test]
    fn test_open_now_tri_state_preserved() {
        let place = normalize(&record(json!({
            "OpeningHours": [
                { "OpenNow": true },
                { "OpenNow": false },
                { "Display": ["Mo-Fr 09:00-17:00"] },
            ]
        })));

        assert_eq!(place.opening_hours[0].open_now, OpenNow::Open);
        assert_eq!(place.opening_hours[1].open_now, OpenNow::Closed);
        assert_eq!(place.opening_hours[2].open_now, OpenNow::Unknown);
        assert_eq!(place.opening_hours[2].display, vec!["Mo-Fr 09:00-17:00"]);
    }

    #[test]
    fn test_contacts_and_categories_flatten() {
        let place = normalize(&record(json!({
            "Contacts": {
                "Phones": [{ "Value": "+1-555-0100" }, {}],
                "Websites": [{ "Value": "https://example.com" }],
            },
            "Categories": [{ "Name": "Coffee Shop" }, { "Name": "Cafe" }],
        })));

        assert_eq!(place.contacts.phones, vec!["+1-555-0100"]);
        assert_eq!(place.contacts.websites, vec!["https://example.com"]);
        assert!(place.contacts.emails.is_empty());
        assert_eq!(place.categories, vec!["Coffee Shop", "Cafe"]);
    }

    #[test]
    fn test_duplicate_categories_not_deduplicated() {
        let place = normalize(&record(json!({
            "Categories": [{ "Name": "Cafe" }],
            "OpeningHours": [
                { "Categories": [{ "Name": "Cafe" }, { "Name": "Cafe" }] },
            ]
        })));

        assert_eq!(place.categories, vec!["Cafe"]);
        assert_eq!(place.opening_hours[0].categories, vec!["Cafe", "Cafe"]);
    }

    #[test]
    fn test_serialized_output_has_every_key() {
        let value = serde_json::to_value(normalize(&RawPlaceRecord::default())).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "place_id",
            "name",
            "address",
            "contacts",
            "categories",
            "coordinates",
            "opening_hours",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(value["coordinates"]["longitude"], json!(NOT_AVAILABLE));
        for sub in ["phones", "websites", "emails", "faxes"] {
            assert_eq!(value["contacts"][sub], json!([]));
        }
    }
}
