use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Sentinel substituted for a genuinely absent scalar field.
pub const NOT_AVAILABLE: &str = "Not available";

/// A longitude/latitude pair in WGS84 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

/// Axis-aligned bounding box in degrees: west/south/east/north.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// Output shape for a place-returning tool call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Normalize each backend record into the stable output shape.
    #[default]
    Summary,
    /// Return the backend documents unmodified.
    Raw,
}

// ---------------------------------------------------------------------------
// Raw backend records
// ---------------------------------------------------------------------------

/// A place record as the backend returns it. Every field may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawPlaceRecord {
    pub place_id: Option<String>,
    pub title: Option<String>,
    pub address: Option<RawAddress>,
    pub contacts: Option<RawContacts>,
    pub categories: Vec<RawCategory>,
    /// Backend convention: [longitude, latitude]. May be short or empty.
    pub position: Vec<f64>,
    pub opening_hours: Vec<RawOpeningHours>,
}

impl RawPlaceRecord {
    /// Whether any opening-hours entry reports the place as open right
    /// now. An absent flag stays unknown and does not count as open.
    pub fn is_open_now(&self) -> bool {
        self.opening_hours
            .iter()
            .any(|entry| entry.open_now == Some(true))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawAddress {
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawContacts {
    pub phones: Vec<RawContactDetail>,
    pub websites: Vec<RawContactDetail>,
    pub emails: Vec<RawContactDetail>,
    pub faxes: Vec<RawContactDetail>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawContactDetail {
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawCategory {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawOpeningHours {
    pub display: Vec<String>,
    /// Opaque schedule components, passed through untouched.
    pub components: Vec<Value>,
    pub open_now: Option<bool>,
    pub categories: Vec<RawCategory>,
}

/// A backend place document: the typed record plus the untouched JSON,
/// so raw mode can return the document field-for-field.
#[derive(Clone, Debug)]
pub struct PlaceDocument {
    pub raw: Value,
    pub record: RawPlaceRecord,
}

impl PlaceDocument {
    /// Build a document from backend JSON. Total: a document the typed
    /// record cannot represent parses as the empty record, and the raw
    /// JSON is kept either way.
    pub fn from_raw(raw: Value) -> Self {
        let record = serde_json::from_value(raw.clone()).unwrap_or_default();
        Self { raw, record }
    }
}

// ---------------------------------------------------------------------------
// Normalized output shape
// ---------------------------------------------------------------------------

/// Tri-state "open now" flag. The backend reports an optionally-absent
/// boolean; absence stays distinct from closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenNow {
    Open,
    Closed,
    Unknown,
}

impl OpenNow {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<Option<bool>> for OpenNow {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Open,
            Some(false) => Self::Closed,
            None => Self::Unknown,
        }
    }
}

impl Serialize for OpenNow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Open => serializer.serialize_bool(true),
            Self::Closed => serializer.serialize_bool(false),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// One coordinate component: a degree value or the sentinel. Longitude
/// and latitude are independent; one may be known while the other is not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordValue {
    Known(f64),
    NotAvailable,
}

impl From<Option<f64>> for CoordValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Known(v),
            None => Self::NotAvailable,
        }
    }
}

impl Serialize for CoordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub longitude: CoordValue,
    pub latitude: CoordValue,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Contacts {
    pub phones: Vec<String>,
    pub websites: Vec<String>,
    pub emails: Vec<String>,
    pub faxes: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OpeningHoursEntry {
    pub display: Vec<String>,
    pub components: Vec<Value>,
    pub open_now: OpenNow,
    pub categories: Vec<String>,
}

/// A fully-populated place record. Every key is always present: absence
/// is the sentinel string or an empty list, never a missing field.
#[derive(Clone, Debug, Serialize)]
pub struct NormalizedPlace {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub contacts: Contacts,
    pub categories: Vec<String>,
    pub coordinates: Coordinates,
    pub opening_hours: Vec<OpeningHoursEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_now_serializes_tri_state() {
        assert_eq!(serde_json::to_value(OpenNow::Open).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(OpenNow::Closed).unwrap(), json!(false));
        assert_eq!(
            serde_json::to_value(OpenNow::Unknown).unwrap(),
            json!("unknown")
        );
    }

    #[test]
    fn test_coord_value_serializes_number_or_sentinel() {
        assert_eq!(
            serde_json::to_value(CoordValue::Known(-122.34)).unwrap(),
            json!(-122.34)
        );
        assert_eq!(
            serde_json::to_value(CoordValue::NotAvailable).unwrap(),
            json!(NOT_AVAILABLE)
        );
    }

    #[test]
    fn test_place_document_total_on_malformed_json() {
        // Title with the wrong type fails typed decoding; the document
        // still carries the raw JSON and an empty record.
        let doc = PlaceDocument::from_raw(json!({ "Title": 42 }));
        assert!(doc.record.title.is_none());
        assert_eq!(doc.raw["Title"], json!(42));
    }

    #[test]
    fn test_raw_record_defaults_everything() {
        let record: RawPlaceRecord = serde_json::from_value(json!({})).unwrap();
        assert!(record.place_id.is_none());
        assert!(record.categories.is_empty());
        assert!(record.position.is_empty());
        assert!(record.opening_hours.is_empty());
    }
}
