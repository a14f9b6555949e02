pub mod municipality;
pub mod region;

use chrono::{DateTime, Utc};
use serde_json::Value;

pub use crate::dataset::municipality::Municipality;
pub use crate::dataset::region::Region;
use crate::dataset::region::RegionPayload;

/// One complete listing of the regions as returned by the API.
///
/// A snapshot is never patched: every successful fetch produces a new one
/// which replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub regions: Vec<Region>,
    pub fetched_at: DateTime<Utc>
}

impl Snapshot {
    pub fn new(regions: Vec<Region>) -> Self {
        Snapshot {
            regions,
            fetched_at: Utc::now()
        }
    }

    pub fn from_response(response: Value) -> Self {
        Self::new(decode_regions(response))
    }

    pub fn region(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.region(code).is_some()
    }

    pub fn municipality_count(&self) -> usize {
        self.regions.iter().map(Region::municipality_count).sum()
    }
}

/// Coerces a listing response into regions. Anything but an array yields no regions.
pub fn decode_regions(response: Value) -> Vec<Region> {
    let elements = match response {
        Value::Array(elements) => elements,
        other => {
            tracing::warn!("Region listing was not an array ({}), treating it as empty", json_kind(&other));
            return Vec::new();
        }
    };

    elements.into_iter()
        .filter_map(|element| {
            match serde_json::from_value::<RegionPayload>(element) {
                Ok(payload) => Some(payload.into_region()),
                Err(err) => {
                    tracing::warn!("Skipping undecodable region: {}", err);
                    None
                }
            }
        })
        .collect()
}

/// Reads a scalar wire field as text. Numbers and booleans keep their JSON spelling,
/// anything structured becomes empty so the surrounding entry survives.
pub(crate) fn text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(other) => {
            tracing::warn!("Expected text but got {}, using an empty value", json_kind(&other));
            String::new()
        }
    }
}

/// Reads a collection wire field. Anything but an array counts as absent.
pub(crate) fn members(value: Option<Value>) -> Option<Vec<Value>> {
    match value? {
        Value::Array(members) => Some(members),
        Value::Null => None,
        other => {
            tracing::warn!("Expected a municipality collection but got {}, ignoring it", json_kind(&other));
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_responses_decode_to_nothing() {
        assert!(decode_regions(json!({"kode": "1084"})).is_empty());
        assert!(decode_regions(Value::Null).is_empty());
        assert!(decode_regions(json!("regioner")).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let regions = decode_regions(json!([
            {"kode": "1085", "navn": "Sjælland"},
            {"kode": "1081", "navn": "Nordjylland"},
            {"kode": "1084", "navn": "Hovedstaden"}
        ]));
        let codes: Vec<&str> = regions.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1085", "1081", "1084"]);
    }

    #[test]
    fn counts_and_lookups() {
        let snapshot = Snapshot::from_response(json!([
            {"kode": "1084", "kommuner": [{"kode": "0101"}, {"kode": "0147"}]},
            {"kode": "1085", "kommune": [{"kode": "0253"}]},
            {"kode": "1081"}
        ]));
        assert_eq!(snapshot.municipality_count(), 3);
        assert!(snapshot.contains("1085"));
        assert!(!snapshot.contains("9999"));
        assert_eq!(snapshot.region("1084").map(Region::municipality_count), Some(2));
    }

    #[test]
    fn mistyped_fields_keep_their_entries() {
        let snapshot = Snapshot::from_response(json!([
            {"kode": "1084", "kommuner": [{"kode": "0101", "region": "1084"}, {"kode": "0147"}]},
            {"kode": "1085", "navn": 7}
        ]));
        assert_eq!(snapshot.regions.len(), 2);
        assert_eq!(snapshot.municipality_count(), 2);
        assert_eq!(snapshot.region("1085").map(|r| r.name.as_str()), Some("7"));
    }

    #[test]
    fn scalar_text_coercion() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(Value::Null)), "");
        assert_eq!(text(Some(json!("Sjælland"))), "Sjælland");
        assert_eq!(text(Some(json!(1085))), "1085");
        assert_eq!(text(Some(json!({"kode": "1085"}))), "");
    }

    #[test]
    fn unusable_elements_are_dropped() {
        let regions = decode_regions(json!([{"kode": "1084"}, 17, null, {"kode": "1085"}]));
        assert_eq!(regions.len(), 2);
    }
}
