use serde::Deserialize;
use serde_json::Value;

use crate::dataset::municipality::{decode_municipalities, Municipality};
use crate::dataset::{members, text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub href: String,
    pub municipalities: Vec<Municipality>
}

impl Region {
    pub fn municipality_count(&self) -> usize {
        self.municipalities.len()
    }
}

/// A region exactly as the API sends it. Every field may be missing, null or of an unexpected type.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RegionPayload {
    #[serde(rename = "kode", alias = "code")]
    pub code: Option<Value>,
    #[serde(rename = "navn", alias = "name")]
    pub name: Option<Value>,
    pub href: Option<Value>,
    pub kommuner: Option<Value>,
    pub kommune: Option<Value>
}

impl RegionPayload {
    pub(crate) fn into_region(self) -> Region {
        let code = text(self.code);

        // Whichever key actually carries municipalities wins
        let members = match (members(self.kommuner), members(self.kommune)) {
            (Some(kommuner), _) if !kommuner.is_empty() => kommuner,
            (_, Some(kommune)) => kommune,
            (Some(kommuner), None) => kommuner,
            (None, None) => Vec::new()
        };

        Region {
            municipalities: decode_municipalities(&code, members),
            code,
            name: text(self.name),
            href: text(self.href)
        }
    }
}
