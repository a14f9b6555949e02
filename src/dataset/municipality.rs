use serde::Deserialize;
use serde_json::Value;

use crate::dataset::text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    pub code: String,
    pub name: String,
    pub href: String,
    pub photo_href: String,
    pub region_code: String
}

/// The owning region as a municipality refers to it: either `{"kode": ..}` or the bare code.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RegionReference {
    Region {
        #[serde(rename = "kode", alias = "code")]
        code: Option<Value>
    },
    Code(Value)
}

impl RegionReference {
    fn into_code(self) -> String {
        match self {
            RegionReference::Region { code } => text(code),
            RegionReference::Code(code) => text(Some(code))
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct MunicipalityPayload {
    #[serde(rename = "kode", alias = "code")]
    code: Option<Value>,
    #[serde(rename = "navn", alias = "name")]
    name: Option<Value>,
    href: Option<Value>,
    #[serde(rename = "hrefPhoto", alias = "photoHref")]
    photo_href: Option<Value>,
    region: Option<RegionReference>,
    #[serde(rename = "regionCode", alias = "regionKode")]
    region_code: Option<Value>
}

/// Decodes the members of one region, skipping entries that are not municipality objects.
pub(crate) fn decode_municipalities(owner_code: &str, members: Vec<Value>) -> Vec<Municipality> {
    members.into_iter()
        .filter_map(|member| {
            match serde_json::from_value::<MunicipalityPayload>(member) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    tracing::warn!(region = owner_code, "Skipping undecodable municipality: {}", err);
                    None
                }
            }
        })
        .map(|payload| {
            let back_reference = Some(text(payload.region_code))
                .filter(|code| !code.is_empty())
                .or_else(|| payload.region.map(RegionReference::into_code))
                .filter(|code| !code.is_empty());

            Municipality {
                code: text(payload.code),
                name: text(payload.name),
                href: text(payload.href),
                photo_href: text(payload.photo_href),
                region_code: back_reference.unwrap_or_else(|| owner_code.to_string())
            }
        })
        .collect()
}
