//! Wire shapes of the Contentful delivery API, kept loose on purpose:
//! entry fields are whatever the space's editors made of them.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// `GET /spaces/{space}/environments/{env}/entries`
#[derive(Deserialize, Debug, Default)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Includes {
    #[serde(rename = "Asset", default)]
    pub assets: Vec<Asset>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Asset {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Value,
}

impl Asset {
    pub fn file_url(&self) -> Option<&str> {
        file_url(&self.fields)
    }
}

pub(crate) fn file_url(fields: &Value) -> Option<&str> {
    fields
        .get("file")
        .and_then(|file| file.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

#[derive(Debug, Default)]
pub struct AssetIndex(HashMap<String, String>);

impl AssetIndex {
    pub fn new(includes: &Includes) -> Self {
        Self(
            includes
                .assets
                .iter()
                .filter_map(|asset| Some((asset.sys.id.clone(), asset.file_url()?.to_string())))
                .collect(),
        )
    }

    pub fn url(&self, asset_id: &str) -> Option<&str> {
        self.0.get(asset_id).map(String::as_str)
    }

    /// Follows `{ sys: { type: "Link", linkType: "Asset", id } }`, or reads
    /// an asset that was already inlined.
    pub fn resolve<'a>(&'a self, value: &'a Value) -> Option<&'a str> {
        if let Some(url) = value.get("fields").and_then(file_url) {
            return Some(url);
        }
        let sys = value.get("sys")?;
        if sys.get("linkType").and_then(Value::as_str) != Some("Asset") {
            return None;
        }
        self.url(sys.get("id")?.as_str()?)
    }
}
