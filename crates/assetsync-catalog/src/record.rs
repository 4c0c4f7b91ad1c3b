//! Catalog record types
//!
//! Records stay JSON objects in their original key order. Typed accessors
//! read the few fields the sync uses; setters patch values in place, so a
//! key that already exists keeps its position and a new key is appended.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PLAYER_ID: &str = "player_id";
const CLUB: &str = "club";
const CLUB_NAME: &str = "name";
const MEDIA: &str = "media";
const FACE_URL: &str = "face_url";
const MEDIA_LOGO_URL: &str = "club_logo_url";
const FACE_ASSET_PATH: &str = "face_asset_path";

const TEAM_ID: &str = "team_id";
const TEAM_NAME: &str = "team_name";
/// Teams store their local logo path under the same key players use for
/// the remote URL
const TEAM_LOGO: &str = "club_logo_url";

/// Record identifier: catalogs use both integer and string ids.
///
/// Any other JSON value (float, bool, out-of-range integer, object) is kept
/// as [`AssetId::Other`] in its JSON text form and never names an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetId {
    Number(i64),
    Text(String),
    Other(String),
}

impl AssetId {
    /// Id held by a JSON value; `None` for `null`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(
                n.as_i64()
                    .map(Self::Number)
                    .unwrap_or_else(|| Self::Other(n.to_string())),
            ),
            other => Some(Self::Other(other.to_string())),
        }
    }

    /// File stem for this id's cached asset.
    ///
    /// `None` for blank ids, non-integer numbers and ids that would escape
    /// the asset directory (path separators, `.`/`..`).
    pub fn file_stem(&self) -> Option<String> {
        match self {
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => {
                let s = s.trim();
                let unsafe_name =
                    s.is_empty() || s == "." || s == ".." || s.contains(['/', '\\']);
                (!unsafe_name).then(|| s.to_string())
            }
            Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Other(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AssetId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Non-empty string at `key`
fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key)?.as_str().filter(|s| !s.is_empty())
}

/// Nested object at `key`
fn object<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    fields.get(key)?.as_object()
}

/// Player record (`players.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player {
    fields: Map<String, Value>,
}

impl Player {
    pub fn id(&self) -> Option<AssetId> {
        AssetId::from_value(self.fields.get(PLAYER_ID)?)
    }

    pub fn club_name(&self) -> Option<&str> {
        str_field(object(&self.fields, CLUB)?, CLUB_NAME)
    }

    pub fn club_logo_url(&self) -> Option<&str> {
        str_field(object(&self.fields, MEDIA)?, MEDIA_LOGO_URL)
    }

    pub fn face_url(&self) -> Option<&str> {
        str_field(object(&self.fields, MEDIA)?, FACE_URL)
    }

    pub fn face_asset_path(&self) -> Option<&str> {
        object(&self.fields, MEDIA)?.get(FACE_ASSET_PATH)?.as_str()
    }

    /// Point the record at its local face image, creating `media` if it is
    /// absent or not an object
    pub fn set_face_asset_path(&mut self, path: String) {
        let media = self
            .fields
            .entry(MEDIA)
            .or_insert_with(|| Value::Object(Map::new()));
        if !media.is_object() {
            *media = Value::Object(Map::new());
        }
        if let Value::Object(media) = media {
            media.insert(FACE_ASSET_PATH.to_string(), Value::String(path));
        }
    }
}

/// Team record (`teams.json`)
///
/// `team_id` and `team_name` are required by the data model, but records
/// lacking them are tolerated here and skipped by the planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    fields: Map<String, Value>,
}

impl Team {
    pub fn id(&self) -> Option<AssetId> {
        AssetId::from_value(self.fields.get(TEAM_ID)?)
    }

    pub fn name(&self) -> Option<&str> {
        str_field(&self.fields, TEAM_NAME)
    }

    /// Local logo path, or `""` when no logo could be matched
    pub fn logo_asset_path(&self) -> Option<&str> {
        self.fields.get(TEAM_LOGO)?.as_str()
    }

    pub fn set_logo_asset_path(&mut self, path: String) {
        self.fields.insert(TEAM_LOGO.to_string(), Value::String(path));
    }
}
