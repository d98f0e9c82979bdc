use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// File extension for stored reciter images.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Stable reciter identifier as published by the roster.
///
/// The roster API delivers ids as JSON numbers, but string ids are accepted
/// too. Both render identically through `Display`, which is what names the
/// stored image file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReciterId {
    Number(i64),
    Text(String),
}

impl ReciterId {
    /// Convert a raw JSON value into an id. Returns `None` for null, empty
    /// strings, and shapes that are not integers or strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ReciterId::Number),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(ReciterId::Text(trimmed.to_string()))
                }
            }
            _ => None,
        }
    }

    /// Whether this id can name a file inside the images directory without
    /// escaping it.
    pub fn is_usable_stem(&self) -> bool {
        match self {
            ReciterId::Number(_) => true,
            ReciterId::Text(s) => {
                !s.is_empty()
                    && s != "."
                    && s != ".."
                    && !s.contains(['/', '\\'])
                    && !s.contains('\0')
            }
        }
    }
}

impl fmt::Display for ReciterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReciterId::Number(n) => write!(f, "{n}"),
            ReciterId::Text(s) => f.write_str(s),
        }
    }
}

/// A reciter from the remote roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reciter {
    pub id: ReciterId,
    /// Display name, used as the image search key.
    pub name: String,
}

impl Reciter {
    /// File name of this reciter's stored image (e.g., `"42.jpg"`).
    pub fn image_file_name(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.id)
    }
}

/// The roster endpoint's response body.
///
/// Only the `reciters` list is read; everything else the API sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterResponse {
    pub reciters: Vec<RosterRecord>,
}

/// One unvalidated record from the roster.
///
/// Fields are kept as raw JSON so a single odd record can be rejected on its
/// own instead of failing the whole roster.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
}

/// Why a roster record could not become a [`Reciter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordRejection {
    #[error("record has no usable id")]
    MissingId,

    #[error("record {0} has no name")]
    MissingName(ReciterId),

    #[error("record id {0:?} cannot be used as a file name")]
    UnusableId(String),
}

impl RosterRecord {
    /// Validate this record into a [`Reciter`].
    pub fn into_reciter(self) -> Result<Reciter, RecordRejection> {
        let id = ReciterId::from_json(&self.id).ok_or(RecordRejection::MissingId)?;
        if !id.is_usable_stem() {
            return Err(RecordRejection::UnusableId(id.to_string()));
        }

        let name = match &self.name {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            _ => return Err(RecordRejection::MissingName(id)),
        };

        Ok(Reciter { id, name })
    }
}
