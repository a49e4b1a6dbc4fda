//! Serde helpers for the root sentinel.
//!
//! Top-level placement is `None` in Rust. A folder's parent is written as
//! the literal `"root"`; a file's folder is written as `null`. Both forms are
//! accepted when reading either field.

use serde::{Deserialize, Deserializer, Serializer};

use filedesk_core::types::FolderId;

/// Literal used for "no parent".
pub const ROOT: &str = "root";

/// Serialize `None` as `"root"`.
pub fn serialize<S>(value: &Option<FolderId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(id) => serializer.serialize_str(id.as_str()),
        None => serializer.serialize_str(ROOT),
    }
}

/// Deserialize `null`, `""` or `"root"` as `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FolderId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(parse(raw.as_deref()))
}

/// Interpret a raw folder reference from a query string, request body or
/// command line.
pub fn parse(raw: Option<&str>) -> Option<FolderId> {
    match raw {
        None | Some("") | Some(ROOT) => None,
        Some(id) => Some(FolderId::from(id)),
    }
}

/// Whether `id` is the root sentinel rather than a stored folder.
pub fn is_sentinel(id: &FolderId) -> bool {
    matches!(id.as_str(), "" | ROOT)
}

/// Map an explicit `"root"` id to `None`.
pub fn normalize(folder: Option<&FolderId>) -> Option<&FolderId> {
    folder.filter(|id| !is_sentinel(id))
}
