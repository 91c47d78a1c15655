// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles the non-empty list of deployment paths.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathsEntry {
    Single(PathBuf),
    Many(Vec<PathBuf>),
}

/// Accepts a single path or a list; the list must not be empty.
pub(super) fn deserialize_paths<'de, D>(
    deserializer: D,
) -> std::result::Result<NonEmpty<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let paths = match PathsEntry::deserialize(deserializer)? {
        PathsEntry::Single(path) => vec![path],
        PathsEntry::Many(paths) => paths,
    };

    NonEmpty::from_vec(paths).ok_or_else(|| serde::de::Error::custom("at least one path is required"))
}
