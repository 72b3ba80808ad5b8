use serde::{Deserialize, Serialize};

use crate::{
    error::{DomainError, DomainResult},
    format::{ImageFormatKind, classify},
};

pub const DEFAULT_DESTINATION_PREFIX: &str = "resized-";

/// How a thumbnail key is derived from its source key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "naming", rename_all = "snake_case")]
pub enum DestinationNaming {
    Prefix { prefix: String },
    /// Same key as the source, so only useful with a separate output bucket.
    Mirror,
}

impl Default for DestinationNaming {
    fn default() -> Self {
        Self::Prefix {
            prefix: DEFAULT_DESTINATION_PREFIX.to_string(),
        }
    }
}

impl DestinationNaming {
    /// Deterministic destination for `source_key` once encoded as `output`.
    ///
    /// The extension is swapped only when the output format differs from the
    /// one inferred from the source key.
    #[must_use]
    pub fn destination_key(&self, source_key: &str, output: ImageFormatKind) -> String {
        let key = if classify(source_key).image_format() == Some(output) {
            source_key.to_string()
        } else {
            let stem = source_key
                .rsplit_once('.')
                .map_or(source_key, |(stem, _)| stem);
            format!("{stem}.{}", output.extension())
        };

        match self {
            Self::Prefix { prefix } => format!("{prefix}{key}"),
            Self::Mirror => key,
        }
    }
}

/// Rejects keys that are empty, absolute, or climb out of their bucket.
pub fn validate_object_key(key: &str) -> DomainResult<()> {
    if key.trim().is_empty() {
        return Err(DomainError::InvalidObjectKey("key is empty".to_string()));
    }
    if key.starts_with('/') || key.starts_with('\\') {
        return Err(DomainError::InvalidObjectKey(format!(
            "'{key}' must not be absolute"
        )));
    }
    if key.contains("..") {
        return Err(DomainError::InvalidObjectKey(format!(
            "'{key}' must not contain '..'"
        )));
    }
    if key.contains('\0') {
        return Err(DomainError::InvalidObjectKey(
            "key contains a NUL byte".to_string(),
        ));
    }
    Ok(())
}
