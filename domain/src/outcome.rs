use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    DecodeError,
    EncodeError,
    StorageError,
    InternalError,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecodeError => "DecodeError",
            Self::EncodeError => "EncodeError",
            Self::StorageError => "StorageError",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    TypeNotInferable,
    UnsupportedType,
    EventFiltered,
}

impl SkipReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::TypeNotInferable => "type not inferable",
            Self::UnsupportedType => "unsupported type",
            Self::EventFiltered => "event filtered",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Terminal state of a single transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    Success { bytes: Vec<u8>, mime_type: String },
    Skipped(SkipReason),
    Failed { kind: FailureKind, message: String },
}

impl TransformResult {
    #[must_use]
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "ok",
            Self::Skipped(_) => "skipped",
            Self::Failed { .. } => "fail",
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
