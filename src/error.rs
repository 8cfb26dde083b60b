// Error taxonomy - everything here is recoverable by design
use crate::storage::StorageError;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("section '{0}' not found in the document")]
    SectionNotFound(String),
    #[error("navigation target is empty")]
    InvalidTarget,
    #[error("no navigation history available")]
    NoHistoryAvailable,
    #[error("document has no sections")]
    NoSectionsPresent,
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),
}

/// Stable discriminant stored in diagnostic records.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NavErrorKind {
    SectionNotFound,
    InvalidTarget,
    NoHistoryAvailable,
    NoSectionsPresent,
    PersistenceUnavailable,
}

impl NavError {
    pub fn kind(&self) -> NavErrorKind {
        match self {
            NavError::SectionNotFound(_) => NavErrorKind::SectionNotFound,
            NavError::InvalidTarget => NavErrorKind::InvalidTarget,
            NavError::NoHistoryAvailable => NavErrorKind::NoHistoryAvailable,
            NavError::NoSectionsPresent => NavErrorKind::NoSectionsPresent,
            NavError::PersistenceUnavailable(_) => NavErrorKind::PersistenceUnavailable,
        }
    }
}
