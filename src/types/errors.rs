use std::fmt;

use super::tab::TabId;

// === TabError ===

/// Errors related to tab registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    /// The operation referenced a tab id that is not in the registry.
    InvalidTab(TabId),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::InvalidTab(id) => write!(f, "Invalid tab: {}", id),
        }
    }
}

impl std::error::Error for TabError {}

// === CaptureError ===

/// Errors reported by a screen capture service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The platform capture call rejected.
    Rejected(String),
    /// No surface is available to capture from.
    Unavailable,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Rejected(msg) => write!(f, "Screen capture rejected: {}", msg),
            CaptureError::Unavailable => write!(f, "Screen capture unavailable"),
        }
    }
}

impl std::error::Error for CaptureError {}

// === SnapshotError ===

/// Errors surfaced to callers waiting on a thumbnail snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The underlying capture failed; the tab's thumbnail was left unchanged.
    CaptureFailed(CaptureError),
    /// The request was made outside a Tokio runtime, so no timer could be armed.
    NoRuntime,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::CaptureFailed(err) => write!(f, "Snapshot capture failed: {}", err),
            SnapshotError::NoRuntime => write!(f, "Snapshot requested outside an async runtime"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::CaptureFailed(err) => Some(err),
            SnapshotError::NoRuntime => None,
        }
    }
}

impl From<CaptureError> for SnapshotError {
    fn from(err: CaptureError) -> Self {
        SnapshotError::CaptureFailed(err)
    }
}

// === SessionError ===

/// Errors related to session persistence.
#[derive(Debug)]
pub enum SessionError {
    /// Failed to serialize or deserialize session data.
    SerializationError(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::SerializationError(msg) => {
                write!(f, "Session serialization error: {}", msg)
            }
            SessionError::DatabaseError(msg) => {
                write!(f, "Session database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
