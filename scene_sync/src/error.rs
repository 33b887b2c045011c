use std::{error::Error, fmt};

use scene::SceneError;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    Scene(SceneError),
    /// The render context was torn down.
    ContextClosed,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Scene(err) => err.fmt(f),
            SyncError::ContextClosed => f.write_str("render context has been torn down"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SyncError::Scene(err) => Some(err),
            SyncError::ContextClosed => None,
        }
    }
}

impl From<SceneError> for SyncError {
    fn from(value: SceneError) -> Self {
        SyncError::Scene(value)
    }
}
