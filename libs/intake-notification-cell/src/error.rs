use thiserror::Error;

use shared_models::ApiError;

use crate::models::RunStage;

/// Setup failures that abort a run before any notification is attempted.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("API connection/key verification failed: {0}")]
    Connectivity(#[source] ApiError),

    #[error("Failed to get current user ID for sending messages: {0}")]
    Identity(String),

    #[error("Failed to fetch appointment data from API: {0}")]
    Collection(#[source] ApiError),
}

impl NotificationError {
    pub fn stage(&self) -> RunStage {
        match self {
            NotificationError::Connectivity(_) => RunStage::Connectivity,
            NotificationError::Identity(_) => RunStage::Identity,
            NotificationError::Collection(_) => RunStage::Collection,
        }
    }
}
