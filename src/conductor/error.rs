use thiserror::Error;

use crate::engine::BackendError;

#[derive(Debug, Error)]
pub enum ConductorError {
    #[error("conductor is already running")]
    AlreadyRunning,
    #[error("conductor is not running")]
    NotRunning,
    #[error("transport queue is full")]
    TransportFull,
    #[error("audio backend failed")]
    Backend(#[from] BackendError),
}
