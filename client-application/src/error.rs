use thiserror::Error;

use client_domain::{DraftError, GatewayError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] DraftError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("client has shut down")]
    Closed,
}

impl AppError {
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Gateway(GatewayError::Network(_)))
    }
}
