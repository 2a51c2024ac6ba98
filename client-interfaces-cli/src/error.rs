use thiserror::Error;

use client_application::commands::create_event_commands::CONNECTION_ERROR_HINT;
use client_application::AppError;
use client_domain::GatewayError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Unreachable(String),
    #[error("{0}")]
    Rejected(String),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("client has shut down")]
    Closed,
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Invalid(_) => 2,
            CliError::Unreachable(_) => 3,
            CliError::Rejected(_) => 4,
            CliError::Io(_) | CliError::Closed => 1,
        }
    }
}

impl From<AppError> for CliError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Validation(err) => CliError::Invalid(err.to_string()),
            AppError::Gateway(GatewayError::Network(detail)) => {
                CliError::Unreachable(format!("{} ({})", CONNECTION_ERROR_HINT, detail))
            }
            AppError::Gateway(err @ GatewayError::Service { .. }) => CliError::Rejected(
                err.service_message().unwrap_or_else(|| err.to_string()),
            ),
            AppError::Gateway(err @ GatewayError::Decode(_)) => CliError::Rejected(err.to_string()),
            AppError::Closed => CliError::Closed,
        }
    }
}
