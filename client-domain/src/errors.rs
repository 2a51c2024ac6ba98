// Domain errors

use std::collections::BTreeMap;

use thiserror::Error;

/// Failure talking to the event service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed: service down, DNS, timeout, dropped connection.
    #[error("request failed: {0}")]
    Network(String),
    /// The service answered with a non-2xx status.
    #[error("service responded {status}")]
    Service {
        status: u16,
        message: Option<String>,
        field_errors: BTreeMap<String, String>,
    },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn service(status: u16, message: Option<String>) -> Self {
        GatewayError::Service {
            status,
            message,
            field_errors: BTreeMap::new(),
        }
    }

    /// The message the service put in its error body, with field errors appended.
    pub fn service_message(&self) -> Option<String> {
        let GatewayError::Service {
            message,
            field_errors,
            ..
        } = self
        else {
            return None;
        };
        let message = message
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        if field_errors.is_empty() {
            return message.map(ToString::to_string);
        }
        let details = field_errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect::<Vec<_>>()
            .join(", ");
        Some(match message {
            Some(message) => format!("{}: {}", message, details),
            None => details,
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Service { status: 404, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Source is required")]
    EmptySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_appends_field_errors() {
        let mut field_errors = BTreeMap::new();
        field_errors.insert(
            "title".to_string(),
            "Title must be between 3 and 200 characters".to_string(),
        );
        let err = GatewayError::Service {
            status: 400,
            message: Some("Validation failed".to_string()),
            field_errors,
        };
        assert_eq!(
            err.service_message().as_deref(),
            Some("Validation failed: title: Title must be between 3 and 200 characters")
        );
    }

    #[test]
    fn blank_service_message_is_absent() {
        let err = GatewayError::service(500, Some("  ".to_string()));
        assert_eq!(err.service_message(), None);
        assert_eq!(GatewayError::Network("refused".into()).service_message(), None);
    }
}
