use std::fmt;

use thiserror::Error;

/// Backing service a connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Store,
    Cache,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Store => f.write_str("store"),
            Service::Cache => f.write_str("cache"),
        }
    }
}

/// Errors that can occur while establishing a connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("{service} connection attempt failed: {reason}")]
    AttemptFailed { service: Service, reason: String },
    #[error("{service} connection attempt timed out after {timeout_ms}ms")]
    TimedOut { service: Service, timeout_ms: u64 },
    #[error("{service} connection failed after {attempts} attempts: {last_error}")]
    Exhausted {
        service: Service,
        attempts: u32,
        last_error: String,
    },
    #[error("{service} connect task aborted: {reason}")]
    Aborted { service: Service, reason: String },
    #[error("{service} connection refused: connection manager is closed")]
    Closed { service: Service },
}

impl ConnectionError {
    pub fn service(&self) -> Service {
        match self {
            ConnectionError::AttemptFailed { service, .. }
            | ConnectionError::TimedOut { service, .. }
            | ConnectionError::Exhausted { service, .. }
            | ConnectionError::Aborted { service, .. }
            | ConnectionError::Closed { service } => *service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display() {
        let error = ConnectionError::Exhausted {
            service: Service::Cache,
            attempts: 6,
            last_error: "Connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "cache connection failed after 6 attempts: Connection refused"
        );
    }

    #[test]
    fn test_timed_out_display() {
        let error = ConnectionError::TimedOut {
            service: Service::Store,
            timeout_ms: 250,
        };
        assert_eq!(
            error.to_string(),
            "store connection attempt timed out after 250ms"
        );
    }

    #[test]
    fn test_service_accessor() {
        let error = ConnectionError::Closed {
            service: Service::Store,
        };
        assert_eq!(error.service(), Service::Store);
    }
}
