//! Provisioning error types.

use thiserror::Error;

/// Errors produced by the provisioning workflow.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// A request field that must be non-empty was empty
    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),

    /// Connection string rejected before any connection attempt
    #[error("invalid MySQL connection string: {0}")]
    InvalidConfig(#[source] sqlx::Error),

    /// Failed to open a session against the target server
    #[error("failed to connect to the MySQL server: {0}")]
    Connection(#[source] sqlx::Error),

    /// Existence probe failed after the session was opened
    #[error("failed to query the table catalog: {0}")]
    Probe(#[source] sqlx::Error),

    /// DDL failed inside the creation transaction; the transaction was
    /// rolled back, and a rollback failure is preserved alongside the
    /// original cause
    #[error("failed to create the cache table: {source}{}", rollback_note(.rollback))]
    Creation {
        #[source]
        source: sqlx::Error,
        rollback: Option<sqlx::Error>,
    },
}

fn rollback_note(rollback: &Option<sqlx::Error>) -> String {
    match rollback {
        Some(err) => format!(" (rollback also failed: {err})"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ddl_error(msg: &str) -> sqlx::Error {
        sqlx::Error::Protocol(msg.to_string())
    }

    #[test]
    fn creation_message_carries_original_cause() {
        let err = ProvisionError::Creation {
            source: ddl_error("syntax error near 'order'"),
            rollback: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("syntax error near 'order'"));
        assert!(!msg.contains("rollback also failed"));
    }

    #[test]
    fn creation_message_reports_both_causes_when_rollback_fails() {
        let err = ProvisionError::Creation {
            source: ddl_error("table creation denied"),
            rollback: Some(ddl_error("connection lost")),
        };
        let msg = err.to_string();
        assert!(msg.contains("table creation denied"));
        assert!(msg.contains("rollback also failed: "));
        assert!(msg.contains("connection lost"));
        // Original cause classifies and leads the message
        assert!(msg.find("table creation denied").unwrap() < msg.find("connection lost").unwrap());
    }

    #[test]
    fn invalid_argument_names_the_field() {
        let err = ProvisionError::InvalidArgument("database name");
        assert_eq!(err.to_string(), "database name must not be empty");
    }
}
