//! The provisioning workflow: validate, connect, probe, create, report.

use sqlx::Connection;
use tracing::{debug, warn};

use crate::connect;
use crate::error::{ProvisionError, Result};
use crate::schema::SchemaStatements;
use crate::session::Session;

/// One provisioning request, built by the caller and owned for its lifetime.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Connection string for the target server
    pub url: String,
    /// Database that will hold the cache table
    pub database: String,
    /// Name of the table to create
    pub table: String,
    /// Also create the index on the expiration column (off by default)
    pub eviction_index: bool,
}

/// Terminal outcome of a provisioning run.
///
/// Failures travel as [`ProvisionError`]; `AlreadyExists` is reported
/// distinctly from `Created` so the caller can choose its own severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The table (and requested index) was created and committed
    Created,
    /// The table already exists; no create statement was issued
    AlreadyExists,
}

/// Provisions the cache table described by `request`.
///
/// Runs exactly once: no retries, one terminal outcome. Either the table
/// fully exists with its intended structure afterwards, or nothing was
/// committed.
pub async fn provision(request: &ProvisionRequest) -> Result<ProvisionOutcome> {
    if request.database.is_empty() {
        return Err(ProvisionError::InvalidArgument("database name"));
    }
    if request.table.is_empty() {
        return Err(ProvisionError::InvalidArgument("table name"));
    }
    let opts = connect::validate(&request.url)?;
    let statements = SchemaStatements::build(&request.database, &request.table);

    let mut session = Session::open(&opts).await?;
    let outcome = create_if_absent(&mut session, &statements, request.eviction_index).await;
    // Release the session on every path; a close failure must not mask the
    // outcome of the operation itself.
    if let Err(err) = session.close().await {
        warn!("session did not close cleanly: {err}");
    }
    outcome
}

async fn create_if_absent(
    session: &mut Session,
    statements: &SchemaStatements,
    eviction_index: bool,
) -> Result<ProvisionOutcome> {
    // The probe runs outside any transaction; a hit short-circuits creation
    // so repeated runs never issue DDL against a provisioned target.
    if session.table_exists(&statements.table_info).await? {
        return Ok(ProvisionOutcome::AlreadyExists);
    }

    let mut tx = session
        .connection()
        .begin()
        .await
        .map_err(|source| ProvisionError::Creation {
            source,
            rollback: None,
        })?;

    let executed = async {
        debug!("creating cache table");
        sqlx::raw_sql(&statements.create_table).execute(&mut *tx).await?;
        if eviction_index {
            debug!("creating expiration index");
            sqlx::raw_sql(&statements.create_expiration_index)
                .execute(&mut *tx)
                .await?;
        }
        Ok::<_, sqlx::Error>(())
    }
    .await;

    match executed {
        Ok(()) => {
            tx.commit().await.map_err(|source| ProvisionError::Creation {
                source,
                rollback: None,
            })?;
            Ok(ProvisionOutcome::Created)
        }
        Err(source) => {
            // Roll back before propagating; the original cause stays primary
            // even when the rollback fails too.
            let rollback = tx.rollback().await.err();
            Err(ProvisionError::Creation { source, rollback })
        }
    }
}
