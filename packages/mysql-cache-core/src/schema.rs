//! SQL statement text for the cache table schema.
//!
//! Identifiers are interpolated into the statement text rather than bound as
//! parameters: MySQL cannot bind database or table names in DDL. Callers are
//! trusted operators, not untrusted end users; the only hardening applied is
//! backtick quoting with embedded backticks doubled.

/// Literal SQL statements for probing and creating the cache table.
///
/// Derived deterministically from the database and table names; rebuilt per
/// request, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatements {
    /// Single-row-bounded existence probe against the table catalog
    pub table_info: String,
    /// Creates the cache table with the columns a cache client expects
    pub create_table: String,
    /// Secondary index on the expiration column, for eviction sweeps
    pub create_expiration_index: String,
}

impl SchemaStatements {
    /// Builds the statement set for `database`.`table`.
    pub fn build(database: &str, table: &str) -> Self {
        let qualified = format!("{}.{}", quote_identifier(database), quote_identifier(table));

        // Probes INFORMATION_SCHEMA so existence never scans the table itself.
        let table_info = format!(
            "SELECT TABLE_SCHEMA, TABLE_NAME FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' LIMIT 1",
            escape_literal(database),
            escape_literal(table),
        );

        let create_table = format!(
            "CREATE TABLE {qualified} (\
             `Id` varchar(449) CHARACTER SET ascii COLLATE ascii_bin NOT NULL, \
             `AbsoluteExpiration` datetime(6) NULL, \
             `ExpiresAtTime` datetime(6) NOT NULL, \
             `SlidingExpirationInSeconds` bigint NULL, \
             `Value` longblob NOT NULL, \
             PRIMARY KEY (`Id`))",
        );

        let create_expiration_index = format!(
            "CREATE INDEX `Index_ExpiresAtTime` ON {qualified} (`ExpiresAtTime`)",
        );

        Self {
            table_info,
            create_table,
            create_expiration_index,
        }
    }
}

/// Wraps an identifier in backticks, doubling any embedded backticks.
fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

/// Escapes single quotes in a string literal position.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
