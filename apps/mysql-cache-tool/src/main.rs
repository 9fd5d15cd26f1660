//! `mysql-cache` — creates the table and index a MySQL-backed distributed
//! cache expects, without disturbing an existing deployment.

use clap::{CommandFactory, Parser, Subcommand};
use tracing::{error, info, warn};

use mysql_cache_core::{provision, ProvisionOutcome, ProvisionRequest};

/// Command-line arguments for the provisioning tool.
#[derive(Parser, Debug)]
#[command(
    name = "mysql-cache",
    version,
    about = "Creates table and indexes in a MySQL database to be used for distributed caching"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the cache table in the target database
    Create {
        /// The connection string to connect to the database
        connection_string: String,
        /// Name of the database
        database_name: String,
        /// Name of the table to be created
        table_name: String,
        /// Also create the secondary index on the expiration column
        #[arg(long)]
        eviction_index: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = match cli.command {
        Command::Create {
            connection_string,
            database_name,
            table_name,
            eviction_index,
        } => {
            if connection_string.is_empty() || database_name.is_empty() || table_name.is_empty() {
                warn!("Invalid input");
                let _ = Cli::command().print_help();
                2
            } else {
                let request = ProvisionRequest {
                    url: connection_string,
                    database: database_name,
                    table: table_name,
                    eviction_index,
                };
                run_create(&request).await
            }
        }
    };
    std::process::exit(code);
}

/// Maps the provisioning outcome onto the documented exit codes.
async fn run_create(request: &ProvisionRequest) -> i32 {
    match provision(request).await {
        Ok(ProvisionOutcome::Created) => {
            info!("Table and index were created successfully.");
            0
        }
        Ok(ProvisionOutcome::AlreadyExists) => {
            warn!(
                "Table '{}' in database '{}' already exists. Provide a different table name and try again.",
                request.table, request.database
            );
            1
        }
        Err(err) => {
            error!("An error occurred. {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_parses_positional_arguments_and_flag() {
        let cli = Cli::parse_from([
            "mysql-cache",
            "create",
            "mysql://localhost/cachedb",
            "cachedb",
            "AppCache",
            "--eviction-index",
        ]);
        let Command::Create {
            connection_string,
            database_name,
            table_name,
            eviction_index,
        } = cli.command;
        assert_eq!(connection_string, "mysql://localhost/cachedb");
        assert_eq!(database_name, "cachedb");
        assert_eq!(table_name, "AppCache");
        assert!(eviction_index);
    }

    #[test]
    fn eviction_index_defaults_off() {
        let cli = Cli::parse_from([
            "mysql-cache",
            "create",
            "mysql://localhost/cachedb",
            "cachedb",
            "AppCache",
        ]);
        let Command::Create { eviction_index, .. } = cli.command;
        assert!(!eviction_index);
    }

    #[test]
    fn missing_arguments_are_usage_errors() {
        let err =
            Cli::try_parse_from(["mysql-cache", "create", "mysql://localhost"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_subcommand_is_a_usage_error() {
        let err = Cli::try_parse_from(["mysql-cache"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
