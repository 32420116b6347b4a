//! Migrate command - Database migration management.

use common::ConfigError;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::commands::CommandResult;
use crate::config::database_from_env;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs) -> CommandResult {
    tracing::info!("Running migration command...");

    let config = database_from_env().ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?;

    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations completed successfully");
        }
    }

    Ok(())
}
