//! Schema definitions and migration utilities.
//!
//! This module provides embedded SQL schema definitions and utilities
//! for managing database migrations.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the credential store (001_users.sql).
pub const USERS_MIGRATION: &str = include_str!("../../../migrations/001_users.sql");

/// Embedded migration SQL for notes and the full-text index (002_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/002_notes.sql");

/// Run all migrations against the database.
///
/// Idempotent: every statement uses `IF NOT EXISTS`.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running users migration (001_users.sql)...");
    sqlx::raw_sql(USERS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Users migration failed: {}", e)))?;

    tracing::debug!("Running notes migration (002_notes.sql)...");
    sqlx::raw_sql(NOTES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if both the `users` and `notes` tables exist.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) = 2
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_name IN ('users', 'notes')
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
