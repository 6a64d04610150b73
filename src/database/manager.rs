use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens and prepares the PostgreSQL pool for the note store
pub struct DatabaseManager;

impl DatabaseManager {
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS notes (
            seq BIGSERIAL,
            id UUID PRIMARY KEY,
            owner UUID NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            tag TEXT NOT NULL DEFAULT 'General',
            date TIMESTAMPTZ NOT NULL DEFAULT now()
        )
    "#;

    const OWNER_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS notes_owner_seq_idx ON notes (owner, seq)";

    /// Connect using the configured URL and pool limits, then make sure the notes table exists
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let target = Self::describe_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Connected to note database at {}", target);

        Self::ensure_schema(&pool).await?;
        Ok(pool)
    }

    /// Create the notes table and its owner index if missing
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(Self::SCHEMA).execute(pool).await?;
        sqlx::query(Self::OWNER_INDEX).execute(pool).await?;
        Ok(())
    }

    /// host:port/dbname without credentials, for logs
    fn describe_url(raw: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(DatabaseError::InvalidDatabaseUrl);
        }

        let host = url.host_str().unwrap_or("localhost");
        let port = url.port().unwrap_or(5432);
        Ok(format!("{}:{}{}", host, port, url.path()))
    }
}
