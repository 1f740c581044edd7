// database/init.rs

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use dotenv::dotenv;
use log::info;
use std::env;
use thiserror::Error;
use tokio_postgres::{Config as PgConfig, NoTls};

use crate::database::migrations::apply_migrations;

/// Database initialization error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("failed to parse DATABASE_URL: {0}")]
    ParseError(String),

    #[error("failed to create pool: {0}")]
    PoolCreationError(String),

    #[error("migration error: {0}")]
    MigrationError(String),
}

/// Loads the DATABASE_URL from the environment (or a .env file).
fn load_database_url() -> Result<String, DbError> {
    dotenv().ok();
    env::var("DATABASE_URL").map_err(|_| DbError::EnvVarNotFound("DATABASE_URL".to_string()))
}

/// Builds a connection pool from a PostgreSQL connection string.
fn create_pool(database_url: &str) -> Result<Pool, DbError> {
    let pg_config = database_url
        .parse::<PgConfig>()
        .map_err(|e| DbError::ParseError(e.to_string()))?;

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(manager)
        .max_size(16)
        .build()
        .map_err(|e| DbError::PoolCreationError(e.to_string()))
}

/// Initializes the connection pool and applies schema migrations.
pub async fn init_db() -> Result<Pool, DbError> {
    let database_url = load_database_url()?;
    let pool = create_pool(&database_url)?;

    let client = pool
        .get()
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    apply_migrations(&client)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    info!("database pool initialized and migrations applied");
    Ok(pool)
}
