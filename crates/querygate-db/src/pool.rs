use crate::executor::QueryExecutor;
use crate::{mysql, sqlite};
use async_trait::async_trait;
use querygate_core::{ExecOutcome, QuerygateError, Row};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Connection;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_open: u32,
    /// Connections kept warm; idle ones above this are reclaimed over time.
    pub max_idle: u32,
    /// How long a request waits to check out a connection.
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>, max_open: u32, max_idle: u32) -> Self {
        Self {
            url: url.into(),
            max_open,
            max_idle,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    fn validate(&self) -> Result<(), QuerygateError> {
        if self.url.trim().is_empty() {
            return Err(QuerygateError::Configuration(
                "database url is empty".into(),
            ));
        }
        if self.max_open == 0 {
            return Err(QuerygateError::Configuration(
                "max open connections must be positive".into(),
            ));
        }
        if self.max_idle > self.max_open {
            return Err(QuerygateError::Configuration(format!(
                "max idle connections ({}) exceeds max open connections ({})",
                self.max_idle, self.max_open
            )));
        }
        Ok(())
    }
}

/// Process-wide pooled handle. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub enum Database {
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Builds the pool without connecting. Only the connection string and
    /// limits are checked here; see [`Database::verify_reachable`].
    pub fn initialize(settings: &PoolSettings) -> Result<Self, QuerygateError> {
        settings.validate()?;
        let url = settings.url.trim();
        let database = if url.starts_with("mysql:") {
            let options = MySqlConnectOptions::from_str(url).map_err(configuration_error)?;
            let pool = MySqlPoolOptions::new()
                .max_connections(settings.max_open)
                .min_connections(settings.max_idle)
                .acquire_timeout(settings.acquire_timeout)
                .connect_lazy_with(options);
            Database::MySql(pool)
        } else if url.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(url).map_err(configuration_error)?;
            let pool = SqlitePoolOptions::new()
                .max_connections(settings.max_open)
                .min_connections(settings.max_idle)
                .acquire_timeout(settings.acquire_timeout)
                .connect_lazy_with(options);
            Database::Sqlite(pool)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            return Err(QuerygateError::Configuration(format!(
                "unsupported connection string scheme: {scheme:?}"
            )));
        };
        info!(
            backend = database.backend(),
            max_open = settings.max_open,
            max_idle = settings.max_idle,
            "connection pool initialized"
        );
        Ok(database)
    }

    /// Checks out a connection and pings it.
    pub async fn verify_reachable(&self) -> Result<(), QuerygateError> {
        match self {
            Database::MySql(pool) => {
                let mut conn = pool.acquire().await.map_err(connectivity_error)?;
                conn.ping().await.map_err(connectivity_error)
            }
            Database::Sqlite(pool) => {
                let mut conn = pool.acquire().await.map_err(connectivity_error)?;
                conn.ping().await.map_err(connectivity_error)
            }
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Database::MySql(_) => "mysql",
            Database::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl QueryExecutor for Database {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>, QuerygateError> {
        match self {
            Database::MySql(pool) => mysql::fetch_rows(pool, sql).await,
            Database::Sqlite(pool) => sqlite::fetch_rows(pool, sql).await,
        }
    }

    async fn execute(&self, sql: &str) -> Result<ExecOutcome, QuerygateError> {
        match self {
            Database::MySql(pool) => mysql::execute(pool, sql).await,
            Database::Sqlite(pool) => sqlite::execute(pool, sql).await,
        }
    }
}

fn configuration_error(err: sqlx::Error) -> QuerygateError {
    QuerygateError::Configuration(err.to_string())
}

fn connectivity_error(err: sqlx::Error) -> QuerygateError {
    QuerygateError::Connectivity(err.to_string())
}
