use crate::db::schema::SQLITE_INIT;
use crate::error::SchedError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SchedStorage {
    pool: SqlitePool,
}

impl SchedStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the SQLite file if missing.
    pub async fn connect(database_url: &str) -> Result<Self, SchedError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SchedError> {
        // sqlx::query runs one statement at a time
        let mut applied = 0usize;
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            debug!(statement = s.lines().next().unwrap_or_default(), "applying DDL");
            sqlx::query(s).execute(&self.pool).await?;
            applied += 1;
        }
        info!(statements = applied, "schema initialized");
        Ok(())
    }
}
