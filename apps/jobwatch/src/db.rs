use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Opens (creating if missing) the SQLite file at `path`.
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    info!("Opening SQLite database at {}...", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = connect(options).await?;

    info!("SQLite database ready");
    Ok(pool)
}

/// In-memory database. Lives as long as the returned pool.
#[cfg(test)]
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    connect("sqlite::memory:".parse::<SqliteConnectOptions>()?).await
}

// One connection: the program is the only writer, and an in-memory database
// exists per connection.
async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}
