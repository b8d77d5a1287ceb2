use std::time::Duration;

use diesel::{
    r2d2::{ConnectionManager, Pool, PooledConnection},
    PgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use http::StatusCode;
use log::info;

use crate::{config::C, error::Error};

pub mod campaign;
pub mod content;
pub mod content_strategy;
pub mod knowledge_file;
pub mod organization;
pub mod saved_search;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

lazy_static! {
    static ref POOL: DbPool = Pool::builder()
        .max_size(C.db.pool_size.max(1))
        .connection_timeout(Duration::from_secs(C.db.connection_timeout_secs.max(1)))
        .build_unchecked(ConnectionManager::new(C.database_url()));
}

/// Check out a connection from the process-wide pool.
/// Blocks; async callers go through [`run`].
pub fn establish_connection() -> Result<DbConnection, Error> {
    POOL.get().map_err(|e| e.into())
}

/// Run a database section with a pooled connection on tokio's blocking
/// pool, keeping runtime workers free for other requests.
pub async fn run<T, F>(section: F) -> Result<T, Error>
where
    F: FnOnce(&mut PgConnection) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    blocking(move || {
        let mut pooled = establish_connection()?;
        section(&mut *pooled)
    })
    .await
}

async fn blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(e) => Err(Error::General(
            format!("Database task aborted: {}", e),
            StatusCode::INTERNAL_SERVER_ERROR,
        )),
    }
}

pub fn do_migration() -> Result<(), Error> {
    let mut pooled = establish_connection()?;
    let conn: &mut PgConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        Error::General(
            format!("Migration failed: {}", e),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    })?;
    info!("{} migration(s) applied", applied.len());
    Ok(())
}
