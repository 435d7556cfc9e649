use diesel::{ConnectionError, ConnectionResult, SqliteConnection, result};
use diesel_async::pooled_connection::deadpool::{BuildError, Object, Pool};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl, SimpleAsyncConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::data::migrations::{self, SchemaStatus};

pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

/// Applied to every pooled connection when it is opened.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Failed to build connection pool: {0}")]
    Pool(#[from] BuildError),
    #[error("Database query failed: {0}")]
    Query(#[from] result::Error),
}

/// Process-wide handle on the connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<DbConnection>,
}

impl Database {
    pub fn new(database_url: &str, max_size: usize) -> Result<Self, DatabaseError> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);

        let manager = AsyncDieselConnectionManager::<DbConnection>::new_with_config(
            database_url,
            manager_config,
        );

        let pool = Pool::builder(manager).max_size(max_size).build()?;

        tracing::info!("DB connection pool created");

        Ok(Database { pool })
    }

    /// Checks a connection out of the pool. It returns to the pool on drop,
    /// whichever way the caller exits.
    pub async fn get_connection(&self) -> Result<Object<DbConnection>, result::Error> {
        self.pool.get().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })
    }

    /// Round-trips a trivial statement to prove the store is reachable.
    pub async fn ping(&self) -> Result<(), result::Error> {
        let mut conn = self.get_connection().await?;
        conn.batch_execute("SELECT 1").await
    }

    pub async fn ensure_schema(&self) -> Result<SchemaStatus, result::Error> {
        let mut conn = self.get_connection().await?;
        migrations::ensure_schema(&mut conn).await
    }
}

/// Rowid of the last insert made on this connection.
pub async fn last_insert_rowid(conn: &mut DbConnection) -> Result<i32, result::Error> {
    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
        "last_insert_rowid()",
    ))
    .get_result(conn)
    .await
}

/// Takes SQLite's write lock for the enclosing transaction before it reads
/// anything. A deferred transaction that reads first cannot upgrade its lock
/// while another writer is active and fails at once with SQLITE_BUSY; one that
/// writes first waits out `busy_timeout` instead.
pub async fn acquire_write_lock(conn: &mut DbConnection) -> Result<(), result::Error> {
    diesel::sql_query("UPDATE orders SET id = id WHERE 0")
        .execute(conn)
        .await
        .map(|_| ())
}

fn establish_connection(database_url: &str) -> BoxFuture<'_, ConnectionResult<DbConnection>> {
    async move {
        let mut conn = DbConnection::establish(database_url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}
