mod artifact_repository;
mod bootstrap;
mod catalog_repository;
mod models;
mod task_repository;

use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;
use std::sync::Arc;

pub use artifact_repository::*;
pub use catalog_repository::*;
pub use models::*;
pub use task_repository::*;

/// SQLite needs a busy timeout here: pollers read task rows while the
/// background unit commits progress updates on another connection.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA busy_timeout = 5000;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    pub fn new(db_path: &str) -> Self {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .expect("Failed to create pool.");

        Database {
            pool: Arc::new(pool),
        }
    }

    pub fn get_conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().expect("Failed to get connection")
    }

    /// Creates all tables this service reads and writes, if missing.
    pub fn initialize_schema(&self) -> Result<(), crate::errors::Error> {
        let mut conn = self.get_conn();
        bootstrap::create_tables(&mut conn)
    }
}
