//! Database Module
//!
//! Embedded SurrealDB connection and schema bootstrap. The local engine
//! (RocksDB on disk, memory in tests) gives us serializable document
//! transactions, which is what the ledger core builds on.

pub mod repository;
pub mod schema;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "mostrador";
const DATABASE: &str = "ledger";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::finish(db).await?;
        tracing::info!("Database ready at {db_path} (SurrealDB/RocksDB)");
        Ok(service)
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::finish(db).await
    }

    async fn finish(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        schema::apply(&db).await?;

        Ok(Self { db })
    }
}
