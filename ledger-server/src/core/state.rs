use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::ledger::LedgerEngine;
use crate::utils::AppError;

/// Server state — shared handles for every request
///
/// Cheap to clone: the database handle and the engine inside it are
/// reference-counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// The ledger transaction engine, sole writer of the ledger tables
    pub ledger: LedgerEngine,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let ledger = LedgerEngine::new(db.clone(), config.default_timezone);
        Self { config, db, ledger }
    }

    /// Initialize the server state:
    /// 1. ensure the work directory layout exists
    /// 2. open the on-disk database and apply the schema
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("mostrador.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// State backed by an in-memory database (tests)
    pub async fn in_memory(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        Ok(Self::new(config, db_service.db))
    }

    /// Get a database handle
    pub fn db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
