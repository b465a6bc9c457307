//! Mostrador Ledger Server - POS and cash-management back end
//!
//! # Architecture overview
//!
//! - **Ledger engine** (`ledger`): the transactional core; sales, cash
//!   movements, stock decrements and summary increments commit atomically
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **HTTP API** (`api`): RESTful surface, shop-scoped routes
//! - **Identity** (`auth`): caller identity forwarded by the access-control
//!   proxy
//!
//! # Module structure
//!
//! ```text
//! ledger-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # caller identity extraction
//! ├── ledger/        # the transaction engine and line resolution
//! ├── db/            # database layer and repositories
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, time, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerEngine, LedgerError};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env file, then logging.
///
/// Call once at startup before loading [`Config`].
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
