//! Schema bootstrap
//!
//! Idempotent table and index definitions, applied at startup. Tables stay
//! schemaless; the typed models are the contract, the indexes serve the
//! shop-scoped list queries.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::AppError;

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS product_shop ON TABLE product COLUMNS shop_id;

    DEFINE TABLE IF NOT EXISTS sale SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS sale_shop_created ON TABLE sale COLUMNS shop_id, created_at;

    DEFINE TABLE IF NOT EXISTS cash_movement SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS cash_movement_shop_occurred ON TABLE cash_movement COLUMNS shop_id, occurred_at;

    DEFINE TABLE IF NOT EXISTS cash_shift SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS cash_shift_shop_opened ON TABLE cash_shift COLUMNS shop_id, opened_at;

    DEFINE TABLE IF NOT EXISTS daily_summary SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS daily_summary_shop_period ON TABLE daily_summary COLUMNS shop_id, period;

    DEFINE TABLE IF NOT EXISTS monthly_summary SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS monthly_summary_shop_period ON TABLE monthly_summary COLUMNS shop_id, period;

    DEFINE TABLE IF NOT EXISTS shop_settings SCHEMALESS;
"#;

/// Apply the schema definitions (safe to run on every startup)
pub async fn apply(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

    tracing::info!("Database schema applied");
    Ok(())
}
