//! Ledger Transaction Engine
//!
//! The single writer for sales, cash movements and aggregate summaries.
//!
//! Both entry points follow the same shape: read the documents they depend
//! on, resolve everything in Rust, then issue one multi-statement SurrealDB
//! transaction (`BEGIN` .. `COMMIT`) that re-checks the read stock with a
//! compare-and-set guard, writes the immutable ledger records and applies
//! the summary increments. A failed guard or a storage-level commit conflict
//! aborts the whole statement block with no partial effects, and the attempt
//! is retried against fresh reads up to [`MAX_TXN_RETRIES`] times.
//!
//! Summary documents are updated with explicit `(field ?? 0) + delta` merge
//! arithmetic so unknown method/category keys spring into existence on first
//! use and concurrent increments compose instead of clobbering.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{
    CashMovement, CashMovementCreate, MovementReceipt, Product, Sale, SaleItem, SaleLine,
    SaleReceipt,
};
use shared::money::{round_qty3, validate_amount_cents};
use shared::types::{CashDirection, MovementKind, PaymentMethod};

use crate::db::repository::summary::{DAILY_TABLE, MONTHLY_TABLE, summary_key};
use crate::db::repository::{ProductRepository, ShopSettingsRepository, new_key};
use crate::utils::time::period_keys;

use super::error::LedgerError;
use super::lines::resolve_line;

/// Retry budget for optimistic-concurrency conflicts
const MAX_TXN_RETRIES: u32 = 5;

/// Thrown inside the transaction when a stock guard detects a stale read
const CONFLICT_TOKEN: &str = "txn-conflict";

#[derive(Clone)]
pub struct LedgerEngine {
    db: Surreal<Db>,
    default_tz: Tz,
}

impl LedgerEngine {
    pub fn new(db: Surreal<Db>, default_tz: Tz) -> Self {
        Self { db, default_tz }
    }

    /// Business timezone for a shop: its settings record, or the configured
    /// default. An unparseable stored zone falls back to the default rather
    /// than failing the write.
    pub async fn shop_timezone(&self, shop_id: &str) -> Result<Tz, LedgerError> {
        let settings = ShopSettingsRepository::new(self.db.clone())
            .get(shop_id)
            .await?;

        Ok(match settings {
            Some(s) => s.timezone.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(
                    shop_id,
                    timezone = %s.timezone,
                    "Stored timezone is invalid, using default"
                );
                self.default_tz
            }),
            None => self.default_tz,
        })
    }

    /// Record a multi-line sale: stock decrements, the immutable sale, its
    /// sale-kind cash movement and the day/month summary increments, all in
    /// one atomic commit.
    pub async fn record_sale(
        &self,
        shop_id: &str,
        created_by: &str,
        payment_method: PaymentMethod,
        lines: &[SaleLine],
    ) -> Result<SaleReceipt, LedgerError> {
        if lines.is_empty() {
            return Err(LedgerError::Validation("items must not be empty".into()));
        }

        let tz = self.shop_timezone(shop_id).await?;
        let products = ProductRepository::new(self.db.clone());

        for attempt in 1..=MAX_TXN_RETRIES {
            // Read the current snapshot of every referenced product
            let mut snapshot: BTreeMap<String, Product> = BTreeMap::new();
            for line in lines {
                let pid = line.product_id();
                if !snapshot.contains_key(pid) {
                    let product = products
                        .find_by_id(shop_id, pid)
                        .await?
                        .ok_or_else(|| LedgerError::ProductNotFound(pid.to_string()))?;
                    snapshot.insert(pid.to_string(), product);
                }
            }

            // Resolve lines in request order; repeated products see the
            // stock remaining after their earlier lines
            let mut running: BTreeMap<String, f64> = snapshot
                .iter()
                .map(|(pid, p)| (pid.clone(), p.stock_qty))
                .collect();
            let mut items: Vec<SaleItem> = Vec::with_capacity(lines.len());
            let mut total_cents: i64 = 0;
            let mut total_qty_kg: f64 = 0.0;

            for line in lines {
                let pid = line.product_id();
                let product = &snapshot[pid];
                let resolved = resolve_line(product, running[pid], line)?;
                running.insert(pid.to_string(), resolved.new_stock);
                total_cents += resolved.item.total_cents;
                total_qty_kg = round_qty3(total_qty_kg + resolved.item.qty_kg);
                items.push(resolved.item);
            }

            let now = shared::util::now_millis();
            let (day_key, month_key) = period_keys(now, tz);
            let sale_key = new_key();
            let movement_key = new_key();

            let sale = Sale {
                id: None,
                shop_id: shop_id.to_string(),
                created_at: now,
                created_by: created_by.to_string(),
                payment_method,
                items: items.clone(),
                total_qty_kg,
                total_cents,
            };
            let movement = CashMovement {
                id: None,
                shop_id: shop_id.to_string(),
                kind: MovementKind::Sale,
                direction: CashDirection::In,
                method: payment_method,
                category: None,
                amount_cents: total_cents,
                note: None,
                occurred_at: now,
                created_at: now,
                created_by: created_by.to_string(),
                sale_id: Some(sale_key.clone()),
            };

            // Assemble the transaction: guarded stock writes first, then the
            // ledger records, then the summary increments
            let mut query = String::from("BEGIN TRANSACTION;\n");
            let mut params = serde_json::Map::new();

            for (i, (pid, product)) in snapshot.iter().enumerate() {
                query.push_str(&format!(
                    "LET $stock{i} = (SELECT VALUE stock_qty FROM type::thing('product', $pid{i}))[0];\n\
                     IF $stock{i} == NONE OR $stock{i} != $expect{i} {{ THROW '{CONFLICT_TOKEN}' }};\n\
                     UPDATE type::thing('product', $pid{i}) SET stock_qty = $final{i}, updated_at = $now RETURN NONE;\n"
                ));
                params.insert(format!("pid{i}"), json!(pid));
                params.insert(format!("expect{i}"), json!(product.stock_qty));
                params.insert(format!("final{i}"), json!(running[pid]));
            }

            query.push_str(
                "CREATE type::thing('sale', $sale_key) CONTENT $sale RETURN NONE;\n\
                 CREATE type::thing('cash_movement', $movement_key) CONTENT $movement RETURN NONE;\n",
            );

            let method = payment_method.as_str();
            for (table, key_param, period_param) in [
                (DAILY_TABLE, "$daily_key", "$day"),
                (MONTHLY_TABLE, "$monthly_key", "$month"),
            ] {
                query.push_str(&format!(
                    "UPSERT type::thing('{table}', {key_param}) SET \
                         shop_id = $shop, \
                         period = {period_param}, \
                         updated_at = $now, \
                         sales_count = (sales_count ?? 0) + 1, \
                         sales_total_cents = (sales_total_cents ?? 0) + $total, \
                         sales_by_method = sales_by_method ?? {{}}, \
                         sales_by_method.{method} = (sales_by_method.{method} ?? 0) + $total, \
                         cash_in_cents = (cash_in_cents ?? 0) + $total, \
                         cash_net_cents = (cash_net_cents ?? 0) + $total, \
                         cash_in_by_method = cash_in_by_method ?? {{}}, \
                         cash_in_by_method.{method} = (cash_in_by_method.{method} ?? 0) + $total \
                     RETURN NONE;\n"
                ));
            }
            query.push_str("COMMIT TRANSACTION;");

            params.insert("now".into(), json!(now));
            params.insert("shop".into(), json!(shop_id));
            params.insert("total".into(), json!(total_cents));
            params.insert("sale_key".into(), json!(sale_key));
            params.insert("movement_key".into(), json!(movement_key));
            params.insert("sale".into(), serde_json::to_value(&sale).unwrap_or_default());
            params.insert(
                "movement".into(),
                serde_json::to_value(&movement).unwrap_or_default(),
            );
            params.insert("daily_key".into(), json!(summary_key(shop_id, &day_key)));
            params.insert(
                "monthly_key".into(),
                json!(summary_key(shop_id, &month_key)),
            );
            params.insert("day".into(), json!(day_key));
            params.insert("month".into(), json!(month_key));

            let result = self
                .db
                .query(query)
                .bind(serde_json::Value::Object(params))
                .await
                .and_then(|response| response.check());

            match result {
                Ok(_) => {
                    tracing::info!(
                        shop_id,
                        sale_id = %sale_key,
                        total_cents,
                        items = items.len(),
                        "Sale recorded"
                    );
                    return Ok(SaleReceipt {
                        sale_id: sale_key,
                        total_cents,
                        total_qty_kg,
                        items,
                    });
                }
                Err(e) if is_conflict(&e) => {
                    tracing::debug!(shop_id, attempt, "Sale transaction conflicted, retrying");
                    continue;
                }
                Err(e) => return Err(LedgerError::Database(e.to_string())),
            }
        }

        Err(LedgerError::Conflict(MAX_TXN_RETRIES))
    }

    /// Record a manual cash movement and its summary increments in one
    /// atomic commit.
    pub async fn record_cash_movement(
        &self,
        shop_id: &str,
        created_by: &str,
        data: CashMovementCreate,
    ) -> Result<MovementReceipt, LedgerError> {
        let category = data.category.trim().to_lowercase();
        if category.is_empty() {
            return Err(LedgerError::Validation("category must not be empty".into()));
        }
        validate_amount_cents(data.amount_cents)
            .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;

        let tz = self.shop_timezone(shop_id).await?;

        let now = shared::util::now_millis();
        let occurred_at = data.occurred_at.unwrap_or(now);
        let (day_key, month_key) = period_keys(occurred_at, tz);

        let movement_key = new_key();
        let signed = data.amount_cents * data.direction.signum();
        let movement = CashMovement {
            id: None,
            shop_id: shop_id.to_string(),
            kind: MovementKind::Manual,
            direction: data.direction,
            method: data.method,
            category: Some(category.clone()),
            amount_cents: data.amount_cents,
            note: data
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            occurred_at,
            created_at: now,
            created_by: created_by.to_string(),
            sale_id: None,
        };

        let method = data.method.as_str();
        let category_field = field_key(&category);
        let directional = match data.direction {
            CashDirection::In => format!(
                "cash_in_cents = (cash_in_cents ?? 0) + $amount, \
                 cash_in_by_method = cash_in_by_method ?? {{}}, \
                 cash_in_by_method.{method} = (cash_in_by_method.{method} ?? 0) + $amount"
            ),
            CashDirection::Out => format!(
                "cash_out_cents = (cash_out_cents ?? 0) + $amount, \
                 cash_out_by_method = cash_out_by_method ?? {{}}, \
                 cash_out_by_method.{method} = (cash_out_by_method.{method} ?? 0) + $amount"
            ),
        };

        let mut query = String::from(
            "BEGIN TRANSACTION;\n\
             CREATE type::thing('cash_movement', $movement_key) CONTENT $movement RETURN NONE;\n",
        );
        for (table, key_param, period_param) in [
            (DAILY_TABLE, "$daily_key", "$day"),
            (MONTHLY_TABLE, "$monthly_key", "$month"),
        ] {
            query.push_str(&format!(
                "UPSERT type::thing('{table}', {key_param}) SET \
                     shop_id = $shop, \
                     period = {period_param}, \
                     updated_at = $now, \
                     cash_net_cents = (cash_net_cents ?? 0) + $signed, \
                     cash_by_category = cash_by_category ?? {{}}, \
                     cash_by_category.{category_field} = (cash_by_category.{category_field} ?? 0) + $signed, \
                     {directional} \
                 RETURN NONE;\n"
            ));
        }
        query.push_str("COMMIT TRANSACTION;");

        let mut params = serde_json::Map::new();
        params.insert("now".into(), json!(now));
        params.insert("shop".into(), json!(shop_id));
        params.insert("amount".into(), json!(data.amount_cents));
        params.insert("signed".into(), json!(signed));
        params.insert("movement_key".into(), json!(movement_key));
        params.insert(
            "movement".into(),
            serde_json::to_value(&movement).unwrap_or_default(),
        );
        params.insert("daily_key".into(), json!(summary_key(shop_id, &day_key)));
        params.insert(
            "monthly_key".into(),
            json!(summary_key(shop_id, &month_key)),
        );
        params.insert("day".into(), json!(day_key));
        params.insert("month".into(), json!(month_key));

        for attempt in 1..=MAX_TXN_RETRIES {
            let result = self
                .db
                .query(query.clone())
                .bind(serde_json::Value::Object(params.clone()))
                .await
                .and_then(|response| response.check());

            match result {
                Ok(_) => {
                    tracing::info!(
                        shop_id,
                        movement_id = %movement_key,
                        direction = %data.direction,
                        amount_cents = data.amount_cents,
                        "Cash movement recorded"
                    );
                    return Ok(MovementReceipt {
                        movement_id: movement_key,
                    });
                }
                Err(e) if is_conflict(&e) => {
                    tracing::debug!(shop_id, attempt, "Movement transaction conflicted, retrying");
                    continue;
                }
                Err(e) => return Err(LedgerError::Database(e.to_string())),
            }
        }

        Err(LedgerError::Conflict(MAX_TXN_RETRIES))
    }
}

/// Stale stock guard or a storage-level commit conflict; both retry cleanly
fn is_conflict(err: &surrealdb::Error) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains(CONFLICT_TOKEN) || msg.contains("conflict") || msg.contains("can be retried")
}

/// Escape an arbitrary category key for use as an object field in the query
/// text. Keys are already normalized to trimmed lowercase; the bracket
/// characters themselves are the only thing that could break out.
fn field_key(key: &str) -> String {
    let clean: String = key.chars().filter(|c| *c != '⟨' && *c != '⟩').collect();
    format!("⟨{clean}⟩")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_key_escapes_brackets() {
        assert_eq!(field_key("proveedor"), "⟨proveedor⟩");
        assert_eq!(field_key("caja chica"), "⟨caja chica⟩");
        assert_eq!(field_key("a⟩b⟨c"), "⟨abc⟩");
    }
}
