//! Cash Shift Repository
//!
//! Shift lifecycle is `open -> closed`, closed is terminal. The close
//! transition is guarded in the UPDATE itself (`WHERE status = open`) so a
//! concurrent double close cannot both apply.

use shared::models::{CashShift, ShiftClose, ShiftOpen};
use shared::types::ShiftStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key};

const SHIFT_TABLE: &str = "cash_shift";

#[derive(Clone)]
pub struct ShiftRepository {
    base: BaseRepository,
}

impl ShiftRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, shop_id: &str, id: &str) -> RepoResult<Option<CashShift>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM type::thing($tb, $key) WHERE shop_id = $shop",
            )
            .bind(("tb", SHIFT_TABLE))
            .bind(("key", id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .await?;
        let shifts: Vec<CashShift> = result.take(0)?;
        Ok(shifts.into_iter().next())
    }

    /// Recent shifts, newest opening first
    pub async fn list(&self, shop_id: &str, limit: i64) -> RepoResult<Vec<CashShift>> {
        let shifts: Vec<CashShift> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM cash_shift WHERE shop_id = $shop \
                 ORDER BY opened_at DESC LIMIT $limit",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(shifts)
    }

    /// Open a new shift (input already validated by the handler)
    pub async fn open(
        &self,
        shop_id: &str,
        created_by: &str,
        data: ShiftOpen,
    ) -> RepoResult<CashShift> {
        let now = shared::util::now_millis();
        let key = new_key();

        let shift = CashShift {
            id: None,
            shop_id: shop_id.to_string(),
            cashier_name: data.cashier_name.trim().to_string(),
            status: ShiftStatus::Open,
            opening_cash_cents: data.opening_cash_cents,
            closing_cash_cents: None,
            difference_cents: None,
            opened_at: data.opened_at.unwrap_or(now),
            closed_at: None,
            note: data.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            created_by: created_by.to_string(),
            closed_by: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", SHIFT_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", shift.clone()))
            .await?
            .check()?;

        Ok(CashShift {
            id: Some(key),
            ..shift
        })
    }

    /// Close an open shift.
    ///
    /// The difference is recomputed here from the stored opening count; a
    /// caller-supplied difference is never trusted. Closing a shift that does
    /// not exist is `NotFound`; closing one that is already closed is
    /// `InvalidState`.
    pub async fn close(
        &self,
        shop_id: &str,
        id: &str,
        closed_by: &str,
        data: ShiftClose,
    ) -> RepoResult<CashShift> {
        let existing = self
            .find_by_id(shop_id, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Shift {id} not found")))?;

        if existing.status == ShiftStatus::Closed {
            return Err(RepoError::InvalidState(format!(
                "Shift {id} is already closed"
            )));
        }

        let now = shared::util::now_millis();
        let difference = data.closing_cash_cents - existing.opening_cash_cents;
        let note = data.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing($tb, $key) SET \
                     status = $closed_status, \
                     closing_cash_cents = $closing, \
                     difference_cents = $difference, \
                     closed_at = $closed_at, \
                     closed_by = $closed_by, \
                     note = $note ?? note, \
                     updated_at = $now \
                 WHERE status = $open_status \
                 RETURN *, record::id(id) AS id",
            )
            .bind(("tb", SHIFT_TABLE))
            .bind(("key", id.to_string()))
            .bind(("closed_status", ShiftStatus::Closed))
            .bind(("open_status", ShiftStatus::Open))
            .bind(("closing", data.closing_cash_cents))
            .bind(("difference", difference))
            .bind(("closed_at", data.closed_at.unwrap_or(now)))
            .bind(("closed_by", closed_by.to_string()))
            .bind(("note", note))
            .bind(("now", now))
            .await?;

        let closed: Vec<CashShift> = result.take(0)?;
        closed.into_iter().next().ok_or_else(|| {
            // Lost a close race between the status read and the guarded update
            RepoError::InvalidState(format!("Shift {id} is already closed"))
        })
    }
}
