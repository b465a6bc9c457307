//! Ledger engine integration tests
//!
//! Drive the transaction engine against an in-memory database and verify the
//! atomicity, no-oversell and summary-invariant guarantees end to end.

mod common;

use common::{SHOP, USER, seed_product, stock_of, test_state};
use ledger_server::LedgerError;
use ledger_server::db::repository::{
    CashMovementRepository, SaleRepository, ShopSettingsRepository, SummaryRepository,
};
use ledger_server::utils::time::period_keys;
use shared::models::{CashMovementCreate, SaleLine};
use shared::money::STOCK_EPSILON;
use shared::types::{CashDirection, PaymentMethod};

fn kg_line(product: &shared::models::Product, qty_kg: f64) -> SaleLine {
    SaleLine::Kg {
        product_id: product.id.clone().expect("seeded id"),
        qty_kg,
    }
}

fn amount_line(product: &shared::models::Product, amount_cents: i64) -> SaleLine {
    SaleLine::Amount {
        product_id: product.id.clone().expect("seeded id"),
        amount_cents,
    }
}

fn movement(
    direction: CashDirection,
    method: PaymentMethod,
    category: &str,
    amount_cents: i64,
) -> CashMovementCreate {
    CashMovementCreate {
        direction,
        method,
        category: category.to_string(),
        amount_cents,
        note: None,
        occurred_at: None,
    }
}

#[tokio::test]
async fn multi_item_sale_is_all_or_nothing() {
    let state = test_state().await;
    let p1 = seed_product(&state, "Asado", 900000, 10.0).await;
    let p2 = seed_product(&state, "Matambre", 1100000, 1.0).await;
    let p3 = seed_product(&state, "Vacío", 1300000, 10.0).await;

    // Item 2 of 3 overdraws its stock; the whole sale must abort
    let lines = vec![kg_line(&p1, 2.0), kg_line(&p2, 5.0), kg_line(&p3, 1.0)];
    let result = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &lines)
        .await;
    assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));

    // No stock moved, for any of the three items
    assert_eq!(stock_of(&state, p1.id.as_deref().unwrap()).await, 10.0);
    assert_eq!(stock_of(&state, p2.id.as_deref().unwrap()).await, 1.0);
    assert_eq!(stock_of(&state, p3.id.as_deref().unwrap()).await, 10.0);

    // No sale, no movement, no summary
    let sales = SaleRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert!(sales.is_empty());
    let movements = CashMovementRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert!(movements.is_empty());

    let (day, _) = period_keys(shared::util::now_millis(), state.config.default_timezone);
    let summary = SummaryRepository::new(state.db())
        .daily(SHOP, &day)
        .await
        .unwrap();
    assert!(summary.is_none());
}

#[tokio::test]
async fn concurrent_sales_cannot_oversell() {
    let state = test_state().await;
    let product = seed_product(&state, "Bondiola", 500000, 5.0).await;
    let pid = product.id.clone().unwrap();

    // Combined request (6 kg) exceeds the available 5 kg
    let lines_a = vec![kg_line(&product, 3.0)];
    let lines_b = vec![kg_line(&product, 3.0)];

    let ledger_a = state.ledger.clone();
    let ledger_b = state.ledger.clone();
    let (ra, rb) = tokio::join!(
        ledger_a.record_sale(SHOP, USER, PaymentMethod::Cash, &lines_a),
        ledger_b.record_sale(SHOP, USER, PaymentMethod::Debit, &lines_b),
    );

    // Exactly one side commits; the loser observes the refreshed stock and
    // fails the business check
    assert!(
        ra.is_ok() != rb.is_ok(),
        "expected exactly one success, got {ra:?} / {rb:?}"
    );
    let loser = if ra.is_ok() { rb } else { ra };
    assert!(matches!(
        loser,
        Err(LedgerError::InsufficientStock { .. }) | Err(LedgerError::Conflict(_))
    ));

    let final_stock = stock_of(&state, &pid).await;
    assert!((final_stock - 2.0).abs() < 1e-9, "stock was {final_stock}");
    assert!(final_stock > -STOCK_EPSILON);

    let sales = SaleRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
}

#[tokio::test]
async fn summaries_stay_consistent_with_raw_records() {
    let state = test_state().await;
    let product = seed_product(&state, "Chorizo", 100000, 50.0).await;

    // Two sales...
    state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &[kg_line(&product, 2.0)])
        .await
        .unwrap();
    state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Mp, &[kg_line(&product, 1.5)])
        .await
        .unwrap();

    // ...and three manual movements, mixed directions
    let ledger = &state.ledger;
    ledger
        .record_cash_movement(
            SHOP,
            USER,
            movement(CashDirection::In, PaymentMethod::Cash, "Recupero", 5000),
        )
        .await
        .unwrap();
    ledger
        .record_cash_movement(
            SHOP,
            USER,
            movement(CashDirection::Out, PaymentMethod::Transfer, "Proveedor", 3000),
        )
        .await
        .unwrap();
    ledger
        .record_cash_movement(
            SHOP,
            USER,
            movement(CashDirection::In, PaymentMethod::Mp, "Ajuste", 700),
        )
        .await
        .unwrap();

    let sales = SaleRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    let movements = CashMovementRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert_eq!(sales.len(), 2);
    // 2 sale-kind movements + 3 manual
    assert_eq!(movements.len(), 5);

    let sales_total: i64 = sales.iter().map(|s| s.total_cents).sum();
    let signed_total: i64 = movements
        .iter()
        .map(|m| m.amount_cents * m.direction.signum())
        .sum();

    let (day, month) = period_keys(shared::util::now_millis(), state.config.default_timezone);
    let summaries = SummaryRepository::new(state.db());
    let daily = summaries.daily(SHOP, &day).await.unwrap().expect("daily");
    let monthly = summaries
        .monthly(SHOP, &month)
        .await
        .unwrap()
        .expect("monthly");

    for summary in [&daily, &monthly] {
        assert_eq!(summary.sales_count, 2);
        assert_eq!(summary.sales_total_cents, sales_total);
        assert_eq!(summary.cash_net_cents, signed_total);
        assert_eq!(summary.cash_in_cents, sales_total + 5000 + 700);
        assert_eq!(summary.cash_out_cents, 3000);

        assert_eq!(summary.sales_by_method.get("cash"), 200000);
        assert_eq!(summary.sales_by_method.get("mp"), 150000);
        assert_eq!(summary.cash_in_by_method.get("cash"), 200000 + 5000);
        assert_eq!(summary.cash_in_by_method.get("mp"), 150000 + 700);
        assert_eq!(summary.cash_out_by_method.get("transfer"), 3000);

        // Category breakdown is signed and lowercase-normalized
        assert_eq!(summary.cash_by_category.get("recupero"), 5000);
        assert_eq!(summary.cash_by_category.get("proveedor"), -3000);
        assert_eq!(summary.cash_by_category.get("ajuste"), 700);
    }

    // The daily range listing surfaces the same document
    let range = summaries.daily_range(SHOP, &day, &day).await.unwrap();
    assert_eq!(range.len(), 1);
    assert_eq!(range[0].period, day);
}

#[tokio::test]
async fn amount_mode_derives_rounded_quantity() {
    let state = test_state().await;
    let product = seed_product(&state, "Lomo", 650000, 10.0).await;

    let receipt = state
        .ledger
        .record_sale(
            SHOP,
            USER,
            PaymentMethod::Cash,
            &[amount_line(&product, 500000)],
        )
        .await
        .unwrap();

    assert_eq!(receipt.items.len(), 1);
    assert_eq!(receipt.items[0].qty_kg, 0.769);
    assert_eq!(receipt.total_cents, 500000);
    assert_eq!(receipt.total_qty_kg, 0.769);

    let final_stock = stock_of(&state, product.id.as_deref().unwrap()).await;
    assert!((final_stock - 9.231).abs() < 1e-9);
}

#[tokio::test]
async fn overdraw_fails_and_leaves_stock_untouched() {
    let state = test_state().await;
    let product = seed_product(&state, "Entraña", 800000, 1.0).await;

    let result = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &[kg_line(&product, 1.5)])
        .await;
    assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));
    assert_eq!(stock_of(&state, product.id.as_deref().unwrap()).await, 1.0);

    // Draining the stock exactly is allowed
    let receipt = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &[kg_line(&product, 1.0)])
        .await
        .unwrap();
    assert_eq!(receipt.total_cents, 800000);
    assert_eq!(stock_of(&state, product.id.as_deref().unwrap()).await, 0.0);
}

#[tokio::test]
async fn repeated_product_lines_share_one_stock() {
    let state = test_state().await;
    let product = seed_product(&state, "Picada", 200000, 1.0).await;

    // Each line fits on its own but not together
    let lines = vec![kg_line(&product, 0.6), kg_line(&product, 0.6)];
    let result = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &lines)
        .await;
    assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));
    assert_eq!(stock_of(&state, product.id.as_deref().unwrap()).await, 1.0);
}

#[tokio::test]
async fn unknown_product_aborts_the_sale() {
    let state = test_state().await;
    let line = SaleLine::Kg {
        product_id: "does-not-exist".to_string(),
        qty_kg: 1.0,
    };
    let result = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &[line])
        .await;
    assert!(matches!(result, Err(LedgerError::ProductNotFound(_))));
}

#[tokio::test]
async fn empty_sale_is_rejected() {
    let state = test_state().await;
    let result = state
        .ledger
        .record_sale(SHOP, USER, PaymentMethod::Cash, &[])
        .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn movement_validation_rejects_bad_input() {
    let state = test_state().await;

    let result = state
        .ledger
        .record_cash_movement(
            SHOP,
            USER,
            movement(CashDirection::Out, PaymentMethod::Cash, "   ", 1000),
        )
        .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));

    let result = state
        .ledger
        .record_cash_movement(
            SHOP,
            USER,
            movement(CashDirection::In, PaymentMethod::Cash, "Ajuste", 0),
        )
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));

    // Nothing was written
    let movements = CashMovementRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn backdated_movement_lands_in_its_own_period() {
    let state = test_state().await;
    let tz = state.config.default_timezone;

    // A week ago, which may also be a different month
    let occurred_at = shared::util::now_millis() - 7 * 24 * 60 * 60 * 1000;
    let (past_day, _) = period_keys(occurred_at, tz);
    let (today, _) = period_keys(shared::util::now_millis(), tz);
    assert_ne!(past_day, today);

    let mut input = movement(CashDirection::Out, PaymentMethod::Cash, "Sueldos", 25000);
    input.occurred_at = Some(occurred_at);
    state
        .ledger
        .record_cash_movement(SHOP, USER, input)
        .await
        .unwrap();

    let summaries = SummaryRepository::new(state.db());
    let past = summaries
        .daily(SHOP, &past_day)
        .await
        .unwrap()
        .expect("backdated day");
    assert_eq!(past.cash_net_cents, -25000);
    assert_eq!(past.cash_out_cents, 25000);

    // Today's summary was not touched
    assert!(summaries.daily(SHOP, &today).await.unwrap().is_none());
}

#[tokio::test]
async fn shop_timezone_setting_drives_period_keys() {
    let state = test_state().await;

    ShopSettingsRepository::new(state.db())
        .upsert(SHOP, "Asia/Tokyo")
        .await
        .unwrap();

    let occurred_at = shared::util::now_millis();
    let (tokyo_day, _) = period_keys(occurred_at, chrono_tz::Asia::Tokyo);

    let mut input = movement(CashDirection::In, PaymentMethod::Cash, "Ajuste", 100);
    input.occurred_at = Some(occurred_at);
    state
        .ledger
        .record_cash_movement(SHOP, USER, input)
        .await
        .unwrap();

    let summary = SummaryRepository::new(state.db())
        .daily(SHOP, &tokyo_day)
        .await
        .unwrap()
        .expect("summary keyed in shop zone");
    assert_eq!(summary.cash_net_cents, 100);
}
