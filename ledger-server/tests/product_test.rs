//! Product store integration tests

mod common;

use common::{SHOP, USER, seed_product, seed_product_in, test_state};
use ledger_server::db::repository::product::ProductFilter;
use ledger_server::db::repository::{ProductRepository, RepoError, SaleRepository};
use shared::models::{ProductCreate, ProductUpdate, SaleLine};
use shared::types::{PaymentMethod, ProductUnit};

#[tokio::test]
async fn create_and_read_back() {
    let state = test_state().await;
    let repo = ProductRepository::new(state.db());

    let product = repo
        .create(
            SHOP,
            ProductCreate {
                name: "  Milanesa  ".to_string(),
                unit: ProductUnit::Kg,
                sale_price_cents: 750000,
                stock_qty: Some(12.5),
                low_stock_alert_qty: None,
            },
        )
        .await
        .unwrap();

    // Name is trimmed, omitted quantities default to zero
    assert_eq!(product.name, "Milanesa");
    assert_eq!(product.low_stock_alert_qty, 0.0);

    let read = repo
        .find_by_id(SHOP, product.id.as_deref().unwrap())
        .await
        .unwrap()
        .expect("created product");
    assert_eq!(read.name, "Milanesa");
    assert_eq!(read.sale_price_cents, 750000);
    assert_eq!(read.stock_qty, 12.5);
}

#[tokio::test]
async fn list_filters_by_name_unit_and_low_stock() {
    let state = test_state().await;
    let repo = ProductRepository::new(state.db());

    seed_product(&state, "Asado", 900000, 10.0).await;
    seed_product(&state, "Asado de tira", 950000, 1.0).await;
    repo.create(
        SHOP,
        ProductCreate {
            name: "Huevos".to_string(),
            unit: ProductUnit::Unit,
            sale_price_cents: 12000,
            stock_qty: Some(2.0),
            low_stock_alert_qty: Some(6.0),
        },
    )
    .await
    .unwrap();

    let all = repo.list(SHOP, &ProductFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let by_name = repo
        .list(
            SHOP,
            &ProductFilter {
                name: Some("asado".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);

    let by_unit = repo
        .list(
            SHOP,
            &ProductFilter {
                unit: Some(ProductUnit::Unit),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_unit.len(), 1);
    assert_eq!(by_unit[0].name, "Huevos");

    // Low stock is stock_qty <= low_stock_alert_qty, evaluated at read time
    let low = repo
        .list(
            SHOP,
            &ProductFilter {
                low_stock: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Huevos");
    assert!(low[0].is_low_stock());
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() {
    let state = test_state().await;
    let repo = ProductRepository::new(state.db());
    let product = seed_product(&state, "Cuadril", 850000, 8.0).await;
    let id = product.id.as_deref().unwrap();

    let updated = repo
        .update(
            SHOP,
            id,
            ProductUpdate {
                sale_price_cents: Some(880000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.sale_price_cents, 880000);
    assert_eq!(updated.name, "Cuadril");
    assert_eq!(updated.stock_qty, 8.0);

    // Empty patch is a read
    let unchanged = repo.update(SHOP, id, ProductUpdate::default()).await.unwrap();
    assert_eq!(unchanged.sale_price_cents, 880000);
}

#[tokio::test]
async fn delete_is_hard_and_keeps_sale_snapshots() {
    let state = test_state().await;
    let repo = ProductRepository::new(state.db());
    let product = seed_product(&state, "Peceto", 990000, 5.0).await;
    let id = product.id.clone().unwrap();

    // Sell some first, then delete the product
    state
        .ledger
        .record_sale(
            SHOP,
            USER,
            PaymentMethod::Cash,
            &[SaleLine::Kg {
                product_id: id.clone(),
                qty_kg: 1.0,
            }],
        )
        .await
        .unwrap();

    repo.delete(SHOP, &id).await.unwrap();
    assert!(repo.find_by_id(SHOP, &id).await.unwrap().is_none());

    let again = repo.delete(SHOP, &id).await;
    assert!(matches!(again, Err(RepoError::NotFound(_))));

    // The historical sale still carries its denormalized snapshot
    let sales = SaleRepository::new(state.db())
        .list_recent(SHOP, 10)
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].items[0].product_name, "Peceto");
    assert_eq!(sales[0].items[0].price_per_kg_cents, 990000);
}

#[tokio::test]
async fn products_are_scoped_to_their_shop() {
    let state = test_state().await;
    let repo = ProductRepository::new(state.db());

    let mine = seed_product(&state, "Falda", 450000, 3.0).await;
    seed_product_in(&state, "other-shop", "Falda ajena", 450000, 3.0).await;

    let listed = repo.list(SHOP, &ProductFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);

    // Cross-shop lookups and deletes miss
    let id = mine.id.as_deref().unwrap();
    assert!(repo.find_by_id("other-shop", id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete("other-shop", id).await,
        Err(RepoError::NotFound(_))
    ));
}
