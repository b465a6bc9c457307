//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::types::ProductUnit;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_key};

const PRODUCT_TABLE: &str = "product";

/// List filters; all optional, combined with AND
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    /// Case-insensitive name substring
    pub name: Option<String>,
    pub unit: Option<ProductUnit>,
    /// true -> only low-stock products, false -> only healthy stock
    pub low_stock: Option<bool>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a product by key, scoped to the owning shop
    pub async fn find_by_id(&self, shop_id: &str, id: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM type::thing($tb, $key) WHERE shop_id = $shop",
            )
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// List a shop's products, newest first, with optional filters.
    ///
    /// The low-stock predicate is evaluated at read time against the current
    /// stock; it is never stored.
    pub async fn list(&self, shop_id: &str, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let mut query =
            String::from("SELECT *, record::id(id) AS id FROM product WHERE shop_id = $shop");
        if filter.name.is_some() {
            query.push_str(" AND string::lowercase(name) CONTAINS string::lowercase($name)");
        }
        if filter.unit.is_some() {
            query.push_str(" AND unit = $unit");
        }
        match filter.low_stock {
            Some(true) => query.push_str(" AND stock_qty <= low_stock_alert_qty"),
            Some(false) => query.push_str(" AND stock_qty > low_stock_alert_qty"),
            None => {}
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("shop", shop_id.to_string()));
        if let Some(name) = filter.name.clone() {
            q = q.bind(("name", name));
        }
        if let Some(unit) = filter.unit {
            q = q.bind(("unit", unit));
        }

        let products: Vec<Product> = q.await?.take(0)?;
        Ok(products)
    }

    /// Create a new product (input already validated by the handler)
    pub async fn create(&self, shop_id: &str, data: ProductCreate) -> RepoResult<Product> {
        let now = shared::util::now_millis();
        let key = new_key();

        let product = Product {
            id: None,
            shop_id: shop_id.to_string(),
            name: data.name.trim().to_string(),
            unit: data.unit,
            sale_price_cents: data.sale_price_cents,
            stock_qty: data.stock_qty.unwrap_or(0.0),
            low_stock_alert_qty: data.low_stock_alert_qty.unwrap_or(0.0),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", product.clone()))
            .await?
            .check()?;

        Ok(Product {
            id: Some(key),
            ..product
        })
    }

    /// Partial update; untouched fields keep their stored value
    pub async fn update(
        &self,
        shop_id: &str,
        id: &str,
        data: ProductUpdate,
    ) -> RepoResult<Product> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.unit.is_some() {
            set_parts.push("unit = $unit");
        }
        if data.sale_price_cents.is_some() {
            set_parts.push("sale_price_cents = $sale_price_cents");
        }
        if data.stock_qty.is_some() {
            set_parts.push("stock_qty = $stock_qty");
        }
        if data.low_stock_alert_qty.is_some() {
            set_parts.push("low_stock_alert_qty = $low_stock_alert_qty");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(shop_id, id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")));
        }
        set_parts.push("updated_at = $now");

        let query_str = format!(
            "UPDATE type::thing($tb, $key) SET {} WHERE shop_id = $shop RETURN NONE",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .bind(("now", shared::util::now_millis()));

        if let Some(v) = data.name {
            query = query.bind(("name", v.trim().to_string()));
        }
        if let Some(v) = data.unit {
            query = query.bind(("unit", v));
        }
        if let Some(v) = data.sale_price_cents {
            query = query.bind(("sale_price_cents", v));
        }
        if let Some(v) = data.stock_qty {
            query = query.bind(("stock_qty", v));
        }
        if let Some(v) = data.low_stock_alert_qty {
            query = query.bind(("low_stock_alert_qty", v));
        }

        query.await?.check()?;

        self.find_by_id(shop_id, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Hard delete. No referential check against historical sales; sales
    /// keep their own denormalized name/price snapshot.
    pub async fn delete(&self, shop_id: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(shop_id, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {id} not found")));
        }

        self.base
            .db()
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", id.to_string()))
            .await?
            .check()?;

        Ok(())
    }
}
