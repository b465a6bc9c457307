//! Sale line resolution
//!
//! Pure per-line math: given the product snapshot and the stock remaining
//! after earlier lines of the same sale, turn a requested line into a
//! resolved item and the product's next stock level. No I/O; the engine
//! feeds it the transaction's read set.

use shared::models::{Product, SaleItem, SaleLine};
use shared::money::{STOCK_EPSILON, round_cents, round_qty3};
use shared::types::ProductUnit;

use super::LedgerError;

/// Outcome of resolving one line
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    pub item: SaleItem,
    /// Stock the product will hold once this line commits
    pub new_stock: f64,
}

/// Resolve one requested line against `running_stock` (the product's stock
/// after the preceding lines of this sale).
pub fn resolve_line(
    product: &Product,
    running_stock: f64,
    line: &SaleLine,
) -> Result<ResolvedLine, LedgerError> {
    if product.unit != ProductUnit::Kg {
        return Err(LedgerError::UnsupportedUnit(product.name.clone()));
    }

    let price = product.sale_price_cents;

    let (qty_kg, total_cents) = match line {
        SaleLine::Kg { qty_kg, .. } => {
            if !qty_kg.is_finite() || *qty_kg <= 0.0 {
                return Err(LedgerError::InvalidQuantity(format!(
                    "qty_kg must be a positive number, got {qty_kg}"
                )));
            }
            (*qty_kg, round_cents(qty_kg * price as f64))
        }
        SaleLine::Amount { amount_cents, .. } => {
            if *amount_cents <= 0 {
                return Err(LedgerError::InvalidAmount(format!(
                    "amount_cents must be positive, got {amount_cents}"
                )));
            }
            let qty = round_qty3(*amount_cents as f64 / price as f64);
            if !qty.is_finite() || qty <= 0.0 {
                return Err(LedgerError::Calculation(format!(
                    "derived quantity is not positive ({qty}) for price {price}"
                )));
            }
            (qty, *amount_cents)
        }
    };

    let new_stock = round_qty3(running_stock - qty_kg);
    if new_stock < -STOCK_EPSILON {
        return Err(LedgerError::InsufficientStock {
            product: product.name.clone(),
            requested: qty_kg,
            available: running_stock,
        });
    }

    Ok(ResolvedLine {
        item: SaleItem {
            product_id: product.id.clone().unwrap_or_default(),
            product_name: product.name.clone(),
            qty_kg,
            price_per_kg_cents: price,
            total_cents,
        },
        new_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kg_product(price_cents: i64, stock: f64) -> Product {
        Product {
            id: Some("p1".to_string()),
            shop_id: "shop1".to_string(),
            name: "Vacío".to_string(),
            unit: ProductUnit::Kg,
            sale_price_cents: price_cents,
            stock_qty: stock,
            low_stock_alert_qty: 0.0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn kg_mode_derives_total_from_price() {
        let product = kg_product(650000, 10.0);
        let line = SaleLine::Kg {
            product_id: "p1".to_string(),
            qty_kg: 0.5,
        };
        let resolved = resolve_line(&product, product.stock_qty, &line).unwrap();
        assert_eq!(resolved.item.total_cents, 325000);
        assert_eq!(resolved.new_stock, 9.5);
    }

    #[test]
    fn amount_mode_derives_quantity_rounded_to_3_decimals() {
        // 500000 / 650000 = 0.7692... -> 0.769
        let product = kg_product(650000, 10.0);
        let line = SaleLine::Amount {
            product_id: "p1".to_string(),
            amount_cents: 500000,
        };
        let resolved = resolve_line(&product, product.stock_qty, &line).unwrap();
        assert_eq!(resolved.item.qty_kg, 0.769);
        assert_eq!(resolved.item.total_cents, 500000);

        // Re-deriving the total from the rounded quantity differs from the
        // charged amount by at most half a gram's worth of price.
        let rederived = round_cents(resolved.item.qty_kg * 650000.0);
        assert!((rederived - 500000).abs() <= 650000 / 1000 / 2 + 1);
    }

    #[test]
    fn zero_price_amount_mode_is_a_calculation_error() {
        let product = kg_product(0, 10.0);
        let line = SaleLine::Amount {
            product_id: "p1".to_string(),
            amount_cents: 1000,
        };
        assert!(matches!(
            resolve_line(&product, 10.0, &line),
            Err(LedgerError::Calculation(_))
        ));
    }

    #[test]
    fn rejects_non_weight_products() {
        let mut product = kg_product(1000, 5.0);
        product.unit = ProductUnit::Unit;
        let line = SaleLine::Kg {
            product_id: "p1".to_string(),
            qty_kg: 1.0,
        };
        assert!(matches!(
            resolve_line(&product, 5.0, &line),
            Err(LedgerError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn rejects_bad_quantities_and_amounts() {
        let product = kg_product(1000, 5.0);
        for qty in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let line = SaleLine::Kg {
                product_id: "p1".to_string(),
                qty_kg: qty,
            };
            assert!(matches!(
                resolve_line(&product, 5.0, &line),
                Err(LedgerError::InvalidQuantity(_))
            ));
        }
        let line = SaleLine::Amount {
            product_id: "p1".to_string(),
            amount_cents: 0,
        };
        assert!(matches!(
            resolve_line(&product, 5.0, &line),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn stock_floor_uses_epsilon_tolerance() {
        let product = kg_product(1000, 1.0);

        // Exactly draining the stock is fine
        let line = SaleLine::Kg {
            product_id: "p1".to_string(),
            qty_kg: 1.0,
        };
        assert!(resolve_line(&product, 1.0, &line).is_ok());

        // More than epsilon below zero is not
        let line = SaleLine::Kg {
            product_id: "p1".to_string(),
            qty_kg: 1.001,
        };
        assert!(matches!(
            resolve_line(&product, 1.0, &line),
            Err(LedgerError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn running_stock_threads_through_repeated_products() {
        let product = kg_product(1000, 1.0);
        let line = SaleLine::Kg {
            product_id: "p1".to_string(),
            qty_kg: 0.6,
        };
        let first = resolve_line(&product, 1.0, &line).unwrap();
        assert_eq!(first.new_stock, 0.4);

        // Second line of the same sale sees the decremented stock
        let err = resolve_line(&product, first.new_stock, &line);
        assert!(matches!(err, Err(LedgerError::InsufficientStock { .. })));
    }
}
