//! # Order Pricing
//!
//! Validates a submitted order form and prices it from the catalog.
//!
//! ```text
//! NewOrder (from the browser)
//!     │
//!     ├── name, slip, item count        validation::*
//!     ├── each line: size, quantity     validation::*
//!     ├── each line: active design?     price map lookup
//!     ▼
//! PricedOrder { items (unit prices frozen), subtotal, shipping }
//! ```
//!
//! The browser never supplies a price. Whatever it displayed, the amount
//! recorded is the catalog price at the moment the order is accepted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::OrderLineItem;
use crate::validation::{
    validate_name, validate_order_size, validate_quantity, validate_required, validate_size,
};

/// An order form as submitted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_pickup: bool,
    pub slip_image: String,
    pub items: Vec<NewOrderItem>,
}

/// One line of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub design: String,
    pub size: String,
    pub quantity: i64,
}

/// A validated order with catalog prices applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub items: Vec<OrderLineItem>,
    /// Σ unit price × quantity.
    pub subtotal: Money,
    /// Zero for pickup orders.
    pub shipping: Money,
}

impl PricedOrder {
    /// What the customer should have transferred.
    pub fn grand_total(&self) -> Money {
        self.subtotal + self.shipping
    }
}

/// Validates `order` and prices every line from `prices`.
///
/// `prices` maps each orderable (active) design id to its unit price in
/// satang. A line for any other design fails with
/// [`CoreError::DesignNotFound`]. Combo designs are priced as themselves;
/// they are only expanded for reporting.
pub fn price_order(
    order: &NewOrder,
    prices: &HashMap<String, i64>,
    shipping: Money,
) -> CoreResult<PricedOrder> {
    validate_name("name", &order.name)?;
    validate_required("slipImage", &order.slip_image)?;
    validate_order_size(order.items.len())?;

    let mut items = Vec::with_capacity(order.items.len());
    for line in &order.items {
        let size = validate_size(&line.size)?;
        validate_quantity(line.quantity)?;

        let unit = prices
            .get(&line.design)
            .copied()
            .ok_or_else(|| CoreError::DesignNotFound(line.design.clone()))?;

        items.push(OrderLineItem {
            price_per_unit_satang: unit,
            ..OrderLineItem::new(line.design.clone(), size.as_str(), line.quantity)
        });
    }

    let subtotal = items.iter().map(OrderLineItem::line_total).sum();
    let shipping = if order.is_pickup { Money::zero() } else { shipping };

    Ok(PricedOrder {
        items,
        subtotal,
        shipping,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn prices() -> HashMap<String, i64> {
        HashMap::from([
            ("1".to_string(), 75_000),
            ("2".to_string(), 70_000),
            ("3".to_string(), 135_000),
        ])
    }

    fn form(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            name: "สมชาย".to_string(),
            phone: Some("0812345678".to_string()),
            address: Some("Bangkok".to_string()),
            is_pickup: false,
            slip_image: "https://blob.example/slip.jpg".to_string(),
            items,
        }
    }

    fn line(design: &str, size: &str, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            design: design.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_prices_from_catalog() {
        let order = form(vec![line("1", "M", 2), line("3", "L", 1)]);
        let priced = price_order(&order, &prices(), Money::from_baht(50)).unwrap();

        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.items[0].price_per_unit_satang, 75_000);
        assert_eq!(priced.items[1].design, "3");
        assert_eq!(priced.subtotal, Money::from_baht(2850));
        assert_eq!(priced.shipping, Money::from_baht(50));
        assert_eq!(priced.grand_total(), Money::from_baht(2900));
    }

    #[test]
    fn test_pickup_skips_shipping() {
        let mut order = form(vec![line("2", "S", 1)]);
        order.is_pickup = true;
        let priced = price_order(&order, &prices(), Money::from_baht(50)).unwrap();

        assert!(priced.shipping.is_zero());
        assert_eq!(priced.grand_total(), Money::from_baht(700));
    }

    #[test]
    fn test_unknown_design_rejected() {
        let order = form(vec![line("9", "M", 1)]);
        let err = price_order(&order, &prices(), Money::zero()).unwrap_err();
        assert!(matches!(err, CoreError::DesignNotFound(id) if id == "9"));
    }

    #[test]
    fn test_bad_lines_rejected() {
        let bad_size = form(vec![line("1", "XXL", 1)]);
        assert!(matches!(
            price_order(&bad_size, &prices(), Money::zero()),
            Err(CoreError::Validation(ValidationError::NotAllowed { .. }))
        ));

        let bad_qty = form(vec![line("1", "M", 0)]);
        assert!(matches!(
            price_order(&bad_qty, &prices(), Money::zero()),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_form_fields_required() {
        let mut no_name = form(vec![line("1", "M", 1)]);
        no_name.name = "  ".to_string();
        assert!(price_order(&no_name, &prices(), Money::zero()).is_err());

        let mut no_slip = form(vec![line("1", "M", 1)]);
        no_slip.slip_image.clear();
        assert!(price_order(&no_slip, &prices(), Money::zero()).is_err());

        let empty = form(vec![]);
        assert!(matches!(
            price_order(&empty, &prices(), Money::zero()),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_deserializes_browser_payload() {
        let json = r#"{
            "name": "Nok",
            "isPickup": true,
            "slipImage": "https://blob.example/s.png",
            "items": [{"design": "1", "size": "4S", "quantity": 3}]
        }"#;
        let order: NewOrder = serde_json::from_str(json).unwrap();

        assert!(order.is_pickup);
        assert!(order.phone.is_none());
        assert_eq!(order.items[0].size, "4S");
    }
}
