//! # Domain Types
//!
//! Core domain types used throughout the pre-order backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │  ShirtDesign    │   │ ComboComponentEdge  │   │     Order       │   │
//! │  │  ─────────────  │   │ ─────────────────── │   │  ─────────────  │   │
//! │  │  id (admin set) │◄──│ combo_design_id     │   │  id (serial)    │   │
//! │  │  name           │◄──│ component_design_id │   │  status         │   │
//! │  │  price_satang   │   │ multiplier (>= 1)   │   │  slip_image     │   │
//! │  │  is_combo       │   └─────────────────────┘   └────────┬────────┘   │
//! │  └─────────────────┘                                      │ 1..n       │
//! │                                               ┌───────────▼─────────┐  │
//! │                                               │   OrderLineItem     │  │
//! │                                               │  design, size (text)│  │
//! │                                               │  quantity, price    │  │
//! │                                               └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Design ids are short admin-chosen strings ("1", "2", ...), not UUIDs: they
//! are printed on the order form and referenced by historical line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Shirt Design
// =============================================================================

/// A catalog entry customers can order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShirtDesign {
    /// Business identifier, chosen by the admin.
    pub id: String,

    /// Display name shown on the form and in reports.
    pub name: String,

    pub description: String,

    /// Unit price in satang.
    pub price_satang: i64,

    /// Front image URL (hosted by the blob store).
    pub front_image: Option<String>,

    /// Back image URL (hosted by the blob store).
    pub back_image: Option<String>,

    /// Whether the design is offered (soft delete).
    pub is_active: bool,

    /// Sort position on the order form.
    pub display_order: i64,

    /// Cached flag: true iff this design owns at least one combo edge.
    pub is_combo: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl ShirtDesign {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_satang(self.price_satang)
    }
}

/// The minimal catalog view the size aggregator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRef {
    pub id: String,
    pub name: String,
}

impl DesignRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        DesignRef {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&ShirtDesign> for DesignRef {
    fn from(design: &ShirtDesign) -> Self {
        DesignRef::new(design.id.clone(), design.name.clone())
    }
}

/// Payload for creating a design (admin).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewShirtDesign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_satang: i64,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

/// Partial update for a design (admin). `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShirtDesignUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_satang: Option<i64>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
}

// =============================================================================
// Combo Component Edge
// =============================================================================

/// One stored combo relationship: `combo_design_id` contains
/// `multiplier` units of `component_design_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboComponentEdge {
    pub combo_design_id: String,
    pub component_design_id: String,
    pub multiplier: i64,
}

impl ComboComponentEdge {
    pub fn new(
        combo_design_id: impl Into<String>,
        component_design_id: impl Into<String>,
        multiplier: i64,
    ) -> Self {
        ComboComponentEdge {
            combo_design_id: combo_design_id.into(),
            component_design_id: component_design_id.into(),
            multiplier,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in the fulfilment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Slip uploaded, waiting for an admin to check the payment.
    #[default]
    Pending,
    /// Payment confirmed.
    Confirmed,
    /// Being packed or shipped.
    Processing,
    /// Delivered or picked up.
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Thai label used in chat notifications.
    pub const fn label_th(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "รอตรวจสอบ",
            OrderStatus::Confirmed => "ยืนยันการชำระเงิน",
            OrderStatus::Processing => "กำลังจัดส่ง",
            OrderStatus::Completed => "จัดส่งแล้ว",
            OrderStatus::Cancelled => "ยกเลิก",
        }
    }

    pub const fn emoji(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "⏳",
            OrderStatus::Confirmed => "✅",
            OrderStatus::Processing => "📦",
            OrderStatus::Completed => "🎉",
            OrderStatus::Cancelled => "❌",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer's pre-order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    /// Delivery address; absent for pickup orders.
    pub address: Option<String>,
    /// Picked up at the event instead of shipped.
    pub is_pickup: bool,
    /// Sum of line totals in satang (shipping excluded).
    pub total_price_satang: i64,
    /// Shipping charge in satang (zero for pickup).
    pub shipping_satang: i64,
    /// Payment slip URL (hosted by the blob store).
    pub slip_image: String,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Amount the customer transferred: items plus shipping.
    pub fn grand_total(&self) -> Money {
        Money::from_satang(self.total_price_satang + self.shipping_satang)
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// A line in an order.
///
/// `size` is kept as stored text; legacy rows may hold labels that are no
/// longer recognized, and reports must still render over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub order_id: Option<i64>,
    pub design: String,
    pub size: String,
    pub quantity: i64,
    /// Unit price in satang at time of order (frozen).
    pub price_per_unit_satang: i64,
}

impl OrderLineItem {
    /// A line with no order and no price, as used in reports and tests.
    pub fn new(design: impl Into<String>, size: impl Into<String>, quantity: i64) -> Self {
        OrderLineItem {
            order_id: None,
            design: design.into(),
            size: size.into(),
            quantity,
            price_per_unit_satang: 0,
        }
    }

    /// Returns the line total as Money.
    pub fn line_total(&self) -> Money {
        Money::from_satang(self.price_per_unit_satang).multiply_quantity(self.quantity)
    }
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLineItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("confirmed".parse::<OrderStatus>().unwrap(), OrderStatus::Confirmed);
        assert_eq!(" cancelled ".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Pending.label_th(), "รอตรวจสอบ");
        assert_eq!(OrderStatus::Completed.emoji(), "🎉");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"processing\""
        );
    }

    #[test]
    fn test_line_total() {
        let item = OrderLineItem {
            price_per_unit_satang: 75_000,
            ..OrderLineItem::new("1", "M", 2)
        };
        assert_eq!(item.line_total(), Money::from_baht(1500));
    }

    #[test]
    fn test_line_item_wire_names() {
        let json = serde_json::to_value(OrderLineItem::new("1", "M", 2)).unwrap();
        assert_eq!(json["design"], "1");
        assert_eq!(json["pricePerUnitSatang"], 0);
        assert!(json["orderId"].is_null());
    }
}
