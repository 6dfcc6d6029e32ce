//! Order export for the admin dashboard's download button.
//!
//! Three tables in one payload: every order (newest first, as given), every
//! line of those orders, and the size summary with its closing totals row.
//! Labels are the Thai ones the organisers read in the spreadsheet.

use serde::Serialize;
use std::collections::HashMap;
use ts_rs::TS;

use crate::combo::ComboRegistry;
use crate::summary::{SizeSummaryReport, SizeSummaryRow};
use crate::types::{DesignRef, OrderLineItem, OrderStatus, OrderWithItems};
use crate::UNNAMED_DESIGN_LABEL;

/// Address cell of a pickup order.
pub const PICKUP_LABEL: &str = "รับหน้างาน";

/// Placeholder for an empty phone or address cell.
pub const EMPTY_CELL: &str = "-";

/// One row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderExportRow {
    pub order_id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub subtotal_satang: i64,
    pub shipping_satang: i64,
    /// Items plus shipping.
    pub total_satang: i64,
    pub status: OrderStatus,
    pub status_label: String,
    /// RFC 3339.
    pub created_at: String,
}

/// One row of the items table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemExportRow {
    pub order_id: i64,
    pub design_id: String,
    pub design_name: String,
    pub size: String,
    pub quantity: i64,
    pub price_per_unit_satang: i64,
    pub line_total_satang: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrdersExport {
    pub orders: Vec<OrderExportRow>,
    pub items: Vec<ItemExportRow>,
    /// Summary rows followed by the totals row.
    #[ts(type = "Array<Record<string, string | number>>")]
    pub size_summary: Vec<SizeSummaryRow>,
}

impl OrdersExport {
    /// Builds all three tables. The size summary covers every status.
    pub fn build(
        orders: &[OrderWithItems],
        designs: &[DesignRef],
        registry: &ComboRegistry,
    ) -> Self {
        let names: HashMap<&str, &str> = designs
            .iter()
            .map(|d| (d.id.as_str(), d.name.as_str()))
            .collect();

        let rows = orders.iter().map(order_row).collect();

        let items = orders
            .iter()
            .flat_map(|o| o.items.iter().map(move |item| (o.order.id, item)))
            .map(|(order_id, item)| item_row(order_id, item, &names))
            .collect();

        let all_items: Vec<OrderLineItem> =
            orders.iter().flat_map(|o| o.items.iter().cloned()).collect();
        let size_summary = SizeSummaryReport::build(&all_items, designs, registry).export_table();

        OrdersExport {
            orders: rows,
            items,
            size_summary,
        }
    }
}

fn non_empty_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

fn order_row(order: &OrderWithItems) -> OrderExportRow {
    let o = &order.order;
    let address = if o.is_pickup {
        PICKUP_LABEL.to_string()
    } else {
        non_empty_or_dash(o.address.as_deref())
    };

    OrderExportRow {
        order_id: o.id,
        name: o.name.clone(),
        phone: non_empty_or_dash(o.phone.as_deref()),
        address,
        subtotal_satang: o.total_price_satang,
        shipping_satang: o.shipping_satang,
        total_satang: o.total_price_satang.saturating_add(o.shipping_satang),
        status: o.status,
        status_label: o.status.label_th().to_string(),
        created_at: o.created_at.to_rfc3339(),
    }
}

fn item_row(order_id: i64, item: &OrderLineItem, names: &HashMap<&str, &str>) -> ItemExportRow {
    ItemExportRow {
        order_id,
        design_id: item.design.clone(),
        design_name: names
            .get(item.design.as_str())
            .copied()
            .unwrap_or(UNNAMED_DESIGN_LABEL)
            .to_string(),
        size: item.size.clone(),
        quantity: item.quantity,
        price_per_unit_satang: item.price_per_unit_satang,
        line_total_satang: item.price_per_unit_satang.saturating_mul(item.quantity),
    }
}
