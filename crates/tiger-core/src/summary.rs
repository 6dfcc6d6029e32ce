//! # Size Summary
//!
//! Turns raw order lines into the design × size quantity matrix the shop
//! uses to place its production run, plus the dashboard statistics derived
//! from it.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items                 catalog               registry                  │
//! │  3 × L × 2             1 "A"                 3 → (1,1) (2,1)           │
//! │  1 × L × 1             2 "B"                                           │
//! │       │                3 "Combo"                  │                    │
//! │       │                   │                       │                    │
//! │       ▼                   ▼                       ▼                    │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │ accumulator: one zeroed row per catalog design                │     │
//! │  │   combo line     → add qty × multiplier to each component row │     │
//! │  │   plain line     → add qty to its own row                     │     │
//! │  │   unknown design or size → dropped                            │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ▼  drop rows whose id is a combo key                             │
//! │  A: L=3     B: L=2                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error. Stale and legacy rows degrade the report,
//! they never break it.

use serde::Serialize;
use std::collections::HashMap;
use ts_rs::TS;

use crate::combo::ComboRegistry;
use crate::size::{SizeCode, SizeCounts};
use crate::types::{DesignRef, OrderLineItem};

/// Design name of the closing row in the exported table.
pub const TOTAL_ROW_LABEL: &str = "รวมทั้งหมด";

// =============================================================================
// Rows
// =============================================================================

/// One design's quantities across every size.
///
/// Serializes as `{"designName": "...", "4S": 0, ..., "6XL": 0}` with the
/// sizes in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeSummaryRow {
    #[serde(skip_serializing)]
    pub design_id: String,
    #[serde(rename = "designName")]
    pub design_name: String,
    #[serde(flatten)]
    pub counts: SizeCounts,
}

impl SizeSummaryRow {
    fn empty(design: &DesignRef) -> Self {
        SizeSummaryRow {
            design_id: design.id.clone(),
            design_name: design.name.clone(),
            counts: SizeCounts::zero(),
        }
    }

    /// Sum of this row across every size.
    pub fn row_total(&self) -> i64 {
        self.counts.total()
    }
}

/// Builds the design × size matrix.
///
/// Rows come out in catalog order, one per catalog design, minus every
/// design that is a combo in `registry`. A catalog listing the same id twice
/// gets one row, at the first position.
pub fn aggregate(
    items: &[OrderLineItem],
    designs: &[DesignRef],
    registry: &ComboRegistry,
) -> Vec<SizeSummaryRow> {
    let mut rows: Vec<SizeSummaryRow> = Vec::with_capacity(designs.len());
    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(designs.len());

    for design in designs {
        if !by_id.contains_key(design.id.as_str()) {
            by_id.insert(design.id.as_str(), rows.len());
            rows.push(SizeSummaryRow::empty(design));
        }
    }

    let mut credit = |design_id: &str, size: SizeCode, quantity: i64| {
        if let Some(&row) = by_id.get(design_id) {
            rows[row].counts.add(size, quantity);
        }
    };

    for item in items {
        let Some(size) = SizeCode::parse(&item.size) else {
            continue;
        };

        let components = registry.components_of(&item.design);
        if components.is_empty() {
            credit(&item.design, size, item.quantity);
        } else {
            for component in components {
                credit(
                    &component.component_id,
                    size,
                    item.quantity.saturating_mul(component.multiplier),
                );
            }
        }
    }

    rows.retain(|row| !registry.has(&row.design_id));
    rows
}

// =============================================================================
// Totals
// =============================================================================

/// Column sums for every size.
pub fn calculate_size_totals(rows: &[SizeSummaryRow]) -> SizeCounts {
    rows.iter().fold(SizeCounts::zero(), |mut totals, row| {
        totals.merge(&row.counts);
        totals
    })
}

/// Every unit in the matrix.
pub fn calculate_grand_total(rows: &[SizeSummaryRow]) -> i64 {
    calculate_size_totals(rows).total()
}

pub fn row_total(row: &SizeSummaryRow) -> i64 {
    row.row_total()
}

// =============================================================================
// Statistics
// =============================================================================

/// Name of the row with the strictly largest total.
///
/// Ties go to the earlier row. Empty when there are no rows or every row is
/// zero.
pub fn most_popular_design(rows: &[SizeSummaryRow]) -> String {
    let mut best: Option<&SizeSummaryRow> = None;
    let mut best_total = 0;

    for row in rows {
        let total = row.row_total();
        if total > best_total {
            best_total = total;
            best = Some(row);
        }
    }

    best.map(|row| row.design_name.clone()).unwrap_or_default()
}

/// Size with the strictly largest column total, same rules as
/// [`most_popular_design`].
pub fn most_popular_size(rows: &[SizeSummaryRow]) -> Option<SizeCode> {
    let mut best = None;
    let mut best_total = 0;

    for (size, total) in calculate_size_totals(rows).iter() {
        if total > best_total {
            best_total = total;
            best = Some(size);
        }
    }

    best
}

// =============================================================================
// Report
// =============================================================================

/// Everything the size-summary page shows, in one payload.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizeSummaryReport {
    #[ts(type = "Array<Record<string, string | number>>")]
    pub rows: Vec<SizeSummaryRow>,
    #[ts(type = "Record<string, number>")]
    pub totals: SizeCounts,
    pub grand_total: i64,
    /// Empty when nothing was ordered.
    pub most_popular_design: String,
    /// Empty when nothing was ordered.
    pub most_popular_size: String,
    /// Column headers in canonical order.
    pub sizes: Vec<String>,
}

impl SizeSummaryReport {
    pub fn build(
        items: &[OrderLineItem],
        designs: &[DesignRef],
        registry: &ComboRegistry,
    ) -> Self {
        let rows = aggregate(items, designs, registry);
        let totals = calculate_size_totals(&rows);

        SizeSummaryReport {
            grand_total: totals.total(),
            most_popular_design: most_popular_design(&rows),
            most_popular_size: most_popular_size(&rows)
                .map(|size| size.as_str().to_string())
                .unwrap_or_default(),
            sizes: SizeCode::labels().into_iter().map(String::from).collect(),
            totals,
            rows,
        }
    }

    /// The spreadsheet table: every row, then a closing totals row labelled
    /// [`TOTAL_ROW_LABEL`].
    pub fn export_table(&self) -> Vec<SizeSummaryRow> {
        let mut table = self.rows.clone();
        table.push(SizeSummaryRow {
            design_id: String::new(),
            design_name: TOTAL_ROW_LABEL.to_string(),
            counts: self.totals,
        });
        table
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
