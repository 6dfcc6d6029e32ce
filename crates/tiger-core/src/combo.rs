//! # Combo Products
//!
//! A combo is a catalog design that, when ordered, stands for a fixed bundle
//! of other designs. Design "3" (the two-shirt pack) is really one design "1"
//! plus one design "2".
//!
//! ## How Combos Flow Through the System
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  shirt_combo_components rows                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ComboRegistry::build(edges)   (fresh snapshot, per request)           │
//! │       │                                                                 │
//! │       ├──► expand_combo_items()  3 × L × 2  ──►  1 × L × 2, 2 × L × 2  │
//! │       │                                                                 │
//! │       └──► summary::aggregate()  combo rows never reach the report     │
//! │                                                                         │
//! │  Admin edits go through validate_combo_request() first, then the       │
//! │  repository replaces the whole edge set for that combo.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Nesting
//! Expansion is one level deep. A component that is itself a combo is not
//! expanded again.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ComboComponentEdge, OrderLineItem, ShirtDesign};
use crate::validation::ValidationResult;
use crate::UNKNOWN_DESIGN_NAME;

// =============================================================================
// Registry
// =============================================================================

/// One component of a combo as seen by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboComponent {
    pub component_id: String,
    pub multiplier: i64,
}

/// Read-only snapshot: combo design id → ordered components.
///
/// Built from whatever edges the store returns. Building never validates and
/// never fails; a malformed edge (a self-reference, a zero multiplier) is
/// carried as-is so reports still render best-effort data.
#[derive(Debug, Clone, Default)]
pub struct ComboRegistry {
    /// Combos in first-seen order.
    combos: Vec<(String, Vec<ComboComponent>)>,
    /// combo id → position in `combos`.
    index: HashMap<String, usize>,
}

impl ComboRegistry {
    /// Groups edges by combo id, keeping the input order inside each group.
    pub fn build(edges: impl IntoIterator<Item = ComboComponentEdge>) -> Self {
        let mut registry = ComboRegistry::default();

        for edge in edges {
            let position = match registry.index.get(&edge.combo_design_id) {
                Some(&position) => position,
                None => {
                    registry.combos.push((edge.combo_design_id.clone(), Vec::new()));
                    let position = registry.combos.len() - 1;
                    registry.index.insert(edge.combo_design_id, position);
                    position
                }
            };

            registry.combos[position].1.push(ComboComponent {
                component_id: edge.component_design_id,
                multiplier: edge.multiplier,
            });
        }

        registry
    }

    /// True iff `design_id` is a combo key with at least one component.
    pub fn has(&self, design_id: &str) -> bool {
        !self.components_of(design_id).is_empty()
    }

    /// Components of `design_id` in registry order; empty if not a combo.
    pub fn components_of(&self, design_id: &str) -> &[ComboComponent] {
        self.index
            .get(design_id)
            .map(|&position| self.combos[position].1.as_slice())
            .unwrap_or(&[])
    }

    /// Combo ids in first-seen order.
    pub fn combo_ids(&self) -> impl Iterator<Item = &str> {
        self.combos.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Admin view of every combo with design names resolved.
    ///
    /// Names missing from `designs` show as `"Unknown"`.
    pub fn describe(&self, designs: &[ShirtDesign]) -> Vec<ComboView> {
        let by_id: HashMap<&str, &ShirtDesign> =
            designs.iter().map(|d| (d.id.as_str(), d)).collect();
        let name_of = |id: &str| {
            by_id
                .get(id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| UNKNOWN_DESIGN_NAME.to_string())
        };

        self.combos
            .iter()
            .map(|(combo_id, components)| ComboView {
                combo_id: combo_id.clone(),
                combo_name: name_of(combo_id),
                is_combo: by_id.get(combo_id.as_str()).is_some_and(|d| d.is_combo),
                components: components
                    .iter()
                    .map(|c| ComboComponentView {
                        component_id: c.component_id.clone(),
                        component_name: name_of(&c.component_id),
                        multiplier: c.multiplier,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// A combo as listed on the admin combos page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboView {
    pub combo_id: String,
    pub combo_name: String,
    pub is_combo: bool,
    pub components: Vec<ComboComponentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboComponentView {
    pub component_id: String,
    pub component_name: String,
    pub multiplier: i64,
}

// =============================================================================
// Expansion
// =============================================================================

/// An order line that can be split into combo components.
pub trait ComboExpandable: Clone {
    fn design(&self) -> &str;
    fn quantity(&self) -> i64;

    /// A copy of this line for `design` with `quantity`; every other field
    /// (size, price, order) is inherited.
    fn as_component(&self, design: &str, quantity: i64) -> Self;
}

impl ComboExpandable for OrderLineItem {
    fn design(&self) -> &str {
        &self.design
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn as_component(&self, design: &str, quantity: i64) -> Self {
        OrderLineItem {
            design: design.to_string(),
            quantity,
            ..self.clone()
        }
    }
}

/// Replaces every combo line with one line per component.
///
/// Component lines keep the combo line's size and carry
/// `quantity × multiplier`. They are inserted where the combo line was, in
/// registry order. Non-combo lines pass through untouched.
///
/// ## Example
/// ```rust
/// use tiger_core::combo::{expand_combo_items, ComboRegistry};
/// use tiger_core::{ComboComponentEdge, OrderLineItem};
///
/// let registry = ComboRegistry::build(vec![
///     ComboComponentEdge::new("3", "1", 1),
///     ComboComponentEdge::new("3", "2", 1),
/// ]);
/// let items = vec![OrderLineItem::new("3", "L", 2), OrderLineItem::new("4", "M", 1)];
///
/// let expanded = expand_combo_items(&items, &registry);
/// let designs: Vec<_> = expanded.iter().map(|i| (i.design.as_str(), i.quantity)).collect();
/// assert_eq!(designs, vec![("1", 2), ("2", 2), ("4", 1)]);
/// ```
pub fn expand_combo_items<T: ComboExpandable>(items: &[T], registry: &ComboRegistry) -> Vec<T> {
    let mut expanded = Vec::with_capacity(items.len());

    for item in items {
        let components = registry.components_of(item.design());
        if components.is_empty() {
            expanded.push(item.clone());
            continue;
        }

        expanded.extend(components.iter().map(|component| {
            item.as_component(
                &component.component_id,
                item.quantity().saturating_mul(component.multiplier),
            )
        }));
    }

    expanded
}

// =============================================================================
// Combo Admin Validation
// =============================================================================

/// One component in a create/replace request from the admin UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboComponentInput {
    #[serde(default)]
    pub component_id: String,
    #[serde(default)]
    pub multiplier: i64,
}

impl ComboComponentInput {
    pub fn new(component_id: impl Into<String>, multiplier: i64) -> Self {
        ComboComponentInput {
            component_id: component_id.into(),
            multiplier,
        }
    }
}

/// Checks a create/replace request. The first failing rule wins:
///
/// 1. combo id non-empty and an existing design (`combo_exists`)
/// 2. at least one component
/// 3. every component has an id and a multiplier of at least 1
/// 4. no component listed twice
/// 5. the combo does not list itself
///
/// The error's message is shown to the operator verbatim.
pub fn validate_combo_request(
    combo_id: &str,
    components: &[ComboComponentInput],
    combo_exists: bool,
) -> ValidationResult<()> {
    if combo_id.trim().is_empty() {
        return Err(ValidationError::required("comboId"));
    }
    if !combo_exists {
        return Err(ValidationError::UnknownDesign {
            id: combo_id.to_string(),
        });
    }

    if components.is_empty() {
        return Err(ValidationError::EmptyComponents);
    }

    if let Some(position) = components
        .iter()
        .position(|c| c.component_id.trim().is_empty() || c.multiplier < 1)
    {
        return Err(ValidationError::InvalidComponent {
            position: position + 1,
        });
    }

    let mut seen = HashSet::with_capacity(components.len());
    for component in components {
        if !seen.insert(component.component_id.as_str()) {
            return Err(ValidationError::DuplicateComponent {
                component_id: component.component_id.clone(),
            });
        }
    }

    if seen.contains(combo_id) {
        return Err(ValidationError::SelfReference {
            combo_id: combo_id.to_string(),
        });
    }

    Ok(())
}

/// Turns a validated request into the edge rows to store.
pub fn edges_for(combo_id: &str, components: &[ComboComponentInput]) -> Vec<ComboComponentEdge> {
    components
        .iter()
        .map(|c| ComboComponentEdge::new(combo_id, c.component_id.clone(), c.multiplier))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pack_registry() -> ComboRegistry {
        ComboRegistry::build(vec![
            ComboComponentEdge::new("3", "1", 1),
            ComboComponentEdge::new("3", "2", 3),
        ])
    }

    fn design(id: &str, name: &str, is_combo: bool) -> ShirtDesign {
        ShirtDesign {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price_satang: 0,
            front_image: None,
            back_image: None,
            is_active: true,
            display_order: 0,
            is_combo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_groups_and_keeps_order() {
        let registry = ComboRegistry::build(vec![
            ComboComponentEdge::new("9", "b", 1),
            ComboComponentEdge::new("3", "2", 1),
            ComboComponentEdge::new("9", "a", 2),
            ComboComponentEdge::new("3", "1", 1),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.combo_ids().collect::<Vec<_>>(), vec!["9", "3"]);

        let nine: Vec<_> = registry
            .components_of("9")
            .iter()
            .map(|c| c.component_id.as_str())
            .collect();
        assert_eq!(nine, vec!["b", "a"]);

        let three: Vec<_> = registry
            .components_of("3")
            .iter()
            .map(|c| c.component_id.as_str())
            .collect();
        assert_eq!(three, vec!["2", "1"]);
    }

    #[test]
    fn test_has_and_missing_components() {
        let registry = pack_registry();
        assert!(registry.has("3"));
        assert!(!registry.has("1"));
        assert!(registry.components_of("42").is_empty());
        assert!(ComboRegistry::default().is_empty());
    }

    #[test]
    fn test_build_passes_malformed_edges_through() {
        let registry = ComboRegistry::build(vec![ComboComponentEdge::new("5", "5", 0)]);
        assert!(registry.has("5"));
        assert_eq!(registry.components_of("5")[0].multiplier, 0);
    }

    #[test]
    fn test_expand_is_multiplicative_and_in_place() {
        let registry = pack_registry();
        let items = vec![
            OrderLineItem::new("4", "S", 1),
            OrderLineItem::new("3", "M", 2),
            OrderLineItem::new("1", "XL", 5),
        ];

        let expanded = expand_combo_items(&items, &registry);
        let got: Vec<_> = expanded
            .iter()
            .map(|i| (i.design.as_str(), i.size.as_str(), i.quantity))
            .collect();
        assert_eq!(
            got,
            vec![("4", "S", 1), ("1", "M", 2), ("2", "M", 6), ("1", "XL", 5)]
        );
    }

    #[test]
    fn test_expand_inherits_other_fields() {
        let registry = pack_registry();
        let item = OrderLineItem {
            order_id: Some(17),
            price_per_unit_satang: 110_000,
            ..OrderLineItem::new("3", "L", 1)
        };

        let expanded = expand_combo_items(&[item], &registry);
        assert!(expanded.iter().all(|i| i.order_id == Some(17)));
        assert!(expanded.iter().all(|i| i.price_per_unit_satang == 110_000));
        assert!(expanded.iter().all(|i| i.size == "L"));
    }

    #[test]
    fn test_expand_without_combos_is_identity() {
        let registry = pack_registry();
        let items = vec![
            OrderLineItem::new("1", "M", 2),
            OrderLineItem::new("2", "bogus", 1),
            OrderLineItem::new("1", "S", 4),
        ];

        assert_eq!(expand_combo_items(&items, &registry), items);
    }

    #[test]
    fn test_expand_is_single_level() {
        let registry = ComboRegistry::build(vec![
            ComboComponentEdge::new("10", "3", 2),
            ComboComponentEdge::new("3", "1", 1),
        ]);
        let expanded = expand_combo_items(&[OrderLineItem::new("10", "M", 1)], &registry);

        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].design, "3");
        assert_eq!(expanded[0].quantity, 2);
    }

    #[test]
    fn test_expand_saturates_huge_quantities() {
        let registry = ComboRegistry::build(vec![ComboComponentEdge::new("3", "1", 4)]);
        let expanded = expand_combo_items(&[OrderLineItem::new("3", "L", i64::MAX / 2)], &registry);

        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].quantity, i64::MAX);
    }

    #[test]
    fn test_validate_accepts_good_request() {
        let components = vec![ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 2)];
        assert!(validate_combo_request("3", &components, true).is_ok());
    }

    #[test]
    fn test_validate_combo_id_rules() {
        let components = vec![ComboComponentInput::new("1", 1)];
        assert_eq!(
            validate_combo_request("  ", &components, true),
            Err(ValidationError::Required {
                field: "comboId".to_string()
            })
        );
        assert_eq!(
            validate_combo_request("99", &components, false),
            Err(ValidationError::UnknownDesign {
                id: "99".to_string()
            })
        );
    }

    #[test]
    fn test_validate_empty_components() {
        assert_eq!(
            validate_combo_request("3", &[], true),
            Err(ValidationError::EmptyComponents)
        );
    }

    #[test]
    fn test_validate_invalid_component() {
        let zero = vec![ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 0)];
        assert_eq!(
            validate_combo_request("3", &zero, true),
            Err(ValidationError::InvalidComponent { position: 2 })
        );

        let blank = vec![ComboComponentInput::new("", 1)];
        assert_eq!(
            validate_combo_request("3", &blank, true),
            Err(ValidationError::InvalidComponent { position: 1 })
        );
    }

    #[test]
    fn test_validate_duplicate_component() {
        let components = vec![ComboComponentInput::new("1", 1), ComboComponentInput::new("1", 2)];
        assert_eq!(
            validate_combo_request("3", &components, true),
            Err(ValidationError::DuplicateComponent {
                component_id: "1".to_string()
            })
        );
    }

    #[test]
    fn test_validate_self_reference() {
        let components = vec![ComboComponentInput::new("3", 1)];
        assert_eq!(
            validate_combo_request("3", &components, true),
            Err(ValidationError::SelfReference {
                combo_id: "3".to_string()
            })
        );
    }

    #[test]
    fn test_validate_first_failure_wins() {
        // Duplicate and self-reference together: duplicate is checked first.
        let components = vec![ComboComponentInput::new("3", 1), ComboComponentInput::new("3", 1)];
        assert!(matches!(
            validate_combo_request("3", &components, true),
            Err(ValidationError::DuplicateComponent { .. })
        ));

        // Missing design beats empty components.
        assert!(matches!(
            validate_combo_request("3", &[], false),
            Err(ValidationError::UnknownDesign { .. })
        ));
    }

    #[test]
    fn test_edges_for() {
        let edges = edges_for(
            "3",
            &[ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 2)],
        );
        assert_eq!(
            edges,
            vec![
                ComboComponentEdge::new("3", "1", 1),
                ComboComponentEdge::new("3", "2", 2)
            ]
        );
    }

    #[test]
    fn test_describe_resolves_names() {
        let registry = ComboRegistry::build(vec![
            ComboComponentEdge::new("3", "1", 1),
            ComboComponentEdge::new("3", "77", 2),
        ]);
        let designs = vec![design("1", "Long sleeve", false), design("3", "Pair pack", true)];

        let views = registry.describe(&designs);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].combo_name, "Pair pack");
        assert!(views[0].is_combo);
        assert_eq!(views[0].components[0].component_name, "Long sleeve");
        assert_eq!(views[0].components[1].component_name, UNKNOWN_DESIGN_NAME);
        assert_eq!(views[0].components[1].multiplier, 2);
    }
}
