//! # Combo Repository
//!
//! Stores combo edges and applies combo admin edits.
//!
//! ## Replace Semantics
//! ```text
//! create_or_replace("3", [(1,1), (2,1)])
//!     │
//!     ├── design "3" exists?                    no  → Validation(UnknownDesign)
//!     ├── validate_combo_request (rules 1-5)    bad → Validation(..)
//!     ▼
//!  BEGIN
//!     DELETE edges of "3"
//!     INSERT (3,1,1), (3,2,1)
//!     UPDATE shirt_designs SET is_combo = 1
//!  COMMIT                                      any failure → rolled back
//! ```
//! The whole edge set is swapped in one transaction, so readers never see a
//! combo with zero components halfway through an edit.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use tiger_core::combo::{edges_for, validate_combo_request, ComboComponentInput, ComboRegistry};
use tiger_core::ComboComponentEdge;

/// Repository for combo edges.
#[derive(Debug, Clone)]
pub struct ComboRepository {
    pool: SqlitePool,
}

impl ComboRepository {
    /// Creates a new ComboRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ComboRepository { pool }
    }

    /// Every stored edge, ordered by combo id then component id.
    pub async fn list_edges(&self) -> DbResult<Vec<ComboComponentEdge>> {
        let edges = sqlx::query_as::<_, ComboComponentEdge>(
            r#"
            SELECT combo_design_id, component_design_id, multiplier
            FROM shirt_combo_components
            ORDER BY combo_design_id, component_design_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = edges.len(), "Loaded combo edges");
        Ok(edges)
    }

    /// A fresh registry snapshot. Callers build one per request.
    pub async fn registry(&self) -> DbResult<ComboRegistry> {
        Ok(ComboRegistry::build(self.list_edges().await?))
    }

    /// Replaces the component list of `combo_id` (creating the combo if it
    /// had none) and marks the design as a combo.
    ///
    /// ## Errors
    /// - `Validation` when a combo rule fails; the message is operator-facing
    /// - `ForeignKeyViolation` when a component is not a catalog design
    /// - `TransactionFailed` when the commit itself fails
    pub async fn create_or_replace(
        &self,
        combo_id: &str,
        components: &[ComboComponentInput],
    ) -> DbResult<Vec<ComboComponentEdge>> {
        let exists = !combo_id.trim().is_empty() && self.design_exists(combo_id).await?;
        validate_combo_request(combo_id, components, exists)?;

        let edges = edges_for(combo_id, components);
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shirt_combo_components WHERE combo_design_id = ?1")
            .bind(combo_id)
            .execute(&mut *tx)
            .await?;

        for edge in &edges {
            sqlx::query(
                r#"
                INSERT INTO shirt_combo_components (
                    combo_design_id, component_design_id, multiplier, created_at
                ) VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&edge.combo_design_id)
            .bind(&edge.component_design_id)
            .bind(edge.multiplier)
            .bind(now)
            .execute(&mut *tx)
            .await
            .inspect_err(|e| {
                warn!(combo_id = %combo_id, component = %edge.component_design_id, error = %e,
                    "Combo component insert failed, rolling back");
            })?;
        }

        sqlx::query("UPDATE shirt_designs SET is_combo = 1, updated_at = ?2 WHERE id = ?1")
            .bind(combo_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(combo_id = %combo_id, components = edges.len(), "Combo saved");
        Ok(edges)
    }

    /// Removes every component of `combo_id` and clears its combo flag.
    ///
    /// Deleting a design that has no components is not an error; it returns
    /// zero. Unknown designs are `NotFound`.
    pub async fn delete(&self, combo_id: &str) -> DbResult<u64> {
        if !self.design_exists(combo_id).await? {
            return Err(DbError::not_found("Design", combo_id));
        }

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM shirt_combo_components WHERE combo_design_id = ?1")
            .bind(combo_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("UPDATE shirt_designs SET is_combo = 0, updated_at = ?2 WHERE id = ?1")
            .bind(combo_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(combo_id = %combo_id, removed, "Combo deleted");
        Ok(removed)
    }

    async fn design_exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM shirt_designs WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seeded;
    use tiger_core::ValidationError;

    fn pair() -> Vec<ComboComponentInput> {
        vec![ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 1)]
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let db = seeded().await;
        let combos = db.combos();

        let saved = combos.create_or_replace("3", &pair()).await.unwrap();
        assert_eq!(saved.len(), 2);

        let registry = combos.registry().await.unwrap();
        assert!(registry.has("3"));
        let parts: Vec<_> = registry
            .components_of("3")
            .iter()
            .map(|c| (c.component_id.as_str(), c.multiplier))
            .collect();
        assert_eq!(parts, vec![("1", 1), ("2", 1)]);

        assert!(db.designs().get_by_id("3").await.unwrap().is_combo);
    }

    #[tokio::test]
    async fn test_replace_swaps_whole_edge_set() {
        let db = seeded().await;
        let combos = db.combos();
        combos.create_or_replace("3", &pair()).await.unwrap();

        combos
            .create_or_replace("3", &[ComboComponentInput::new("2", 4)])
            .await
            .unwrap();

        let edges = combos.list_edges().await.unwrap();
        assert_eq!(edges, vec![ComboComponentEdge::new("3", "2", 4)]);
    }

    #[tokio::test]
    async fn test_rule_failures_leave_store_untouched() {
        let db = seeded().await;
        let combos = db.combos();
        combos.create_or_replace("3", &pair()).await.unwrap();

        let empty = combos.create_or_replace("3", &[]).await.unwrap_err();
        assert!(matches!(
            empty,
            DbError::Validation(ValidationError::EmptyComponents)
        ));

        let own = combos
            .create_or_replace("3", &[ComboComponentInput::new("3", 1)])
            .await
            .unwrap_err();
        assert!(matches!(
            own,
            DbError::Validation(ValidationError::SelfReference { .. })
        ));

        let dup = combos
            .create_or_replace(
                "3",
                &[ComboComponentInput::new("1", 1), ComboComponentInput::new("1", 2)],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            dup,
            DbError::Validation(ValidationError::DuplicateComponent { .. })
        ));

        let missing = combos.create_or_replace("99", &pair()).await.unwrap_err();
        assert!(matches!(
            missing,
            DbError::Validation(ValidationError::UnknownDesign { .. })
        ));

        assert_eq!(combos.list_edges().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_component_rolls_back() {
        let db = seeded().await;
        let combos = db.combos();
        combos.create_or_replace("3", &pair()).await.unwrap();

        let err = combos
            .create_or_replace(
                "3",
                &[ComboComponentInput::new("1", 2), ComboComponentInput::new("ghost", 1)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // The previous edge set survives the failed replace.
        let edges = combos.list_edges().await.unwrap();
        assert_eq!(
            edges,
            vec![
                ComboComponentEdge::new("3", "1", 1),
                ComboComponentEdge::new("3", "2", 1)
            ]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let db = seeded().await;
        let combos = db.combos();
        combos.create_or_replace("3", &pair()).await.unwrap();

        assert_eq!(combos.delete("3").await.unwrap(), 2);
        assert!(combos.list_edges().await.unwrap().is_empty());
        assert!(!db.designs().get_by_id("3").await.unwrap().is_combo);

        // Deleting again is harmless.
        assert_eq!(combos.delete("3").await.unwrap(), 0);
        assert!(combos.delete("nope").await.unwrap_err().is_not_found());
    }
}
