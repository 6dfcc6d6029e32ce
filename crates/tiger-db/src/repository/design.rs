//! # Design Repository
//!
//! The shirt catalog: what customers can order, at what price, in what order
//! on the form.
//!
//! ## Active vs All
//! ```text
//! list_active()   order form, price map      is_active = 1 only
//! list_all()      admin screens, reports     soft-deleted included
//! ```
//! Reports use the full catalog so orders placed before a design was retired
//! still show up in the size summary.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tiger_core::validation::{validate_design_id, validate_name, validate_price_satang};
use tiger_core::{DesignRef, NewShirtDesign, ShirtDesign, ShirtDesignUpdate};

/// Repository for design catalog operations.
#[derive(Debug, Clone)]
pub struct DesignRepository {
    pool: SqlitePool,
}

impl DesignRepository {
    /// Creates a new DesignRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DesignRepository { pool }
    }

    /// Orderable designs in form order.
    pub async fn list_active(&self) -> DbResult<Vec<ShirtDesign>> {
        let designs = sqlx::query_as::<_, ShirtDesign>(
            r#"
            SELECT id, name, description, price_satang, front_image, back_image,
                   is_active, display_order, is_combo, created_at, updated_at
            FROM shirt_designs
            WHERE is_active = 1
            ORDER BY display_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = designs.len(), "Listed active designs");
        Ok(designs)
    }

    /// Every design, retired ones included.
    pub async fn list_all(&self) -> DbResult<Vec<ShirtDesign>> {
        let designs = sqlx::query_as::<_, ShirtDesign>(
            r#"
            SELECT id, name, description, price_satang, front_image, back_image,
                   is_active, display_order, is_combo, created_at, updated_at
            FROM shirt_designs
            ORDER BY display_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(designs)
    }

    /// The `{id, name}` catalog the size summary reports over.
    pub async fn catalog_refs(&self) -> DbResult<Vec<DesignRef>> {
        Ok(self.list_all().await?.iter().map(DesignRef::from).collect())
    }

    /// Gets a design by id, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<ShirtDesign> {
        sqlx::query_as::<_, ShirtDesign>(
            r#"
            SELECT id, name, description, price_satang, front_image, back_image,
                   is_active, display_order, is_combo, created_at, updated_at
            FROM shirt_designs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Design", id))
    }

    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM shirt_designs WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Unit price (satang) of every active design, keyed by id.
    pub async fn price_map(&self) -> DbResult<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT id, price_satang FROM shirt_designs WHERE is_active = 1")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }

    /// Adds a design to the catalog.
    ///
    /// ## Errors
    /// - `Validation` for a malformed id, name or price
    /// - `UniqueViolation` if the id is taken (including by a retired design)
    pub async fn insert(&self, new: &NewShirtDesign) -> DbResult<ShirtDesign> {
        validate_design_id(&new.id)?;
        validate_name("name", &new.name)?;
        validate_price_satang(new.price_satang)?;

        let now = Utc::now();
        let design = ShirtDesign {
            id: new.id.trim().to_string(),
            name: new.name.trim().to_string(),
            description: new.description.clone(),
            price_satang: new.price_satang,
            front_image: new.front_image.clone(),
            back_image: new.back_image.clone(),
            is_active: true,
            display_order: new.display_order,
            is_combo: false,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO shirt_designs (
                id, name, description, price_satang, front_image, back_image,
                is_active, display_order, is_combo, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&design.id)
        .bind(&design.name)
        .bind(&design.description)
        .bind(design.price_satang)
        .bind(&design.front_image)
        .bind(&design.back_image)
        .bind(design.is_active)
        .bind(design.display_order)
        .bind(design.is_combo)
        .bind(design.created_at)
        .bind(design.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("id", design.id.clone()),
            other => other,
        })?;

        info!(design_id = %design.id, "Design created");
        Ok(design)
    }

    /// Applies a partial update and returns the stored result.
    pub async fn update(&self, id: &str, changes: &ShirtDesignUpdate) -> DbResult<ShirtDesign> {
        let mut design = self.get_by_id(id).await?;

        if let Some(name) = &changes.name {
            validate_name("name", name)?;
            design.name = name.trim().to_string();
        }
        if let Some(price) = changes.price_satang {
            validate_price_satang(price)?;
            design.price_satang = price;
        }
        if let Some(description) = &changes.description {
            design.description = description.clone();
        }
        if let Some(front) = &changes.front_image {
            design.front_image = Some(front.clone());
        }
        if let Some(back) = &changes.back_image {
            design.back_image = Some(back.clone());
        }
        if let Some(active) = changes.is_active {
            design.is_active = active;
        }
        if let Some(order) = changes.display_order {
            design.display_order = order;
        }
        design.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE shirt_designs SET
                name = ?2,
                description = ?3,
                price_satang = ?4,
                front_image = ?5,
                back_image = ?6,
                is_active = ?7,
                display_order = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&design.id)
        .bind(&design.name)
        .bind(&design.description)
        .bind(design.price_satang)
        .bind(&design.front_image)
        .bind(&design.back_image)
        .bind(design.is_active)
        .bind(design.display_order)
        .bind(design.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(design_id = %id, "Design updated");
        Ok(design)
    }

    /// Retires a design. Its row, combo edges and past line items stay.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE shirt_designs SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Design", id));
        }

        info!(design_id = %id, "Design deactivated");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{db, new_design, seeded};
    use tiger_core::ValidationError;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = db().await;
        let repo = db.designs();

        let created = repo.insert(&new_design(" 7 ", " Tiger Tee ", 75_000)).await.unwrap();
        assert_eq!(created.id, "7");
        assert_eq!(created.name, "Tiger Tee");

        let loaded = repo.get_by_id("7").await.unwrap();
        assert_eq!(loaded.name, "Tiger Tee");
        assert_eq!(loaded.price_satang, 75_000);
        assert!(loaded.is_active);
        assert!(!loaded.is_combo);
        assert!(repo.exists("7").await.unwrap());
        assert!(!repo.exists("8").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates_and_bad_input() {
        let db = seeded().await;
        let repo = db.designs();

        let dup = repo.insert(&new_design("1", "Again", 0)).await.unwrap_err();
        assert!(matches!(dup, DbError::UniqueViolation { ref value, .. } if value == "1"));

        let bad_id = repo.insert(&new_design("a b", "X", 0)).await.unwrap_err();
        assert!(matches!(
            bad_id,
            DbError::Validation(ValidationError::InvalidFormat { .. })
        ));

        let bad_price = repo.insert(&new_design("9", "X", -1)).await.unwrap_err();
        assert!(matches!(bad_price, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_order_and_soft_delete() {
        let db = db().await;
        let repo = db.designs();
        repo.insert(&NewShirtDesign {
            display_order: 2,
            ..new_design("a", "Second", 100)
        })
        .await
        .unwrap();
        repo.insert(&NewShirtDesign {
            display_order: 1,
            ..new_design("b", "First", 100)
        })
        .await
        .unwrap();

        let names: Vec<_> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);

        repo.deactivate("b").await.unwrap();
        assert_eq!(repo.list_active().await.unwrap().len(), 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
        assert!(!repo.price_map().await.unwrap().contains_key("b"));

        assert!(repo.deactivate("zzz").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = seeded().await;
        let repo = db.designs();

        let updated = repo
            .update(
                "1",
                &ShirtDesignUpdate {
                    price_satang: Some(80_000),
                    front_image: Some("https://blob.example/1-front.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.price_satang, 80_000);
        assert_eq!(repo.price_map().await.unwrap()["1"], 80_000);
        assert_eq!(
            repo.get_by_id("1").await.unwrap().front_image.as_deref(),
            Some("https://blob.example/1-front.png")
        );

        let missing = repo.update("404", &ShirtDesignUpdate::default()).await;
        assert!(missing.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_catalog_refs() {
        let db = seeded().await;
        let refs = db.designs().catalog_refs().await.unwrap();
        assert_eq!(
            refs,
            vec![
                DesignRef::new("1", "A"),
                DesignRef::new("2", "B"),
                DesignRef::new("3", "Combo"),
            ]
        );
    }
}
