//! # Order Repository
//!
//! Orders, their line items, and the status-filtered line item feed the size
//! summary reads.
//!
//! ## Snapshot Pattern
//! Line items copy the design id and unit price at order time. Retiring or
//! repricing a design later never rewrites history.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tiger_core::order::{NewOrder, PricedOrder};
use tiger_core::{Order, OrderLineItem, OrderStatus, OrderWithItems};

/// Repository for orders and line items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores a priced order and its lines in one transaction.
    ///
    /// The order starts `pending`. Lines keep the order in which the customer
    /// entered them.
    pub async fn create(&self, form: &NewOrder, priced: &PricedOrder) -> DbResult<OrderWithItems> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (
                name, phone, address, is_pickup,
                total_price_satang, shipping_satang, slip_image, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING id
            "#,
        )
        .bind(form.name.trim())
        .bind(form.phone.as_deref().map(str::trim))
        .bind(if form.is_pickup {
            None
        } else {
            form.address.as_deref().map(str::trim)
        })
        .bind(form.is_pickup)
        .bind(priced.subtotal.satang())
        .bind(priced.shipping.satang())
        .bind(form.slip_image.trim())
        .bind(OrderStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for item in &priced.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, design, size, quantity, price_per_unit_satang)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(order_id)
            .bind(&item.design)
            .bind(&item.size)
            .bind(item.quantity)
            .bind(item.price_per_unit_satang)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id,
            items = priced.items.len(),
            total_satang = priced.grand_total().satang(),
            "Order created"
        );

        self.get_with_items(order_id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, name, phone, address, is_pickup, total_price_satang,
                   shipping_satang, slip_image, status, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Order", id.to_string()))
    }

    pub async fn get_with_items(&self, id: i64) -> DbResult<OrderWithItems> {
        let order = self.get(id).await?;
        let items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT order_id, design, size, quantity, price_per_unit_satang
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OrderWithItems { order, items })
    }

    /// Every order, newest first, each with its lines.
    pub async fn list_with_items(&self) -> DbResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, name, phone, address, is_pickup, total_price_satang,
                   shipping_satang, slip_image, status, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT order_id, design, size, quantity, price_per_unit_satang
            FROM order_items
            ORDER BY order_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i64, Vec<OrderLineItem>> = HashMap::new();
        for item in items {
            if let Some(order_id) = item.order_id {
                by_order.entry(order_id).or_default().push(item);
            }
        }

        debug!(count = orders.len(), "Listed orders");
        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                items: by_order.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    /// Moves an order to `status` and returns the updated order.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> DbResult<Order> {
        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id.to_string()));
        }

        info!(order_id = id, status = %status, "Order status updated");
        self.get(id).await
    }

    /// Line items of every order whose status is in `statuses`; all line
    /// items when `statuses` is empty.
    pub async fn line_items(&self, statuses: &[OrderStatus]) -> DbResult<Vec<OrderLineItem>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT i.order_id, i.design, i.size, i.quantity, i.price_per_unit_satang \
             FROM order_items i JOIN orders o ON o.id = i.order_id",
        );

        if !statuses.is_empty() {
            query.push(" WHERE o.status IN (");
            let mut separated = query.separated(", ");
            for status in statuses {
                separated.push_bind(*status);
            }
            separated.push_unseparated(")");
        }
        query.push(" ORDER BY i.order_id, i.id");

        let items = query
            .build_query_as::<OrderLineItem>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), filter = ?statuses, "Loaded line items");
        Ok(items)
    }
}

// =============================================================================
// Tests
// =============================================================================
