use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One cart row joined to its product, as returned by `get_cart_items`.
/// No totals here; pricing aggregation is the client's job.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub id: Uuid,
    pub quantity: i32,
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
}

/// Adds `quantity` of a product to the user's cart in one atomic
/// statement. Concurrent calls serialize on the row, so increments are
/// never lost.
pub async fn upsert_item(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<CartLine>> {
    sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.id, ci.quantity, p.id AS product_id, p.name, p.price
        FROM cart_items ci
        JOIN products p ON ci.product_id = p.id
        WHERE ci.user_id = $1
        ORDER BY ci.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Updates a row's quantity. The `user_id` filter is the ownership
/// check: rows belonging to other users are simply not matched.
pub async fn set_quantity(
    db: &PgPool,
    user_id: Uuid,
    cart_item_id: Uuid,
    quantity: i32,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE cart_items SET quantity = $1
        WHERE id = $2 AND user_id = $3
        "#,
    )
    .bind(quantity)
    .bind(cart_item_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_item(db: &PgPool, user_id: Uuid, cart_item_id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM cart_items
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(cart_item_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
