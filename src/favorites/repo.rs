use sqlx::{PgConnection, PgPool};

/// Recipe ids bookmarked by one user, in insertion order.
pub async fn list_by_user(db: &PgPool, email: &str) -> anyhow::Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT recipe_id
        FROM favorites
        WHERE user_email = $1
        ORDER BY id
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;
    Ok(ids)
}

/// Idempotent add: at most one row per `(user_email, recipe_id)`.
pub async fn add(conn: &mut PgConnection, email: &str, recipe_id: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO favorites (user_email, recipe_id)
        VALUES ($1, $2)
        ON CONFLICT (user_email, recipe_id) DO NOTHING
        "#,
    )
    .bind(email)
    .bind(recipe_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Idempotent remove: deleting an absent row is not an error.
pub async fn remove(conn: &mut PgConnection, email: &str, recipe_id: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        DELETE FROM favorites
        WHERE user_email = $1 AND recipe_id = $2
        "#,
    )
    .bind(email)
    .bind(recipe_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
