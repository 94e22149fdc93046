use sqlx::{FromRow, PgConnection, PgPool};

#[derive(Debug, Clone, FromRow)]
pub struct Progress {
    pub recipe_id: String,
    pub status: String,
    pub position: i64,
    pub timestamp: i64,
}

pub async fn list_by_user(db: &PgPool, email: &str) -> anyhow::Result<Vec<Progress>> {
    let rows = sqlx::query_as::<_, Progress>(
        r#"
        SELECT recipe_id, status, position, timestamp
        FROM progress
        WHERE user_email = $1
        ORDER BY id
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Insert-or-update keyed by `(user_email, recipe_id)`; exactly one row per
/// key after the call. `timestamp` is overwritten on every write.
pub async fn upsert(
    conn: &mut PgConnection,
    email: &str,
    recipe_id: &str,
    status: &str,
    position: i64,
    timestamp_ms: i64,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO progress (user_email, recipe_id, status, position, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_email, recipe_id)
        DO UPDATE SET status = EXCLUDED.status,
                      position = EXCLUDED.position,
                      timestamp = EXCLUDED.timestamp
        "#,
    )
    .bind(email)
    .bind(recipe_id)
    .bind(status)
    .bind(position)
    .bind(timestamp_ms)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Idempotent remove: deleting an absent row is not an error.
pub async fn remove(db: &PgPool, email: &str, recipe_id: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        DELETE FROM progress
        WHERE user_email = $1 AND recipe_id = $2
        "#,
    )
    .bind(email)
    .bind(recipe_id)
    .execute(db)
    .await?;
    Ok(())
}
