use sqlx::{FromRow, PgConnection, PgPool};

/// Repeated identical events closer together than this collapse into one row.
pub const DEDUP_WINDOW_MS: i64 = 1000;

#[derive(Debug, Clone, FromRow)]
pub struct Activity {
    pub user_email: String,
    pub activity: String,
    pub timestamp: i64,
}

/// Rows for one user, most recent first. `limit` of `None` returns all rows.
pub async fn list_by_user(
    db: &PgPool,
    email: &str,
    limit: Option<i64>,
) -> anyhow::Result<Vec<Activity>> {
    let rows = match limit {
        Some(n) => {
            sqlx::query_as::<_, Activity>(
                r#"
                SELECT user_email, activity, timestamp
                FROM activities
                WHERE user_email = $1
                ORDER BY timestamp DESC
                LIMIT $2
                "#,
            )
            .bind(email)
            .bind(n)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, Activity>(
                r#"
                SELECT user_email, activity, timestamp
                FROM activities
                WHERE user_email = $1
                ORDER BY timestamp DESC
                "#,
            )
            .bind(email)
            .fetch_all(db)
            .await?
        }
    };
    Ok(rows)
}

/// Appends one activity row unless an identical event for the same user
/// already landed within [`DEDUP_WINDOW_MS`]. Returns `false` when the write
/// was collapsed into the existing row. Rows are never updated or deleted.
pub async fn append(
    conn: &mut PgConnection,
    email: &str,
    activity: &str,
    timestamp_ms: i64,
) -> anyhow::Result<bool> {
    let existing: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM activities
        WHERE user_email = $1
          AND activity = $2
          AND ABS(timestamp - $3) < $4
        LIMIT 1
        "#,
    )
    .bind(email)
    .bind(activity)
    .bind(timestamp_ms)
    .bind(DEDUP_WINDOW_MS)
    .fetch_optional(&mut *conn)
    .await?;

    if existing.is_some() {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO activities (user_email, activity, timestamp)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(email)
    .bind(activity)
    .bind(timestamp_ms)
    .execute(&mut *conn)
    .await?;

    Ok(true)
}
