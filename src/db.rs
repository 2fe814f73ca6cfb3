use sqlx::SqlitePool;

/// Creates the tables if they do not exist. Safe to run on every startup.
pub async fn ensure_schema(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            BLOB PRIMARY KEY,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS expenses (
            id         BLOB PRIMARY KEY,
            user_id    BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            category   TEXT NOT NULL,
            amount     REAL NOT NULL,
            date       TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}
