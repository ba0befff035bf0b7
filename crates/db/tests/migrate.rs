use std::str::FromStr;

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

#[tokio::test]
async fn test_migrate_creates_message_table() -> anyhow::Result<()> {
    let dir = temp_dir::TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;

    contactus_db::migrate(&pool).await?;
    // second run is a no-op
    contactus_db::migrate(&pool).await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}
