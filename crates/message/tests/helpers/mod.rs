use std::{path::PathBuf, str::FromStr};

use contactus_message::CreateMessageRequest;
use contactus_shared::QueryType;
use sqlx::{SqlitePool, prelude::FromRow, sqlite::SqliteConnectOptions};

#[derive(Debug, FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub email_address: String,
    pub query_type: sqlx::types::Text<QueryType>,
    pub service_agreement: bool,
    pub created_at: i64,
}

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    contactus_db::migrate(&pool).await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn find_message(pool: &SqlitePool, id: i64) -> anyhow::Result<Option<MessageRow>> {
    Ok(sqlx::query_as::<_, MessageRow>(
        "SELECT id, email_address, query_type, service_agreement, created_at FROM message WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

#[allow(dead_code)]
pub fn valid_request() -> CreateMessageRequest {
    CreateMessageRequest {
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email_address: "john.doe@example.com".to_owned(),
        query_type: "Support Request".to_owned(),
        message: "This is a test message.".to_owned(),
        service_agreement: "true".to_owned(),
    }
}
