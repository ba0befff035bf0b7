#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use contactus::{AppState, router};
use contactus_shared::{Message, QueryType};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::{SqlitePool, prelude::FromRow, sqlite::SqliteConnectOptions};
use tower::ServiceExt;

#[derive(FromRow)]
struct MessageRow {
    id: i64,
    first_name: String,
    last_name: String,
    email_address: String,
    query_type: sqlx::types::Text<QueryType>,
    message: String,
    service_agreement: bool,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email_address: row.email_address,
            query_type: row.query_type.0,
            message: row.message,
            service_agreement: row.service_agreement,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    contactus_db::migrate(&pool).await?;

    Ok(TestApp {
        router: router(AppState::new(pool.clone())),
        pool,
    })
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> anyhow::Result<Response<Body>> {
        Ok(self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?)
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> anyhow::Result<Response<Body>> {
        Ok(self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(body)?))?,
            )
            .await?)
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> anyhow::Result<Response<Body>> {
        Ok(self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(serde_urlencoded::to_string(fields)?))?,
            )
            .await?)
    }

    pub async fn find_message(&self, id: i64) -> anyhow::Result<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, first_name, last_name, email_address, query_type, message, service_agreement FROM message WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Message::from))
    }

    pub async fn count_messages(&self) -> anyhow::Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM message")
            .fetch_one(&self.pool)
            .await?)
    }
}

pub async fn body_string(response: Response<Body>) -> anyhow::Result<String> {
    let body = response.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(body.to_vec())?)
}

pub fn valid_payload() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "emailAddress": "john.doe@example.com",
        "queryType": "Support Request",
        "message": "This is a test message.",
        "serviceAgreement": true
    })
}
