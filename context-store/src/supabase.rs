//! Supabase backend over the PostgREST HTTP interface.
//!
//! Endpoints (relative to `{SUPABASE_URL}/rest/v1`):
//! - `GET  /company_context?select=id,content&id=eq.1`: read the singleton
//! - `POST /company_context` with `Prefer: resolution=merge-duplicates`: upsert by id
//! - `POST /qa_log`: append one exchange
//! - `GET  /qa_log?select=...&order=created_at.desc&limit=N`: recent history

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, header};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{
    errors::{Result, StoreError},
    model::{CONTEXT_ID, ContextDocument, QaLogEntry},
    store::ContextStore,
};

const CONTEXT_TABLE: &str = "company_context";
const LOG_TABLE: &str = "qa_log";

/// PostgREST client bound to one Supabase project.
#[derive(Debug)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_base: String,
    timeout: Duration,
}

impl SupabaseStore {
    /// Creates a client for `url` authenticated with `key`.
    ///
    /// # Errors
    /// [`StoreError::NotConfigured`] for an invalid URL or key, or when the HTTP
    /// client cannot be built.
    pub fn new(url: &str, key: &str, timeout: Duration) -> Result<Self> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::NotConfigured(format!(
                "invalid Supabase URL `{url}`"
            )));
        }
        if key.trim().is_empty() {
            return Err(StoreError::NotConfigured("empty Supabase key".into()));
        }

        let mut apikey = header::HeaderValue::from_str(key.trim())
            .map_err(|e| StoreError::NotConfigured(format!("invalid Supabase key: {e}")))?;
        apikey.set_sensitive(true);
        let mut bearer = header::HeaderValue::from_str(&format!("Bearer {}", key.trim()))
            .map_err(|e| StoreError::NotConfigured(format!("invalid Supabase key: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::NotConfigured(format!("http client: {e}")))?;

        let rest_base = format!("{}/rest/v1", url.trim_end_matches('/'));
        info!(%rest_base, timeout_secs = timeout.as_secs(), "SupabaseStore initialized");

        Ok(Self {
            client,
            rest_base,
            timeout,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_base, table)
    }

    async fn ensure_success(resp: Response, table: &'static str) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let snippet = snippet.chars().take(300).collect::<String>();
        error!(%status, table, %snippet, "PostgREST returned non-success status");
        Err(StoreError::HttpStatus {
            status,
            table,
            snippet,
        })
    }
}

#[derive(Debug, Serialize)]
struct ContextUpsert<'a> {
    id: i64,
    content: &'a str,
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct LogInsert<'a> {
    question: &'a str,
    answer: &'a str,
}

#[async_trait]
impl ContextStore for SupabaseStore {
    async fn load_context(&self) -> Result<Option<String>> {
        let started = Instant::now();
        let id_filter = format!("eq.{CONTEXT_ID}");
        let resp = self
            .client
            .get(self.table_url(CONTEXT_TABLE))
            .query(&[("select", "id,content"), ("id", id_filter.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))?;
        let resp = Self::ensure_success(resp, CONTEXT_TABLE).await?;

        let rows: Vec<ContextDocument> = resp
            .json()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))?;

        debug!(
            rows = rows.len(),
            latency_ms = started.elapsed().as_millis(),
            "context fetched"
        );
        Ok(rows.into_iter().find(|r| r.id == CONTEXT_ID).map(|r| r.content))
    }

    async fn upsert_context(&self, content: &str) -> Result<()> {
        let started = Instant::now();
        let body = ContextUpsert {
            id: CONTEXT_ID,
            content,
            updated_at: Utc::now().to_rfc3339(),
        };
        let resp = self
            .client
            .post(self.table_url(CONTEXT_TABLE))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))?;
        Self::ensure_success(resp, CONTEXT_TABLE).await?;

        info!(
            content_len = content.len(),
            latency_ms = started.elapsed().as_millis(),
            "context upserted"
        );
        Ok(())
    }

    async fn insert_log(&self, question: &str, answer: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.table_url(LOG_TABLE))
            .header("Prefer", "return=minimal")
            .json(&LogInsert { question, answer })
            .send()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))?;
        Self::ensure_success(resp, LOG_TABLE).await?;
        Ok(())
    }

    async fn recent_logs(&self, limit: usize) -> Result<Vec<QaLogEntry>> {
        let limit = limit.to_string();
        let resp = self
            .client
            .get(self.table_url(LOG_TABLE))
            .query(&[
                ("select", "question,answer,created_at"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))?;
        let resp = Self::ensure_success(resp, LOG_TABLE).await?;

        resp.json()
            .await
            .map_err(|e| StoreError::from_transport(e, self.timeout))
    }

    fn backend(&self) -> &'static str {
        "supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn store(url: &str) -> SupabaseStore {
        SupabaseStore::new(url, "service-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn load_context_reads_singleton_row() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/company_context")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "id,content".into()),
                Matcher::UrlEncoded("id".into(), "eq.1".into()),
            ]))
            .match_header("apikey", "service-key")
            .match_header("authorization", "Bearer service-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"content":"PTO policy: 20 days/year."}]"#)
            .create_async()
            .await;

        let out = store(&server.url()).load_context().await.unwrap();
        assert_eq!(out.as_deref(), Some("PTO policy: 20 days/year."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn load_context_empty_table_is_none() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/rest/v1/company_context")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        assert_eq!(store(&server.url()).load_context().await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_sends_merge_preference_and_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/company_context")
            .match_header("prefer", "resolution=merge-duplicates,return=minimal")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "id": 1,
                "content": "new text"
            })))
            .with_status(201)
            .create_async()
            .await;

        store(&server.url()).upsert_context("new text").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_reported_with_table() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/rest/v1/qa_log")
            .with_status(401)
            .with_body(r#"{"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let err = store(&server.url()).insert_log("q", "a").await.unwrap_err();
        match err {
            StoreError::HttpStatus { status, table, snippet } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(table, "qa_log");
                assert!(snippet.contains("Invalid API key"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn recent_logs_orders_newest_first() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/rest/v1/qa_log")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[
                    {"question":"q2","answer":"a2","created_at":"2024-05-02T10:00:00.123456+00:00"},
                    {"question":"q1","answer":"a1","created_at":"2024-05-01T10:00:00+00:00"}
                ]"#,
            )
            .create_async()
            .await;

        let rows = store(&server.url()).recent_logs(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "q2");
        assert!(rows[0].created_at > rows[1].created_at);
    }

    #[tokio::test]
    async fn malformed_payload_is_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/rest/v1/company_context")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let err = store(&server.url()).load_context().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn rejects_bad_url_and_empty_key() {
        assert!(SupabaseStore::new("xyz.supabase.co", "k", Duration::from_secs(1)).is_err());
        assert!(SupabaseStore::new("https://xyz.supabase.co", " ", Duration::from_secs(1)).is_err());
    }
}
