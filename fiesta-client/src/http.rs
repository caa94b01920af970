//! HTTP data store over the hosted backend's REST interface
//!
//! Speaks the PostgREST-style row API: filters become query parameters
//! (`?status=eq.pending&order=created_at.desc`), mutations ask for
//! `return=representation` so the stored row comes back.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::{DataStore, Filter, FilterOp};
use async_trait::async_trait;
use serde_json::Value;
use shared::error::AppError;

/// [`DataStore`] implementation backed by the hosted backend's REST API
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bearer: Option<String>,
}

impl RestStore {
    /// Build a store from configuration; every request carries the
    /// configured timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(classify)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bearer: None,
        })
    }

    /// Attach the session access token for authenticated requests
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, table);
        let mut builder = self.client.request(method, url).header("apikey", &self.api_key);
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn query_pairs(filter: &Filter) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (column, op, value) in &filter.conditions {
            let op = match op {
                FilterOp::Eq => "eq",
                FilterOp::Gte => "gte",
                FilterOp::Lte => "lte",
            };
            pairs.push((column.clone(), format!("{}.{}", op, render(value))));
        }
        if let Some((column, ascending)) = &filter.order_by {
            let direction = if *ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{}", column, direction)));
        }
        if let Some(limit) = filter.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    async fn rows(response: reqwest::Response) -> ClientResult<Vec<Value>> {
        let response = response.error_for_status().map_err(classify)?;
        response.json::<Vec<Value>>().await.map_err(classify)
    }

    async fn single_row(response: reqwest::Response) -> ClientResult<Value> {
        let mut rows = Self::rows(response).await?;
        if rows.is_empty() {
            return Err(AppError::database("backend returned no row for mutation").into());
        }
        Ok(rows.remove(0))
    }
}

/// Render a filter value the way the REST API expects it in a query
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Distinguish timeouts from other transport failures
fn classify(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(err)
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn select(&self, table: &str, filter: Filter) -> ClientResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&Self::query_pairs(&filter))
            .send()
            .await
            .map_err(classify)?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<Value> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(classify)?;
        Self::single_row(response).await
    }

    async fn update(&self, table: &str, filter: Filter, patch: Value) -> ClientResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(&Self::query_pairs(&filter))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(classify)?;
        Self::rows(response).await
    }

    async fn upsert(&self, table: &str, row: Value) -> ClientResult<Value> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row)
            .send()
            .await
            .map_err(classify)?;
        Self::single_row(response).await
    }

    async fn delete(&self, table: &str, filter: Filter) -> ClientResult<u64> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&Self::query_pairs(&filter))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(classify)?;
        Ok(Self::rows(response).await?.len() as u64)
    }

    async fn count(&self, table: &str, filter: Filter) -> ClientResult<u64> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&Self::query_pairs(&filter))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await
            .map_err(classify)?;

        // Total row count arrives as the denominator of Content-Range
        // ("0-0/57"), even when the body is truncated by the Range header.
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|v| v.parse::<u64>().ok());

        match total {
            Some(count) => Ok(count),
            None => Ok(Self::rows(response).await?.len() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_from_filter() {
        let filter = Filter::new()
            .eq("status", "pending")
            .gte("event_date", "2025-01-01")
            .order_by("created_at", false)
            .limit(20);

        let pairs = RestStore::query_pairs(&filter);
        assert!(pairs.contains(&("status".to_string(), "eq.pending".to_string())));
        assert!(pairs.contains(&("event_date".to_string(), "gte.2025-01-01".to_string())));
        assert!(pairs.contains(&("order".to_string(), "created_at.desc".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "20".to_string())));
    }

    #[test]
    fn test_render_values() {
        assert_eq!(render(&json!("pending")), "pending");
        assert_eq!(render(&json!(42)), "42");
        assert_eq!(render(&json!(true)), "true");
    }
}
