//! Redis over HTTP (Upstash-style REST protocol).
//!
//! Every command is a `POST {url}` with a bearer token and the command as a
//! JSON array body, e.g. `["SET", "sydney:events", "[...]"]`. Replies are
//! `{"result": <value>}` on success and `{"error": "<message>"}` otherwise.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, StoreConfig};
use crate::storage::KeyValueStore;
use crate::utils::http::create_async_client;

/// Remote Redis store reached through its REST endpoint.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl RestStore {
    pub fn new(client: reqwest::Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token: token.into(),
        }
    }

    /// Create a store from configuration, sharing the crawler's HTTP settings.
    pub fn from_config(store: &StoreConfig, crawler: &CrawlerConfig) -> Result<Self> {
        if store.rest_url.trim().is_empty() || store.rest_token.trim().is_empty() {
            return Err(AppError::config("REST store needs both a URL and a token"));
        }
        let client = create_async_client(crawler)?;
        Ok(Self::new(client, store.rest_url.trim(), store.rest_token.trim()))
    }

    /// Run one command and return its `result` value.
    async fn command(&self, args: &[&str]) -> Result<Value> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_reply(args[0], status.as_u16(), &body)
    }
}

fn parse_reply(command: &str, status: u16, body: &str) -> Result<Value> {
    let reply: Reply = serde_json::from_str(body).map_err(|e| {
        AppError::store(format!("{command}: unreadable reply (status {status}): {e}"))
    })?;
    if let Some(message) = reply.error {
        return Err(AppError::store(format!("{command}: {message}")));
    }
    if !(200..300).contains(&status) {
        return Err(AppError::store(format!("{command}: status {status}")));
    }
    Ok(reply.result.unwrap_or(Value::Null))
}

fn integer_reply(command: &str, value: &Value) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| AppError::store(format!("{command}: expected an integer, got {value}")))
}

#[async_trait]
impl KeyValueStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(value) => Ok(Some(value)),
            other => Ok(Some(other.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.command(&["SET", key, value]).await?;
        Ok(())
    }

    async fn list_prepend(&self, key: &str, value: &str) -> Result<usize> {
        let reply = self.command(&["LPUSH", key, value]).await?;
        Ok(integer_reply("LPUSH", &reply)? as usize)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        let reply = self.command(&["SADD", key, member]).await?;
        Ok(integer_reply("SADD", &reply)? > 0)
    }
}
