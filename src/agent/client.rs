//! Admin API client for ACA-Py style agents

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::AgentService;
use crate::config::AgentConfig;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Serialize)]
struct SchemaSendRequest<'a> {
    schema_name: &'a str,
    schema_version: &'a str,
    attributes: &'a [String],
}

#[derive(Debug, Serialize)]
struct CredentialDefinitionSendRequest<'a> {
    schema_id: &'a str,
    tag: &'a str,
    support_revocation: bool,
}

/// HTTP client for the agent admin API
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    default_tag: String,
    support_revocation: bool,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.admin_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            default_tag: config.default_tag.clone(),
            support_revocation: config.support_revocation,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self.request(self.http.get(&url)).send().await?;
        Self::read_json(path, response).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);
        let response = self.request(self.http.post(&url)).json(body).send().await?;
        Self::read_json(path, response).await
    }

    async fn read_json(path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default().trim().to_string();
            tracing::warn!("Agent {} failed with {}: {}", path, status, message);
            return Err(Error::Agent {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AgentService for AgentClient {
    async fn get_status(&self) -> Result<Value> {
        self.get("/status").await
    }

    async fn get_connections(&self) -> Result<Value> {
        self.get("/connections").await
    }

    async fn create_schema(
        &self,
        name: String,
        version: String,
        attributes: Vec<String>,
    ) -> Result<Value> {
        let body = SchemaSendRequest {
            schema_name: &name,
            schema_version: &version,
            attributes: &attributes,
        };
        let schema = self.post("/schemas", &body).await?;
        tracing::info!("Created schema {} {}", name, version);
        Ok(schema)
    }

    async fn create_credential_definition(
        &self,
        schema_id: String,
        tag: Option<String>,
    ) -> Result<Value> {
        let body = CredentialDefinitionSendRequest {
            schema_id: &schema_id,
            tag: tag.as_deref().unwrap_or(&self.default_tag),
            support_revocation: self.support_revocation,
        };
        let cred_def = self.post("/credential-definitions", &body).await?;
        tracing::info!("Created credential definition for schema {}", schema_id);
        Ok(cred_def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = AgentConfig {
            admin_url: "http://agent:8031/".into(),
            ..AgentConfig::default()
        };
        assert_eq!(AgentClient::new(&config).base_url(), "http://agent:8031");
    }

    #[test]
    fn schema_payload_uses_agent_field_names() {
        let attributes = vec!["name".to_string(), "date".to_string()];
        let body = SchemaSendRequest {
            schema_name: "degree",
            schema_version: "1.0",
            attributes: &attributes,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "schema_name": "degree",
                "schema_version": "1.0",
                "attributes": ["name", "date"]
            })
        );
    }
}
