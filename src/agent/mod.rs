//! Access to the external Aries agent

mod client;

pub use client::AgentClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Operations the REST layer needs from an Aries agent.
///
/// Results are the agent's JSON replies, passed through without reshaping.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Agent status (version, label, conductor state)
    async fn get_status(&self) -> Result<Value>;

    /// All connection records known to the agent
    async fn get_connections(&self) -> Result<Value>;

    /// Publish a schema to the ledger
    async fn create_schema(
        &self,
        name: String,
        version: String,
        attributes: Vec<String>,
    ) -> Result<Value>;

    /// Publish a credential definition for an existing schema
    async fn create_credential_definition(
        &self,
        schema_id: String,
        tag: Option<String>,
    ) -> Result<Value>;
}
