//! API request handlers
//!
//! Each handler validates its input, makes exactly one call on the agent and
//! either responds or returns the agent error for `Error::into_response`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::routes::AppState;
use crate::error::{Error, Result};

pub const INVALID_SCHEMA_DATA: &str = "Invalid schema data";
pub const SCHEMA_ID_REQUIRED: &str = "Schema ID is required";

// Request bodies

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SchemaRequest {
    /// Schema name
    pub name: String,
    /// Schema version, e.g. "1.0"
    pub version: String,
    /// Attribute names, in order
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDefinitionRequest {
    /// Ledger identifier of the schema
    pub schema_id: String,
    /// Credential definition tag (agent default when omitted)
    pub tag: Option<String>,
}

/// Schema body as received, before any field is trusted
#[derive(Debug, Default, Deserialize)]
struct RawSchemaRequest {
    name: Option<Value>,
    version: Option<Value>,
    attributes: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCredentialDefinitionRequest {
    schema_id: Option<Value>,
    tag: Option<Value>,
}

impl RawSchemaRequest {
    fn validate(self) -> Option<SchemaRequest> {
        let name = required_string(self.name)?;
        let version = required_string(self.version)?;
        let attributes = match present(self.attributes)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };

        Some(SchemaRequest {
            name,
            version,
            attributes,
        })
    }
}

impl RawCredentialDefinitionRequest {
    fn validate(self) -> Option<CredentialDefinitionRequest> {
        let schema_id = required_string(self.schema_id)?;
        // Tag type is not checked: non-string scalars go through as JSON text.
        let tag = present(self.tag).map(|tag| match tag {
            Value::String(s) => s,
            other => other.to_string(),
        });

        Some(CredentialDefinitionRequest { schema_id, tag })
    }
}

/// A field counts as present unless it is absent, null or an empty string
fn present(value: Option<Value>) -> Option<Value> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

fn required_string(value: Option<Value>) -> Option<String> {
    match present(value)? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Parse a request body leniently: empty means `{}`, non-objects carry no fields.
/// Only bytes that are not JSON at all are an error.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value: Value = serde_json::from_slice(body).map_err(Error::MalformedBody)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// Response types

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

fn invalid_input(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Get agent status
#[utoipa::path(
    get,
    path = "/api/aries/status",
    responses(
        (status = 200, description = "Agent status, as reported by the agent"),
        (status = 502, description = "Agent failed or unreachable", body = MessageResponse)
    ),
    tag = "agent"
)]
pub async fn get_status(State(state): State<AppState>) -> Result<Json<Value>> {
    let status = state.agent.get_status().await?;
    Ok(Json(status))
}

/// List agent connections
#[utoipa::path(
    get,
    path = "/api/aries/connections",
    responses(
        (status = 200, description = "Connection records, as reported by the agent"),
        (status = 502, description = "Agent failed or unreachable", body = MessageResponse)
    ),
    tag = "connections"
)]
pub async fn get_connections(State(state): State<AppState>) -> Result<Json<Value>> {
    let connections = state.agent.get_connections().await?;
    Ok(Json(connections))
}

/// Create a schema
#[utoipa::path(
    post,
    path = "/api/aries/schemas",
    request_body = SchemaRequest,
    responses(
        (status = 201, description = "Schema created"),
        (status = 400, description = "Invalid schema data", body = MessageResponse),
        (status = 502, description = "Agent failed or unreachable", body = MessageResponse)
    ),
    tag = "ledger"
)]
pub async fn create_schema(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let raw: RawSchemaRequest = parse_body(&body)?;
    let Some(req) = raw.validate() else {
        return Ok(invalid_input(INVALID_SCHEMA_DATA));
    };

    let schema = state
        .agent
        .create_schema(req.name, req.version, req.attributes)
        .await?;

    Ok((StatusCode::CREATED, Json(schema)).into_response())
}

/// Create a credential definition
#[utoipa::path(
    post,
    path = "/api/aries/credential-definitions",
    request_body = CredentialDefinitionRequest,
    responses(
        (status = 201, description = "Credential definition created"),
        (status = 400, description = "Schema ID is required", body = MessageResponse),
        (status = 502, description = "Agent failed or unreachable", body = MessageResponse)
    ),
    tag = "ledger"
)]
pub async fn create_credential_definition(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let raw: RawCredentialDefinitionRequest = parse_body(&body)?;
    let Some(req) = raw.validate() else {
        return Ok(invalid_input(SCHEMA_ID_REQUIRED));
    };

    let cred_def = state
        .agent
        .create_credential_definition(req.schema_id, req.tag)
        .await?;

    Ok((StatusCode::CREATED, Json(cred_def)).into_response())
}
