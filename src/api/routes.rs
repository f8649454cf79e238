//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, CredentialDefinitionRequest, HealthResponse, MessageResponse, SchemaRequest,
};
use crate::agent::AgentService;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aries Bridge API",
        version = "0.1.0",
        description = "REST front for a Hyperledger Aries agent's admin operations"
    ),
    tags(
        (name = "agent", description = "Agent status"),
        (name = "connections", description = "DIDComm connections"),
        (name = "ledger", description = "Schemas and credential definitions"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::get_status,
        handlers::get_connections,
        handlers::create_schema,
        handlers::create_credential_definition,
    ),
    components(schemas(
        SchemaRequest,
        CredentialDefinitionRequest,
        MessageResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn AgentService>,
}

impl AppState {
    pub fn new(agent: Arc<dyn AgentService>) -> Self {
        Self { agent }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Agent
        .route("/api/aries/status", get(handlers::get_status))
        .route("/api/aries/connections", get(handlers::get_connections))

        // Ledger objects
        .route("/api/aries/schemas", post(handlers::create_schema))
        .route(
            "/api/aries/credential-definitions",
            post(handlers::create_credential_definition),
        )

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
