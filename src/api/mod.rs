//! HTTP API layer

mod routes;
mod handlers;

pub use handlers::{
    CredentialDefinitionRequest, MessageResponse, SchemaRequest, INVALID_SCHEMA_DATA,
    SCHEMA_ID_REQUIRED,
};
pub use routes::{create_router, ApiDoc, AppState};
