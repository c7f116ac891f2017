//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`envelope`]**: `{success, data, message, ...}` success envelope
//! - **[`errors`]**: [`AppError`] and the `{success: false, message}` error envelope
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly with API docs, health probes, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::{cors_layer_from_origins, create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, cors_layer_from_origins(None)?);
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::{ApiResponse, MessageResponse};
pub use errors::{
    AppError, ErrorCode, ErrorResponse, FieldViolation, expose_internal_errors, validation_message,
};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{
    cors_layer_from_origins, create_cors_layer, create_permissive_cors_layer, security_headers,
};
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};
