//! HTTP API for the Tyrepath catalog.
//!
//! Routes, all `GET` and all under `/api`:
//!
//! - `/api/search`: filtered, paginated search
//! - `/api/stats`: counts per group type and listing type
//! - `/api/brands`: most common brand identifiers
//! - `/api/health`: store availability
//!
//! Errors render as `{"error": "<message>"}`; invalid parameters are `400`,
//! store failures `500`.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use handlers::HealthStatus;
pub use server::{router, serve};
pub use state::ApiState;
