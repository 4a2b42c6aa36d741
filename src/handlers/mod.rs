//! Command and query handler traits
//!
//! The mediation layer's pipeline stages. Each handler trait owns the
//! linear flow for one request shape and exposes a small synchronous hook
//! for the domain-specific step:
//!
//! - [`CreateHandler`]: build entity → persist → success envelope with the
//!   new identifier
//! - [`GetHandler`]: look up → map to response, or not-found envelope
//! - [`UpdateHandler`]: look up → apply → persist, or not-found envelope
//! - [`handle_validated`] / [`handle_update_validated`]: the upstream
//!   validation stage, short-circuiting to `BadRequest` envelopes
//!
//! # Integration with axum
//!
//! The envelope implements `IntoResponse`, so a route can return the handler
//! outcome directly once the repository error is mapped:
//!
//! ```rust,ignore
//! async fn post_team(
//!     State(handler): State<Arc<PostTeamHandler>>,
//!     Json(request): Json<PostTeam>,
//! ) -> Response {
//!     match handle_validated(handler.as_ref(), request, CancellationToken::new()).await {
//!         Ok(envelope) => envelope.into_response(),
//!         Err(error) => {
//!             tracing::error!(%error, "create failed");
//!             StatusCode::INTERNAL_SERVER_ERROR.into_response()
//!         }
//!     }
//! }
//! ```

mod traits;
mod validation;

// Re-export all public types
pub use traits::{CreateHandler, CreateRequest, GetHandler, UpdateHandler};
pub use validation::{handle_update_validated, handle_validated, ValidateRequest};
