//! Persistence abstraction for the pipeline
//!
//! The handlers never talk to storage directly; they go through the generic
//! [`Repository`] trait, which a backend implements per entity type. The
//! module also ships [`InMemoryRepository`], a dashmap-backed implementation
//! used by tests and demo wiring, and the structured [`RepositoryError`]
//! that storage failures surface as.
//!
//! # Example
//!
//! ```rust,ignore
//! use request_pipeline::repository::{Repository, RepositoryResult};
//!
//! struct TeamRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository<Team> for TeamRepository {
//!     async fn create(&self, team: Team, cancel: CancellationToken) -> RepositoryResult<()> {
//!         tokio::select! {
//!             result = sqlx::query!("INSERT INTO teams ...").execute(&self.pool) => {
//!                 result.map(|_| ()).map_err(|e| e.into())
//!             }
//!             _ = cancel.cancelled() => {
//!                 Err(RepositoryError::cancelled(RepositoryOperation::Create))
//!             }
//!         }
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod memory;
mod traits;

// Re-export all public types
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryRepository;
pub use traits::{Repository, RepositoryResult};
