//! Repository trait definition
//!
//! This module provides the generic persistence abstraction the handlers
//! build on, using RPITIT (Return Position Impl Trait In Traits), available
//! since Rust 1.75.
//!
//! A repository owns all locking and transactional discipline around the
//! actual writes; the pipeline hands entities over and reads nothing back
//! except through `find_by_id`. Every method receives the caller's
//! [`CancellationToken`] and is expected to abort promptly when it fires.
//!
//! # Example
//!
//! ```rust,ignore
//! use request_pipeline::entity::Entity;
//! use request_pipeline::repository::{Repository, RepositoryResult};
//! use tokio_util::sync::CancellationToken;
//!
//! struct TeamRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository<Team> for TeamRepository {
//!     async fn create(&self, team: Team, cancel: CancellationToken) -> RepositoryResult<()> {
//!         // INSERT, racing the token against the query future
//!         todo!()
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::entity::Entity;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Generic persistence abstraction over a single entity type
///
/// # Type Parameters
///
/// - `E`: the entity type; its [`Entity::Id`] is the lookup key.
///
/// Implementations must support cooperative cancellation: when the token
/// fires mid-operation, return [`RepositoryError::cancelled`] rather than
/// completing the write.
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist a new entity
    ///
    /// Ownership of the entity transfers to the repository. Callers that
    /// need the identifier afterwards read it before calling.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` for duplicate identifiers, `Cancelled` when the
    /// token fires, or a storage-level kind.
    fn create(
        &self,
        entity: E,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Find an entity by its identifier
    ///
    /// Returns `Ok(None)` when the entity does not exist; `Err` is reserved
    /// for storage failures.
    fn find_by_id(
        &self,
        id: &E::Id,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    /// Replace an existing entity
    ///
    /// # Errors
    ///
    /// `NotFound` when no entity with the same identifier exists.
    fn update(
        &self,
        entity: E,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;
}
