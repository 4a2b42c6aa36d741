//! Handler trait definitions for the command/query pipeline
//!
//! These traits are the mediation layer's stages: each one owns the linear
//! flow for a single request shape and leaves exactly the domain-specific
//! steps abstract (building an entity from a creation request, extracting an
//! identifier, mapping an entity to a response). RPITIT keeps the async
//! methods free of `async_trait`.
//!
//! Two rules hold across every handler:
//!
//! - The caller's [`CancellationToken`] is forwarded unchanged to the
//!   repository call, which is the only suspension point. The synchronous
//!   hooks never observe cancellation.
//! - Repository failures propagate as `Err(RepositoryError)`. Handlers never
//!   fold them into failure envelopes; the envelope's failure variants are
//!   reserved for validation (`BadRequest`) and missing entities
//!   (`NotFound`). Validation itself happens upstream (see
//!   [`handle_validated`](super::handle_validated)), never here.
//!
//! # Example
//!
//! ```rust
//! use request_pipeline::entity::Entity;
//! use request_pipeline::handlers::{CreateHandler, CreateRequest};
//! use request_pipeline::repository::InMemoryRepository;
//!
//! #[derive(Clone)]
//! struct Team { id: i64, name: String }
//!
//! impl Entity for Team {
//!     type Id = i64;
//!     fn id(&self) -> i64 { self.id }
//! }
//!
//! struct PostTeam { id: i64, name: String }
//!
//! impl CreateRequest for PostTeam {
//!     type Payload = String;
//!     fn payload(&self) -> &String { &self.name }
//! }
//!
//! struct PostTeamHandler {
//!     repository: InMemoryRepository<Team>,
//! }
//!
//! impl CreateHandler for PostTeamHandler {
//!     type Request = PostTeam;
//!     type Entity = Team;
//!     type Repo = InMemoryRepository<Team>;
//!
//!     fn repository(&self) -> &Self::Repo { &self.repository }
//!
//!     fn build_entity(&self, request: &PostTeam) -> Team {
//!         Team { id: request.id, name: request.payload().clone() }
//!     }
//! }
//! ```

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::envelope::{CommandResult, OperationResult};
use crate::repository::{Repository, RepositoryResult};

/// A typed creation request
///
/// Carries the caller-supplied payload a concrete handler turns into a
/// domain entity. The request type itself is what the dispatch layer routes
/// on; the payload is what [`CreateHandler::build_entity`] reads.
pub trait CreateRequest: Send + Sync {
    /// Caller-supplied data describing the entity to create
    type Payload;

    /// Borrow the request payload
    fn payload(&self) -> &Self::Payload;
}

/// Generic create-command handler
///
/// Turns a validated creation request into a persisted entity and reports
/// the new identifier. The flow is linear: build the entity through the
/// [`build_entity`](Self::build_entity) hook, read its identifier, persist
/// through the repository (the sole `await`), wrap the identifier in a
/// success envelope.
///
/// The handler performs no validation of its own; that is assumed to have
/// happened upstream before dispatch reaches it.
pub trait CreateHandler: Send + Sync {
    /// Request type this handler accepts
    type Request: CreateRequest;
    /// Entity type this handler persists
    type Entity: Entity;
    /// Repository the entity is persisted through
    type Repo: Repository<Self::Entity>;

    /// The repository backing this handler
    fn repository(&self) -> &Self::Repo;

    /// Build an in-memory entity from the request
    ///
    /// Synchronous; this is the only domain-specific step of the create
    /// flow. Implementations may allocate the entity's identifier here, for
    /// example from a counter or an id generator.
    fn build_entity(&self, request: &Self::Request) -> Self::Entity;

    /// Handle a creation request
    ///
    /// Returns a success envelope carrying the new entity's identifier.
    /// Repository failures (including cancellation) propagate as `Err`.
    fn handle(
        &self,
        request: Self::Request,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<OperationResult<<Self::Entity as Entity>::Id>>> + Send
    {
        async move {
            let entity = self.build_entity(&request);
            // Ownership of the entity moves to the repository; read the id first.
            let id = entity.id();
            tracing::debug!(entity_id = %id, "persisting new entity");
            self.repository().create(entity, cancel).await?;
            Ok(OperationResult::success(id))
        }
    }
}

/// Generic single-entity query handler
///
/// Looks up an entity by the identifier extracted from the request and maps
/// it to a response model through the [`to_response`](Self::to_response)
/// hook. A missing entity yields a not-found envelope, not an error.
pub trait GetHandler: Send + Sync {
    /// Request type this handler accepts
    type Request: Send + Sync;
    /// Entity type this handler reads
    type Entity: Entity;
    /// Response model returned to the caller
    type Response: Send;
    /// Repository the entity is read from
    type Repo: Repository<Self::Entity>;

    /// The repository backing this handler
    fn repository(&self) -> &Self::Repo;

    /// Extract the identifier of the requested entity
    fn entity_id(&self, request: &Self::Request) -> <Self::Entity as Entity>::Id;

    /// Map the stored entity to the caller-facing response model
    fn to_response(&self, entity: Self::Entity) -> Self::Response;

    /// Handle a single-entity query
    fn handle(
        &self,
        request: Self::Request,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<OperationResult<Self::Response>>> + Send {
        async move {
            let id = self.entity_id(&request);
            match self.repository().find_by_id(&id, cancel).await? {
                Some(entity) => Ok(OperationResult::success(self.to_response(entity))),
                None => {
                    tracing::debug!(entity_id = %id, "entity not found");
                    Ok(OperationResult::not_found())
                }
            }
        }
    }
}

/// Generic update-command handler
///
/// Loads the target entity, applies the request through the
/// [`apply`](Self::apply) hook, and persists the result. A missing entity
/// yields a not-found envelope; a successful update yields an empty success
/// envelope.
pub trait UpdateHandler: Send + Sync {
    /// Request type this handler accepts
    type Request: Send + Sync;
    /// Entity type this handler updates
    type Entity: Entity;
    /// Repository the entity is read from and written to
    type Repo: Repository<Self::Entity>;

    /// The repository backing this handler
    fn repository(&self) -> &Self::Repo;

    /// Extract the identifier of the entity to update
    fn entity_id(&self, request: &Self::Request) -> <Self::Entity as Entity>::Id;

    /// Apply the request to the loaded entity
    ///
    /// Synchronous and in-memory; the entity is persisted afterwards.
    fn apply(&self, request: &Self::Request, entity: &mut Self::Entity);

    /// Handle an update request
    fn handle(
        &self,
        request: Self::Request,
        cancel: CancellationToken,
    ) -> impl Future<Output = RepositoryResult<CommandResult>> + Send {
        async move {
            let id = self.entity_id(&request);
            match self.repository().find_by_id(&id, cancel.clone()).await? {
                None => {
                    tracing::debug!(entity_id = %id, "entity not found");
                    Ok(OperationResult::not_found())
                }
                Some(mut entity) => {
                    self.apply(&request, &mut entity);
                    self.repository().update(entity, cancel).await?;
                    Ok(OperationResult::success_empty())
                }
            }
        }
    }
}
