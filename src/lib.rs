//! # request-pipeline
//!
//! Typed request mediation for CRUD backends: route command and query
//! objects to generic handlers, execute them against a repository
//! abstraction, and report the outcome as a uniform, HTTP-shaped envelope.
//!
//! ## Pieces
//!
//! - **Envelope** ([`envelope`]): [`OperationResult`](envelope::OperationResult),
//!   the immutable success / validation-failure / not-found outcome type,
//!   with an `IntoResponse` impl mapping OK→200, BadRequest→400 (serialized
//!   error map), NotFound→404
//! - **Handlers** ([`handlers`]): generic create/get/update pipeline stages
//!   with single-method domain hooks, plus the upstream validation stage
//! - **Repository** ([`repository`]): the persistence seam the handlers call
//!   through, with a structured error type and an in-memory implementation
//! - **Entity** ([`entity`]): the minimal contract a domain type needs to
//!   flow through the pipeline
//!
//! Error-shape rule: validation failures and missing entities are data
//! (envelopes); persistence failures are errors (`Err(RepositoryError)`)
//! and propagate to the surrounding layer untranslated.
//!
//! ## Example
//!
//! ```rust
//! use request_pipeline::prelude::*;
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
//! struct PostTeamHandler { repository: InMemoryRepository<Team> }
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
//!
//! # tokio_test::block_on(async {
//! let handler = PostTeamHandler { repository: InMemoryRepository::new() };
//! let request = PostTeam { id: 42, name: "Tigers".to_string() };
//!
//! let result = handler.handle(request, CancellationToken::new()).await.unwrap();
//! assert!(result.is_success());
//! assert_eq!(result.data(), Some(&42));
//! # });
//! ```

pub mod entity;
pub mod envelope;
pub mod handlers;
pub mod repository;

/// Commonly used types, re-exported for glob import
pub mod prelude {
    pub use crate::entity::{Entity, EntityId};
    pub use crate::envelope::{
        CommandResult, ErrorMap, FieldErrors, OperationResult, OperationStatus,
    };
    pub use crate::handlers::{
        handle_update_validated, handle_validated, CreateHandler, CreateRequest, GetHandler,
        UpdateHandler, ValidateRequest,
    };
    pub use crate::repository::{
        InMemoryRepository, Repository, RepositoryError, RepositoryErrorKind, RepositoryOperation,
        RepositoryResult,
    };
    pub use tokio_util::sync::CancellationToken;
}
