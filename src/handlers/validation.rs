//! Request validation stage
//!
//! The handlers themselves never validate: by the time dispatch reaches
//! them, the request is assumed well-formed. This module is the upstream
//! stage that enforces that assumption. A request that knows how to check
//! itself implements [`ValidateRequest`]; the `handle_*_validated` wrappers
//! run the check first and short-circuit to a `BadRequest` envelope without
//! touching the handler or the repository.
//!
//! # Example
//!
//! ```rust,ignore
//! impl ValidateRequest for PostTeam {
//!     fn validate(&self) -> Result<(), FieldErrors> {
//!         let mut errors = FieldErrors::new();
//!         if self.name.is_empty() {
//!             errors.add("name", "Name is required");
//!         }
//!         if errors.is_empty() { Ok(()) } else { Err(errors) }
//!     }
//! }
//!
//! let result = handle_validated(&handler, request, cancel).await?;
//! ```

use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::envelope::{CommandResult, FieldErrors, OperationResult};
use crate::repository::RepositoryResult;

use super::traits::{CreateHandler, UpdateHandler};

/// A request that can check its own well-formedness
pub trait ValidateRequest {
    /// Validate the request, collecting every violation
    ///
    /// Implementations should report all failures at once rather than
    /// stopping at the first.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Run validation, then dispatch to a create handler
///
/// An invalid request yields a `BadRequest` envelope carrying the field
/// errors; the handler and repository are never invoked.
pub async fn handle_validated<H>(
    handler: &H,
    request: H::Request,
    cancel: CancellationToken,
) -> RepositoryResult<OperationResult<<H::Entity as Entity>::Id>>
where
    H: CreateHandler,
    H::Request: ValidateRequest,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(error_count = errors.len(), "create request failed validation");
        return Ok(OperationResult::fail(errors.into_map()));
    }
    handler.handle(request, cancel).await
}

/// Run validation, then dispatch to an update handler
pub async fn handle_update_validated<H>(
    handler: &H,
    request: H::Request,
    cancel: CancellationToken,
) -> RepositoryResult<CommandResult>
where
    H: UpdateHandler,
    H::Request: ValidateRequest,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(error_count = errors.len(), "update request failed validation");
        return Ok(OperationResult::fail(errors.into_map()));
    }
    handler.handle(request, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::OperationStatus;
    use crate::handlers::CreateRequest;
    use crate::repository::{InMemoryRepository, Repository};

    #[derive(Debug, Clone)]
    struct Team {
        id: i64,
        name: String,
    }

    impl Entity for Team {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }
    }

    struct PostTeam {
        id: i64,
        name: String,
    }

    impl CreateRequest for PostTeam {
        type Payload = String;

        fn payload(&self) -> &String {
            &self.name
        }
    }

    impl ValidateRequest for PostTeam {
        fn validate(&self) -> Result<(), FieldErrors> {
            let mut errors = FieldErrors::new();
            if self.name.is_empty() {
                errors.add("name", "Name is required");
            }
            if self.name.len() > 50 {
                errors.add("name", "Name must be 50 characters or fewer");
            }
            if self.id <= 0 {
                errors.add("id", "Id must be positive");
            }
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors)
            }
        }
    }

    struct PostTeamHandler {
        repository: InMemoryRepository<Team>,
    }

    impl CreateHandler for PostTeamHandler {
        type Request = PostTeam;
        type Entity = Team;
        type Repo = InMemoryRepository<Team>;

        fn repository(&self) -> &Self::Repo {
            &self.repository
        }

        fn build_entity(&self, request: &PostTeam) -> Team {
            Team {
                id: request.id,
                name: request.payload().clone(),
            }
        }
    }

    #[tokio::test]
    async fn test_valid_request_reaches_handler() {
        let handler = PostTeamHandler {
            repository: InMemoryRepository::new(),
        };
        let request = PostTeam {
            id: 1,
            name: "Tigers".to_string(),
        };

        let result = handle_validated(&handler, request, CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.data(), Some(&1));
        assert_eq!(handler.repository.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_short_circuits() {
        let handler = PostTeamHandler {
            repository: InMemoryRepository::new(),
        };
        let request = PostTeam {
            id: 0,
            name: String::new(),
        };

        let result = handle_validated(&handler, request, CancellationToken::new())
            .await
            .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.status(), OperationStatus::BadRequest);
        assert_eq!(result.errors()["name"], vec!["Name is required"]);
        assert_eq!(result.errors()["id"], vec!["Id must be positive"]);
        // the repository was never touched
        assert!(handler.repository.is_empty());
    }

    #[tokio::test]
    async fn test_all_violations_reported_per_field() {
        let request = PostTeam {
            id: 1,
            name: "x".repeat(60),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);

        let request = PostTeam {
            id: -3,
            name: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
