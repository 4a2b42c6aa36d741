//! In-memory repository backed by a concurrent map
//!
//! A reference [`Repository`] implementation used by tests and demo wiring.
//! It keeps entities in a [`DashMap`] keyed by identifier, so each handler
//! invocation can run on its own task without external locking.
//!
//! # Example
//!
//! ```rust
//! use request_pipeline::entity::Entity;
//! use request_pipeline::repository::{InMemoryRepository, Repository};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Clone)]
//! struct Team { id: i64, name: String }
//!
//! impl Entity for Team {
//!     type Id = i64;
//!     fn id(&self) -> i64 { self.id }
//! }
//!
//! # tokio_test::block_on(async {
//! let repo = InMemoryRepository::new();
//! let team = Team { id: 1, name: "Tigers".to_string() };
//! repo.create(team, CancellationToken::new()).await.unwrap();
//! assert_eq!(repo.len(), 1);
//! # });
//! ```

use dashmap::{DashMap, Entry};
use tokio_util::sync::CancellationToken;

use crate::entity::Entity;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Repository, RepositoryResult};

/// Concurrent in-memory entity store
///
/// Entities are cloned on read so the map never hands out references into
/// its own shards.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    entities: DashMap<E::Id, E>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }

    /// Number of stored entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Last segment of the entity's type path, used as error context
fn entity_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + Sync,
{
    async fn create(&self, entity: E, cancel: CancellationToken) -> RepositoryResult<()> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::cancelled(RepositoryOperation::Create));
        }

        let id = entity.id();
        match self.entities.entry(id.clone()) {
            Entry::Occupied(_) => {
                Err(RepositoryError::already_exists(entity_name::<E>(), id.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(entity);
                tracing::debug!(entity_id = %id, "entity stored");
                Ok(())
            }
        }
    }

    async fn find_by_id(
        &self,
        id: &E::Id,
        cancel: CancellationToken,
    ) -> RepositoryResult<Option<E>> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::cancelled(RepositoryOperation::FindById));
        }

        Ok(self.entities.get(id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, entity: E, cancel: CancellationToken) -> RepositoryResult<()> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::cancelled(RepositoryOperation::Update));
        }

        let id = entity.id();
        match self.entities.get_mut(&id) {
            Some(mut entry) => {
                *entry = entity;
                tracing::debug!(entity_id = %id, "entity replaced");
                Ok(())
            }
            None => Err(RepositoryError::not_found(entity_name::<E>(), id.to_string())
                .with_operation(RepositoryOperation::Update)),
        }
    }
}
