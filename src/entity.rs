//! Entity and identifier abstractions
//!
//! The pipeline only needs two things from a domain type: a stable
//! identifier that behaves like a value (orderable, hashable, cloneable,
//! printable), and a way to read that identifier before ownership of the
//! entity transfers to the repository.
//!
//! # Example
//!
//! ```rust
//! use request_pipeline::entity::Entity;
//!
//! struct Team {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Entity for Team {
//!     type Id = i64;
//!
//!     fn id(&self) -> i64 {
//!         self.id
//!     }
//! }
//! ```

use std::fmt;
use std::hash::Hash;

/// Capability bound for entity identifiers
///
/// Expresses "any orderable, hashable, printable identifier type" as a
/// single bound. Blanket-implemented, so `i64`, `String`, `Uuid` and
/// similar newtypes qualify without any explicit impl.
pub trait EntityId:
    Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<T> EntityId for T where
    T: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// A domain entity with a readable identifier
///
/// `id` returns an owned value: the handler captures the identifier before
/// handing the entity to the repository, which takes ownership on create.
pub trait Entity: Send {
    /// Identifier type
    type Id: EntityId;

    /// Read the entity's identifier
    fn id(&self) -> Self::Id;
}
