//! Error types for the psyche-social crate.
//!
//! Social bookkeeping never fails hard: duplicates and missing entries are
//! reported as [`SocialError`] values and logged, leaving state unchanged.

use psyche_types::{CharacterId, GroupId, RoleId};

/// Errors that can occur while managing roles, relationships, and groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocialError {
    /// The role is already held by this manager.
    #[error("role '{name}' ({id}) already exists")]
    DuplicateRole {
        /// The duplicated role's identifier.
        id: RoleId,
        /// The duplicated role's name.
        name: String,
    },

    /// A relationship with this target already exists.
    #[error("relationship with {0} already exists")]
    DuplicateRelationship(CharacterId),

    /// A character cannot hold a relationship with itself.
    #[error("character {0} cannot relate to itself")]
    SelfRelationship(CharacterId),

    /// No relationship with this target exists.
    #[error("no relationship with {0}")]
    RelationshipNotFound(CharacterId),

    /// No group with this identifier is registered.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// A group with this name is already registered.
    #[error("duplicate group name: {0}")]
    DuplicateGroupName(String),
}
