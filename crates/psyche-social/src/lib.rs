//! Social state for the Psyche NPC decision engine.
//!
//! Everything here is owner-scoped bookkeeping keyed by identifiers from
//! `psyche-types`: the roles a character plays, how it relates to other
//! characters, and which named groups it belongs to.
//!
//! # Modules
//!
//! - [`error`] -- Error types for social bookkeeping ([`SocialError`])
//! - [`group`] -- Groups, the shared registry, and per-character membership
//! - [`relationship`] -- Dominance/agreeableness relationships ([`RelationshipManager`])
//! - [`role`] -- Roles with goals, actions, and importance ([`RoleManager`])

pub mod error;
pub mod group;
pub mod relationship;
pub mod role;

pub use error::SocialError;
pub use group::{Group, GroupMembership, GroupRegistry};
pub use relationship::{Relationship, RelationshipManager};
pub use role::{Role, RoleAction, RoleGoal, RoleManager};
