//! Shared type definitions for the Psyche NPC decision engine.
//!
//! This crate is the single source of truth for identifiers and closed
//! vocabularies used across the workspace.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for characters, roles, and groups
//! - [`enums`] -- Aspect/model kinds, stimulus flags, propagation, behaviors
//! - [`position`] -- World-space positions and distances
//! - [`vocabulary`] -- Core trait vocabularies and the Parrott hierarchy

pub mod enums;
pub mod ids;
pub mod position;
pub mod vocabulary;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AffectedSystem, AspectKind, BehaviorKind, ModelKind, Propagation, StimulusType, StimulusTypes,
};
pub use ids::{CharacterId, GroupId, RoleId};
pub use position::Position;
pub use vocabulary::{EkmanEmotion, FfmTrait, MbtiAxis};
