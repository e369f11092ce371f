//! Decision making and per-character orchestration for the Psyche NPC
//! decision engine.
//!
//! A stimulus arrives, the [`CharacterManager`] checks whether it reaches
//! its character, looks up candidate behaviors, and hands everything to the
//! [`DecisionMaker`], which applies the stimulus effects and draws one
//! behavior weighted by personality.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `psyche-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- Reactivity gate, effect application, and weighted
//!   behavior selection.
//! - [`importance`] -- Importance and scheduling priority of a character.
//! - [`manager`] -- Per-character facade owning roles, relationships, and
//!   group memberships.
//! - [`weights`] -- Personality-driven behavior weight table.

pub mod config;
pub mod decision;
pub mod importance;
pub mod manager;
pub mod weights;

pub use config::{ConfigError, EngineConfig};
pub use decision::{AgentState, DecisionMaker, EmptyEffectsPolicy};
pub use importance::{ImportanceFactors, ImportanceState, PriorityFactors};
pub use manager::CharacterManager;
pub use weights::{PersonalityProfile, WeightTable};
