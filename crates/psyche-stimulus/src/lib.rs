//! Stimulus handling for the Psyche NPC decision engine.
//!
//! Describes social events ([`Stimulus`]), the state changes they carry
//! ([`StimulusEffect`]), the responses they invite ([`Behavior`] via the
//! [`StimulusDispatcher`]), and whether an event reaches a given character
//! ([`is_relevant`]).
//!
//! # Modules
//!
//! - [`behavior`] -- Candidate behaviors with optional role restrictions
//! - [`dispatcher`] -- Stimulus name to candidate table, built-in or from config
//! - [`effect`] -- Emotion, relationship, and goal effects with modulation
//! - [`relevance`] -- Propagation-aware relevance and attenuation
//! - [`stimulus`] -- Immutable stimulus descriptors

pub mod behavior;
pub mod dispatcher;
pub mod effect;
pub mod relevance;
pub mod stimulus;

pub use behavior::Behavior;
pub use dispatcher::{StimulusCatalogEntry, StimulusDispatcher};
pub use effect::StimulusEffect;
pub use relevance::{Relevance, is_relevant};
pub use stimulus::Stimulus;
