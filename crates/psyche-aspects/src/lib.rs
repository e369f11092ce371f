//! Hierarchical trait models for the Psyche NPC decision engine.
//!
//! A [`Character`] carries up to one [`Aspect`] per category (personality,
//! emotion). Each aspect holds [`AspectModel`]s, each model owns its
//! [`Trait`]s, and a trait with sub-traits derives its value from their
//! weighted sum.
//!
//! # Modules
//!
//! - [`aspect`] -- Aspect categories and their models ([`Aspect`])
//! - [`character`] -- Characters and aspect lookup ([`Character`])
//! - [`error`] -- Error types for invalid additions ([`AspectError`])
//! - [`model`] -- Trait vocabularies, flat index, MBTI poles ([`AspectModel`])
//! - [`traits`] -- Bounded traits with weighted sub-traits ([`Trait`])

pub mod aspect;
pub mod character;
pub mod error;
pub mod model;
pub mod traits;

pub use aspect::Aspect;
pub use character::Character;
pub use error::AspectError;
pub use model::{AspectModel, UNKNOWN_POLE};
pub use traits::{TRAIT_MAX, TRAIT_MIN, Trait, clamp_value};
