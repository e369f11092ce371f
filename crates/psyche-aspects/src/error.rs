//! Error types for the psyche-aspects crate.
//!
//! Invalid additions (traits outside a vocabulary, duplicates, mismatched
//! model categories) are reported through [`AspectError`]. None of them
//! are fatal: the model is left unchanged and the caller may treat the
//! error as a logged no-op.

use psyche_types::{AspectKind, ModelKind};

/// Errors that can occur while building trait models, aspects, and characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AspectError {
    /// The trait name is not part of the model's core vocabulary.
    #[error("trait '{name}' is not in the core vocabulary of {model}")]
    TraitNotInVocabulary {
        /// The model the trait was added to.
        model: ModelKind,
        /// The rejected trait name.
        name: String,
    },

    /// The trait is already registered in the model.
    #[error("trait '{name}' already exists in {model}")]
    DuplicateTrait {
        /// The model the trait was added to.
        model: ModelKind,
        /// The duplicated trait name.
        name: String,
    },

    /// The parent of a sub-trait is not a registered trait of the model.
    #[error("parent trait '{parent}' not found in {model}")]
    ParentNotFound {
        /// The model the sub-trait was added to.
        model: ModelKind,
        /// The missing parent name.
        parent: String,
    },

    /// The parent already has a sub-trait with this name.
    #[error("sub-trait '{name}' already exists under '{parent}' in {model}")]
    DuplicateSubTrait {
        /// The model the sub-trait was added to.
        model: ModelKind,
        /// The parent trait name.
        parent: String,
        /// The duplicated sub-trait name.
        name: String,
    },

    /// The sub-trait name is not a declared child of the parent.
    #[error("'{name}' is not a valid sub-trait of '{parent}' in {model}")]
    InvalidSubTrait {
        /// The hierarchical model that rejected the sub-trait.
        model: ModelKind,
        /// The parent trait name.
        parent: String,
        /// The rejected sub-trait name.
        name: String,
    },

    /// A model was added to an aspect of a different category.
    #[error("{model} does not belong to the {aspect} aspect")]
    ModelCategoryMismatch {
        /// The aspect that rejected the model.
        aspect: AspectKind,
        /// The rejected model.
        model: ModelKind,
    },

    /// The aspect already holds a model of this kind.
    #[error("{aspect} aspect already contains {model}")]
    DuplicateModel {
        /// The aspect holding the model.
        aspect: AspectKind,
        /// The duplicated model.
        model: ModelKind,
    },

    /// The character already has an aspect of this kind.
    #[error("aspect '{aspect}' already exists on character '{character}'")]
    DuplicateAspect {
        /// The character's name.
        character: String,
        /// The duplicated aspect.
        aspect: AspectKind,
    },
}
