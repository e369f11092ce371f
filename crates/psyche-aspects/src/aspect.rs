//! Aspects group the models of one category (personality or emotion).

use std::collections::BTreeMap;

use psyche_types::{AspectKind, ModelKind};
use tracing::warn;

use crate::error::AspectError;
use crate::model::AspectModel;

/// A category of a character's inner state holding one model per variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Aspect {
    kind: AspectKind,
    models: BTreeMap<ModelKind, AspectModel>,
}

impl Aspect {
    /// Create an aspect with no models.
    pub const fn new(kind: AspectKind) -> Self {
        Self {
            kind,
            models: BTreeMap::new(),
        }
    }

    /// Create an aspect and add every model in `models`.
    ///
    /// Models of the wrong category or duplicated variants are skipped with
    /// a warning.
    pub fn with_models(kind: AspectKind, models: impl IntoIterator<Item = AspectModel>) -> Self {
        let mut aspect = Self::new(kind);
        for model in models {
            // Rejections are already logged.
            let _ = aspect.add_model(model);
        }
        aspect
    }

    /// A personality aspect with empty FFM and MBTI models.
    pub fn personality() -> Self {
        Self::with_models(
            AspectKind::Personality,
            [AspectModel::new(ModelKind::Ffm), AspectModel::new(ModelKind::Mbti)],
        )
    }

    /// An emotion aspect with an empty model of the given variant.
    pub fn emotion(model: ModelKind) -> Self {
        Self::with_models(AspectKind::Emotion, [AspectModel::new(model)])
    }

    /// The aspect category.
    pub const fn kind(&self) -> AspectKind {
        self.kind
    }

    /// Add a model. It must belong to this aspect's category and its
    /// variant must not already be present.
    pub fn add_model(&mut self, model: AspectModel) -> Result<(), AspectError> {
        let model_kind = model.kind();
        let err = if model_kind.category() != self.kind {
            AspectError::ModelCategoryMismatch {
                aspect: self.kind,
                model: model_kind,
            }
        } else if self.models.contains_key(&model_kind) {
            AspectError::DuplicateModel {
                aspect: self.kind,
                model: model_kind,
            }
        } else {
            self.models.insert(model_kind, model);
            return Ok(());
        };
        warn!(aspect = %self.kind, model = %model_kind, %err, "Model rejected");
        Err(err)
    }

    /// Whether a model of this variant is present.
    pub fn has_model(&self, kind: ModelKind) -> bool {
        self.models.contains_key(&kind)
    }

    /// Borrow a model by variant.
    pub fn model(&self, kind: ModelKind) -> Option<&AspectModel> {
        self.models.get(&kind)
    }

    /// Mutably borrow a model by variant.
    pub fn model_mut(&mut self, kind: ModelKind) -> Option<&mut AspectModel> {
        self.models.get_mut(&kind)
    }

    /// Every model held by this aspect.
    pub fn models(&self) -> impl Iterator<Item = &AspectModel> {
        self.models.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personality_holds_ffm_and_mbti() {
        let aspect = Aspect::personality();
        assert_eq!(aspect.kind(), AspectKind::Personality);
        assert!(aspect.has_model(ModelKind::Ffm));
        assert!(aspect.has_model(ModelKind::Mbti));
        assert_eq!(aspect.models().count(), 2);
    }

    #[test]
    fn category_mismatch_is_rejected() {
        let mut aspect = Aspect::new(AspectKind::Emotion);
        let result = aspect.add_model(AspectModel::new(ModelKind::Ffm));
        assert!(matches!(result, Err(AspectError::ModelCategoryMismatch { .. })));
        assert!(!aspect.has_model(ModelKind::Ffm));
    }

    #[test]
    fn duplicate_model_keeps_original() {
        let mut ekman = AspectModel::new(ModelKind::Ekman);
        assert!(ekman.add_trait("Joy", Some(0.3)).is_ok());
        let mut aspect = Aspect::new(AspectKind::Emotion);
        assert!(aspect.add_model(ekman).is_ok());
        assert!(matches!(
            aspect.add_model(AspectModel::new(ModelKind::Ekman)),
            Err(AspectError::DuplicateModel { .. })
        ));
        assert!(
            aspect
                .model(ModelKind::Ekman)
                .is_some_and(|model| model.has_trait("Joy"))
        );
    }

    #[test]
    fn with_models_skips_foreign_models() {
        let aspect = Aspect::with_models(
            AspectKind::Emotion,
            [
                AspectModel::new(ModelKind::Parrott),
                AspectModel::new(ModelKind::Mbti),
            ],
        );
        assert!(aspect.has_model(ModelKind::Parrott));
        assert!(!aspect.has_model(ModelKind::Mbti));
    }
}
