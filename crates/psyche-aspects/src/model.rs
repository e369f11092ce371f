//! Aspect models: a fixed trait vocabulary plus a flat name index.
//!
//! An [`AspectModel`] owns its top-level traits. Sub-traits live inside
//! their parent, and every trait (top-level or nested) is reachable by name
//! through a single index that maps the name to its path from the roots.
//! Top-level traits and sub-traits therefore share one namespace; adding a
//! sub-trait whose name is already indexed repoints the index at the newest
//! trait.

use std::collections::BTreeMap;

use psyche_types::{MbtiAxis, ModelKind};
use tracing::warn;

use crate::error::AspectError;
use crate::traits::{DEFAULT_WEIGHT, Trait};

/// Returned by [`AspectModel::dominant_pole`] when no pole can be determined.
pub const UNKNOWN_POLE: &str = "Unknown";

/// A trait model of one [`ModelKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct AspectModel {
    kind: ModelKind,
    /// Top-level traits in registration order.
    roots: Vec<Trait>,
    /// Trait name -> path of positions (root index, then child positions).
    index: BTreeMap<String, Vec<usize>>,
}

impl AspectModel {
    /// Create an empty model of `kind`.
    ///
    /// MBTI models start with all four axes registered at 0.
    pub fn new(kind: ModelKind) -> Self {
        let mut model = Self {
            kind,
            roots: Vec::new(),
            index: BTreeMap::new(),
        };
        if kind == ModelKind::Mbti {
            for axis in MbtiAxis::ALL {
                model.insert_root(Trait::new(axis.code(), 0.0, DEFAULT_WEIGHT));
            }
        }
        model
    }

    /// The model variant.
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The model's canonical name.
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The core vocabulary this model accepts for top-level traits.
    pub const fn core_traits(&self) -> &'static [&'static str] {
        self.kind.core_traits()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a top-level trait from the core vocabulary.
    ///
    /// `initial` defaults to 0 and is clamped to [-1, 1].
    pub fn add_trait(&mut self, name: &str, initial: Option<f32>) -> Result<(), AspectError> {
        if !self.kind.is_core_trait(name) {
            return self.reject(AspectError::TraitNotInVocabulary {
                model: self.kind,
                name: String::from(name),
            });
        }
        if self.index.contains_key(name) {
            return self.reject(AspectError::DuplicateTrait {
                model: self.kind,
                name: String::from(name),
            });
        }
        self.insert_root(Trait::new(name, initial.unwrap_or(0.0), DEFAULT_WEIGHT));
        Ok(())
    }

    /// Attach a weighted sub-trait beneath an already registered trait.
    ///
    /// The parent may itself be a sub-trait. Hierarchical models (Parrott)
    /// only accept declared children of the parent.
    pub fn add_sub_trait(
        &mut self,
        parent: &str,
        name: &str,
        weight: f32,
        initial: Option<f32>,
    ) -> Result<(), AspectError> {
        let Some(parent_path) = self.index.get(parent).cloned() else {
            return self.reject(AspectError::ParentNotFound {
                model: self.kind,
                parent: String::from(parent),
            });
        };
        if !self.kind.allows_sub_trait(parent, name) {
            return self.reject(AspectError::InvalidSubTrait {
                model: self.kind,
                parent: String::from(parent),
                name: String::from(name),
            });
        }

        let sub_trait = Trait::new(name, initial.unwrap_or(0.0), weight);
        let position = self
            .resolve_mut(&parent_path)
            .and_then(|parent_trait| parent_trait.push_sub_trait(sub_trait));
        let Some(position) = position else {
            return self.reject(AspectError::DuplicateSubTrait {
                model: self.kind,
                parent: String::from(parent),
                name: String::from(name),
            });
        };

        let mut path = parent_path;
        path.push(position);
        self.index.insert(String::from(name), path);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Values
    // -----------------------------------------------------------------------

    /// Store a value on a trait, clamped to [-1, 1]. Missing traits are ignored.
    pub fn set_trait_value(&mut self, name: &str, value: f32) {
        if let Some(found) = self.trait_mut(name) {
            found.set_value(value);
        }
    }

    /// Shift a trait by `delta` relative to its computed value.
    pub fn modify_trait(&mut self, name: &str, delta: f32) {
        let model = self.kind;
        match self.trait_mut(name) {
            Some(found) => {
                let updated = found.compute_value() + delta;
                found.set_value(updated);
            }
            None => warn!(%model, name, "Trait not found, modification skipped"),
        }
    }

    /// The computed value of a trait, or 0 if it is not registered.
    pub fn trait_value(&self, name: &str) -> f32 {
        self.get_trait(name).map_or(0.0, Trait::compute_value)
    }

    /// Look up a registered trait (top-level or nested) by name.
    pub fn get_trait(&self, name: &str) -> Option<&Trait> {
        self.index.get(name).and_then(|path| self.resolve(path))
    }

    /// Whether a trait with this name is registered.
    pub fn has_trait(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every registered trait name, sorted.
    pub fn trait_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// The pole an MBTI axis currently leans toward.
    ///
    /// Returns [`UNKNOWN_POLE`] for non-MBTI models, unknown axis codes, and
    /// axes that are not registered.
    pub fn dominant_pole(&self, axis_code: &str) -> &'static str {
        if self.kind != ModelKind::Mbti {
            return UNKNOWN_POLE;
        }
        let Some(axis) = MbtiAxis::from_code(axis_code) else {
            return UNKNOWN_POLE;
        };
        self.get_trait(axis_code)
            .map_or(UNKNOWN_POLE, |found| axis.pole_for(found.compute_value()))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn insert_root(&mut self, root: Trait) {
        let position = self.roots.len();
        self.index.insert(String::from(root.name()), vec![position]);
        self.roots.push(root);
    }

    fn trait_mut(&mut self, name: &str) -> Option<&mut Trait> {
        let path = self.index.get(name)?.clone();
        self.resolve_mut(&path)
    }

    fn resolve(&self, path: &[usize]) -> Option<&Trait> {
        let (first, rest) = path.split_first()?;
        let mut current = self.roots.get(*first)?;
        for position in rest {
            current = current.child(*position)?;
        }
        Some(current)
    }

    fn resolve_mut(&mut self, path: &[usize]) -> Option<&mut Trait> {
        let (first, rest) = path.split_first()?;
        let mut current = self.roots.get_mut(*first)?;
        for position in rest {
            current = current.child_mut(*position)?;
        }
        Some(current)
    }

    fn reject(&self, err: AspectError) -> Result<(), AspectError> {
        warn!(model = %self.kind, %err, "Trait registration rejected");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn add_trait_outside_vocabulary_fails() {
        let mut ffm = AspectModel::new(ModelKind::Ffm);
        let result = ffm.add_trait("Charisma", Some(0.5));
        assert!(matches!(result, Err(AspectError::TraitNotInVocabulary { .. })));
        assert!(!ffm.has_trait("Charisma"));
        assert!(approx(ffm.trait_value("Charisma"), 0.0));
    }

    #[test]
    fn add_trait_clamps_and_rejects_duplicates() {
        let mut ffm = AspectModel::new(ModelKind::Ffm);
        assert!(ffm.add_trait("Openness", Some(4.0)).is_ok());
        assert!(approx(ffm.trait_value("Openness"), 1.0));
        assert!(matches!(
            ffm.add_trait("Openness", Some(0.1)),
            Err(AspectError::DuplicateTrait { .. })
        ));
        assert!(approx(ffm.trait_value("Openness"), 1.0));
    }

    #[test]
    fn mbti_axes_are_preregistered() {
        let mut mbti = AspectModel::new(ModelKind::Mbti);
        for axis in MbtiAxis::ALL {
            assert!(mbti.has_trait(axis.code()));
        }
        mbti.set_trait_value("EI", 0.4);
        assert_eq!(mbti.dominant_pole("EI"), "Extraversion");
        mbti.set_trait_value("EI", -0.2);
        assert_eq!(mbti.dominant_pole("EI"), "Introversion");
        assert_eq!(mbti.dominant_pole("XY"), UNKNOWN_POLE);
    }

    #[test]
    fn dominant_pole_unknown_for_other_models() {
        let ffm = AspectModel::new(ModelKind::Ffm);
        assert_eq!(ffm.dominant_pole("EI"), UNKNOWN_POLE);
    }

    #[test]
    fn sub_traits_drive_parent_value() {
        let mut ffm = AspectModel::new(ModelKind::Ffm);
        assert!(ffm.add_trait("Extraversion", None).is_ok());
        assert!(ffm.add_sub_trait("Extraversion", "Confident", 0.7, Some(0.3)).is_ok());
        assert!(ffm.add_sub_trait("Extraversion", "Outgoing", 0.8, Some(0.6)).is_ok());
        assert!(ffm.add_sub_trait("Extraversion", "Independent", 0.9, Some(0.1)).is_ok());
        assert!(approx(ffm.trait_value("Extraversion"), 0.78));

        // Sub-traits are indexed by name.
        assert!(approx(ffm.trait_value("Outgoing"), 0.6));
        ffm.set_trait_value("Outgoing", 0.0);
        assert!(approx(ffm.trait_value("Extraversion"), 0.3));
    }

    #[test]
    fn mbti_negative_sub_traits() {
        let mut mbti = AspectModel::new(ModelKind::Mbti);
        assert!(mbti.add_sub_trait("EI", "Open", 0.5, Some(-0.1)).is_ok());
        assert!(mbti.add_sub_trait("EI", "Confident", 0.7, Some(-0.4)).is_ok());
        assert!(mbti.add_sub_trait("EI", "Outgoing", 0.8, Some(-0.5)).is_ok());
        assert!(approx(mbti.trait_value("EI"), -0.73));
        assert_eq!(mbti.dominant_pole("EI"), "Introversion");
    }

    #[test]
    fn sub_trait_requires_registered_parent() {
        let mut ekman = AspectModel::new(ModelKind::Ekman);
        assert!(matches!(
            ekman.add_sub_trait("Sadness", "Gloom", 0.5, None),
            Err(AspectError::ParentNotFound { .. })
        ));
        assert!(!ekman.has_trait("Gloom"));
    }

    #[test]
    fn duplicate_sub_trait_is_rejected() {
        let mut ekman = AspectModel::new(ModelKind::Ekman);
        assert!(ekman.add_trait("Sadness", None).is_ok());
        assert!(ekman.add_sub_trait("Sadness", "Gloom", 0.5, Some(-0.4)).is_ok());
        assert!(matches!(
            ekman.add_sub_trait("Sadness", "Gloom", 0.5, Some(0.9)),
            Err(AspectError::DuplicateSubTrait { .. })
        ));
        assert!(approx(ekman.trait_value("Gloom"), -0.4));
    }

    #[test]
    fn parrott_validates_hierarchy() {
        let mut parrott = AspectModel::new(ModelKind::Parrott);
        assert!(parrott.add_trait("Joy", None).is_ok());
        assert!(matches!(
            parrott.add_sub_trait("Joy", "InvalidSubEmotion", 0.5, None),
            Err(AspectError::InvalidSubTrait { .. })
        ));
        assert!(!parrott.has_trait("InvalidSubEmotion"));
        assert!(parrott.add_sub_trait("Joy", "Cheerfulness", 0.8, Some(0.5)).is_ok());
        assert!(parrott.has_trait("Cheerfulness"));
    }

    #[test]
    fn parrott_tertiary_propagates_to_primary() {
        let mut parrott = AspectModel::new(ModelKind::Parrott);
        assert!(parrott.add_trait("Joy", None).is_ok());
        assert!(parrott.add_sub_trait("Joy", "Cheerfulness", 0.8, None).is_ok());
        assert!(
            parrott
                .add_sub_trait("Cheerfulness", "Happiness", 1.0, Some(0.95))
                .is_ok()
        );
        assert!(approx(parrott.trait_value("Joy"), 0.76));
    }

    #[test]
    fn modify_trait_shifts_computed_value() {
        let mut ekman = AspectModel::new(ModelKind::Ekman);
        assert!(ekman.add_trait("Joy", Some(0.2)).is_ok());
        ekman.modify_trait("Joy", 0.5);
        assert!(approx(ekman.trait_value("Joy"), 0.7));
        ekman.modify_trait("Joy", 0.9);
        assert!(approx(ekman.trait_value("Joy"), 1.0));

        // Missing trait is a no-op.
        ekman.modify_trait("Fear", 0.3);
        assert!(!ekman.has_trait("Fear"));
    }

    #[test]
    fn trait_names_cover_nested_traits() {
        let mut ekman = AspectModel::new(ModelKind::Ekman);
        assert!(ekman.add_trait("Sadness", None).is_ok());
        assert!(ekman.add_sub_trait("Sadness", "Gloom", 0.5, None).is_ok());
        let names: Vec<&str> = ekman.trait_names().collect();
        assert_eq!(names, vec!["Gloom", "Sadness"]);
    }
}
