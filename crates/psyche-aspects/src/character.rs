//! Characters: a named, positioned entity carrying aspects.

use std::collections::BTreeMap;

use psyche_types::{AspectKind, CharacterId, ModelKind, Position};
use tracing::warn;

use crate::aspect::Aspect;
use crate::error::AspectError;
use crate::model::AspectModel;

/// A character (NPC or player) with at most one aspect per [`AspectKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    id: CharacterId,
    name: String,
    /// Current world position. Updated freely by the caller.
    pub position: Position,
    aspects: BTreeMap<AspectKind, Aspect>,
}

impl Character {
    /// Create a character at the origin with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self::at(name, Position::ORIGIN)
    }

    /// Create a character at `position` with a fresh identifier.
    pub fn at(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            position,
            aspects: BTreeMap::new(),
        }
    }

    /// The character's identifier.
    pub const fn id(&self) -> CharacterId {
        self.id
    }

    /// The character's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach an aspect. A second aspect of the same kind is rejected.
    pub fn add_aspect(&mut self, aspect: Aspect) -> Result<(), AspectError> {
        let kind = aspect.kind();
        if self.aspects.contains_key(&kind) {
            let err = AspectError::DuplicateAspect {
                character: self.name.clone(),
                aspect: kind,
            };
            warn!(character = %self.name, aspect = %kind, "Aspect already exists");
            return Err(err);
        }
        self.aspects.insert(kind, aspect);
        Ok(())
    }

    /// Borrow an aspect by kind.
    pub fn aspect(&self, kind: AspectKind) -> Option<&Aspect> {
        self.aspects.get(&kind)
    }

    /// Mutably borrow an aspect by kind.
    pub fn aspect_mut(&mut self, kind: AspectKind) -> Option<&mut Aspect> {
        self.aspects.get_mut(&kind)
    }

    /// Whether an aspect of this kind is attached.
    pub fn has_aspect(&self, kind: AspectKind) -> bool {
        self.aspects.contains_key(&kind)
    }

    /// Borrow a model through the aspect of its category.
    pub fn model(&self, kind: ModelKind) -> Option<&AspectModel> {
        self.aspect(kind.category()).and_then(|aspect| aspect.model(kind))
    }

    /// Mutably borrow a model through the aspect of its category.
    pub fn model_mut(&mut self, kind: ModelKind) -> Option<&mut AspectModel> {
        self.aspect_mut(kind.category())
            .and_then(|aspect| aspect.model_mut(kind))
    }

    /// The computed value of a trait, if its model is attached.
    ///
    /// `None` means the model itself is missing; a missing trait in a
    /// present model reads as 0.
    pub fn trait_value(&self, model: ModelKind, name: &str) -> Option<f32> {
        self.model(model).map(|found| found.trait_value(name))
    }
}
