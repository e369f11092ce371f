//! Directed relationships described by two social variables.
//!
//! Each [`Relationship`] runs from an owner to one target and carries
//! `dominance` and `agreeableness`, both clamped to [-1.0, 1.0] on every
//! write. An owner holds at most one relationship per target.

use psyche_types::CharacterId;
use tracing::warn;

use crate::error::SocialError;

/// Lower bound of a social variable.
const SOCIAL_MIN: f32 = -1.0;

/// Upper bound of a social variable.
const SOCIAL_MAX: f32 = 1.0;

/// A directed relationship from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relationship {
    source: CharacterId,
    target: CharacterId,
    dominance: f32,
    agreeableness: f32,
}

impl Relationship {
    /// Create a neutral relationship.
    pub const fn new(source: CharacterId, target: CharacterId) -> Self {
        Self {
            source,
            target,
            dominance: 0.0,
            agreeableness: 0.0,
        }
    }

    /// The owning character.
    pub const fn source(&self) -> CharacterId {
        self.source
    }

    /// The character this relationship is about.
    pub const fn target(&self) -> CharacterId {
        self.target
    }

    /// How dominant the source feels over the target.
    pub const fn dominance(&self) -> f32 {
        self.dominance
    }

    /// How agreeable the source feels toward the target.
    pub const fn agreeableness(&self) -> f32 {
        self.agreeableness
    }

    /// Store dominance, clamped to [-1, 1].
    pub fn set_dominance(&mut self, value: f32) {
        self.dominance = value.clamp(SOCIAL_MIN, SOCIAL_MAX);
    }

    /// Store agreeableness, clamped to [-1, 1].
    pub fn set_agreeableness(&mut self, value: f32) {
        self.agreeableness = value.clamp(SOCIAL_MIN, SOCIAL_MAX);
    }
}

/// The outgoing relationships of one character, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipManager {
    owner: CharacterId,
    relationships: Vec<Relationship>,
}

impl RelationshipManager {
    /// Create an empty manager for `owner`.
    pub const fn new(owner: CharacterId) -> Self {
        Self {
            owner,
            relationships: Vec::new(),
        }
    }

    /// The character owning these relationships.
    pub const fn owner(&self) -> CharacterId {
        self.owner
    }

    /// Start a neutral relationship with `target`.
    pub fn add_relationship(&mut self, target: CharacterId) -> Result<(), SocialError> {
        if target == self.owner {
            warn!(owner = %self.owner, "Relationship with self rejected");
            return Err(SocialError::SelfRelationship(target));
        }
        if self.relationship(target).is_some() {
            warn!(owner = %self.owner, %target, "Relationship already exists");
            return Err(SocialError::DuplicateRelationship(target));
        }
        self.relationships
            .push(Relationship::new(self.owner, target));
        Ok(())
    }

    /// Drop the relationship with `target`.
    pub fn remove_relationship(&mut self, target: CharacterId) -> Result<Relationship, SocialError> {
        let Some(position) = self.position_of(target) else {
            warn!(owner = %self.owner, %target, "No relationship found to remove");
            return Err(SocialError::RelationshipNotFound(target));
        };
        Ok(self.relationships.remove(position))
    }

    /// The relationship with `target`, if any.
    pub fn relationship(&self, target: CharacterId) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|relationship| relationship.target == target)
    }

    /// Mutable access to the relationship with `target`.
    pub fn relationship_mut(&mut self, target: CharacterId) -> Option<&mut Relationship> {
        self.relationships
            .iter_mut()
            .find(|relationship| relationship.target == target)
    }

    /// All relationships in insertion order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Among relationships whose target is in `candidates`, the one with the
    /// highest dominance. Ties go to the earliest relationship.
    pub fn most_dominant(&self, candidates: &[CharacterId]) -> Option<&Relationship> {
        self.best_among(candidates, Relationship::dominance)
    }

    /// Among relationships whose target is in `candidates`, the one with the
    /// highest agreeableness. Ties go to the earliest relationship.
    pub fn most_agreeable(&self, candidates: &[CharacterId]) -> Option<&Relationship> {
        self.best_among(candidates, Relationship::agreeableness)
    }

    /// Remove every relationship.
    pub fn clear(&mut self) {
        self.relationships.clear();
    }

    fn position_of(&self, target: CharacterId) -> Option<usize> {
        self.relationships
            .iter()
            .position(|relationship| relationship.target == target)
    }

    fn best_among(
        &self,
        candidates: &[CharacterId],
        score: fn(&Relationship) -> f32,
    ) -> Option<&Relationship> {
        let mut best: Option<&Relationship> = None;
        for relationship in self
            .relationships
            .iter()
            .filter(|relationship| candidates.contains(&relationship.target))
        {
            if best.is_none_or(|current| score(relationship) > score(current)) {
                best = Some(relationship);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn one_relationship_per_target() {
        let owner = CharacterId::new();
        let other = CharacterId::new();
        let mut relationships = RelationshipManager::new(owner);

        assert!(relationships.add_relationship(other).is_ok());
        assert_eq!(
            relationships.add_relationship(other),
            Err(SocialError::DuplicateRelationship(other))
        );
        assert_eq!(
            relationships.add_relationship(owner),
            Err(SocialError::SelfRelationship(owner))
        );
        assert_eq!(relationships.relationships().len(), 1);
    }

    #[test]
    fn social_variables_are_clamped() {
        let mut relationship = Relationship::new(CharacterId::new(), CharacterId::new());
        relationship.set_dominance(0.6);
        relationship.set_dominance(relationship.dominance() + 0.6);
        assert!(approx(relationship.dominance(), 1.0));
        relationship.set_agreeableness(-3.0);
        assert!(approx(relationship.agreeableness(), -1.0));
    }

    #[test]
    fn remove_missing_relationship_errors() {
        let owner = CharacterId::new();
        let other = CharacterId::new();
        let mut relationships = RelationshipManager::new(owner);
        assert_eq!(
            relationships.remove_relationship(other),
            Err(SocialError::RelationshipNotFound(other))
        );
        assert!(relationships.add_relationship(other).is_ok());
        assert!(relationships.remove_relationship(other).is_ok());
        assert!(relationships.relationship(other).is_none());
    }

    #[test]
    fn most_dominant_and_agreeable_filter_by_candidates() {
        let owner = CharacterId::new();
        let a = CharacterId::new();
        let b = CharacterId::new();
        let c = CharacterId::new();
        let mut relationships = RelationshipManager::new(owner);
        for target in [a, b, c] {
            assert!(relationships.add_relationship(target).is_ok());
        }
        if let Some(rel) = relationships.relationship_mut(a) {
            rel.set_dominance(0.4);
            rel.set_agreeableness(0.9);
        }
        if let Some(rel) = relationships.relationship_mut(b) {
            rel.set_dominance(0.4);
        }
        if let Some(rel) = relationships.relationship_mut(c) {
            rel.set_dominance(0.8);
        }

        assert_eq!(
            relationships.most_dominant(&[a, b]).map(Relationship::target),
            Some(a)
        );
        assert_eq!(
            relationships.most_dominant(&[a, b, c]).map(Relationship::target),
            Some(c)
        );
        assert_eq!(
            relationships.most_agreeable(&[b, c]).map(Relationship::target),
            Some(b)
        );
        assert!(relationships.most_dominant(&[]).is_none());
    }
}
