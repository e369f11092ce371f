//! Per-character facade over the decision pipeline.
//!
//! A [`CharacterManager`] owns one character together with its roles,
//! relationships, group memberships, decision maker, and optional
//! importance state. The [`GroupRegistry`] is shared between characters
//! and passed in by the caller.

use psyche_aspects::Character;
use psyche_social::{GroupMembership, GroupRegistry, RelationshipManager, RoleManager};
use psyche_stimulus::{Behavior, Stimulus, StimulusDispatcher, StimulusEffect, is_relevant};
use rand::Rng;
use tracing::debug;

use crate::decision::{AgentState, DecisionMaker};
use crate::importance::ImportanceState;

/// One character and everything it needs to decide.
#[derive(Debug, Clone)]
pub struct CharacterManager {
    character: Character,
    roles: RoleManager,
    relationships: RelationshipManager,
    membership: GroupMembership,
    decision: DecisionMaker,
    importance: Option<ImportanceState>,
}

impl CharacterManager {
    /// A manager for a fresh character with no aspects, roles, or groups.
    pub fn new(name: impl Into<String>, decision: DecisionMaker) -> Self {
        Self::from_character(Character::new(name), decision)
    }

    /// Wrap an existing character.
    pub const fn from_character(character: Character, decision: DecisionMaker) -> Self {
        let owner = character.id();
        Self {
            character,
            roles: RoleManager::new(owner),
            relationships: RelationshipManager::new(owner),
            membership: GroupMembership::new(owner),
            decision,
            importance: None,
        }
    }

    /// The managed character.
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// The managed character, mutably.
    pub const fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// The character's roles.
    pub const fn roles(&self) -> &RoleManager {
        &self.roles
    }

    /// The character's roles, mutably.
    pub const fn roles_mut(&mut self) -> &mut RoleManager {
        &mut self.roles
    }

    /// The character's relationships.
    pub const fn relationships(&self) -> &RelationshipManager {
        &self.relationships
    }

    /// The character's relationships, mutably.
    pub const fn relationships_mut(&mut self) -> &mut RelationshipManager {
        &mut self.relationships
    }

    /// The character's group memberships.
    pub const fn membership(&self) -> &GroupMembership {
        &self.membership
    }

    /// The character's group memberships, mutably.
    pub const fn membership_mut(&mut self) -> &mut GroupMembership {
        &mut self.membership
    }

    /// The decision maker.
    pub const fn decision_maker(&self) -> &DecisionMaker {
        &self.decision
    }

    /// Attach or replace the importance state.
    pub const fn set_importance(&mut self, state: ImportanceState) {
        self.importance = Some(state);
    }

    /// The importance state, if one is attached.
    pub const fn importance_state(&self) -> Option<&ImportanceState> {
        self.importance.as_ref()
    }

    /// The importance state, mutably.
    pub const fn importance_state_mut(&mut self) -> Option<&mut ImportanceState> {
        self.importance.as_mut()
    }

    /// Overall importance, 0 without an importance state.
    pub fn importance(&self) -> f32 {
        self.importance
            .as_ref()
            .map_or(0.0, ImportanceState::overall_importance)
    }

    /// Scheduling priority, 0 without an importance state.
    pub fn priority(&self) -> f32 {
        self.importance.as_ref().map_or(0.0, ImportanceState::priority)
    }

    /// Apply a stimulus that already passed relevance filtering and pick a
    /// behavior from `candidates`.
    pub fn process_stimulus<'c>(
        &mut self,
        stimulus: &Stimulus,
        effects: &[StimulusEffect],
        candidates: &'c [Behavior],
        remaining_magnitude: f32,
        groups: &GroupRegistry,
        rng: &mut impl Rng,
    ) -> Option<&'c Behavior> {
        let agent = AgentState {
            character: &mut self.character,
            roles: &mut self.roles,
            relationships: &mut self.relationships,
            groups,
        };
        self.decision
            .process_stimulus(agent, stimulus, effects, candidates, remaining_magnitude, rng)
    }

    /// Full pipeline: relevance check, candidate lookup, then
    /// [`Self::process_stimulus`] with the attenuated magnitude.
    pub fn react_to<'d>(
        &mut self,
        stimulus: &Stimulus,
        effects: &[StimulusEffect],
        dispatcher: &'d StimulusDispatcher,
        groups: &GroupRegistry,
        rng: &mut impl Rng,
    ) -> Option<&'d Behavior> {
        let relevance = is_relevant(stimulus, &self.character, &self.membership, groups);
        if !relevance.relevant {
            debug!(
                character = self.character.name(),
                stimulus = stimulus.name(),
                "Stimulus not relevant"
            );
            return None;
        }
        let candidates = dispatcher.candidates(stimulus);
        self.process_stimulus(
            stimulus,
            effects,
            candidates,
            relevance.remaining_magnitude,
            groups,
            rng,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use psyche_aspects::Aspect;
    use psyche_types::{AffectedSystem, ModelKind, Position, Propagation, StimulusType};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::importance::{ImportanceFactors, PriorityFactors};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn npc() -> CharacterManager {
        let mut character = Character::at("Guard", Position::ORIGIN);
        character.add_aspect(Aspect::personality()).unwrap();
        character.add_aspect(Aspect::emotion(ModelKind::Ekman)).unwrap();
        character
            .model_mut(ModelKind::Ekman)
            .unwrap()
            .add_trait("Fear", Some(0.0))
            .unwrap();
        CharacterManager::from_character(character, DecisionMaker::default())
    }

    #[test]
    fn importance_defaults_to_zero() {
        let mut manager = npc();
        assert!(approx(manager.importance(), 0.0));
        assert!(approx(manager.priority(), 0.0));

        let factors = ImportanceFactors {
            player_focus: 1.0,
            designer_importance: 1.0,
            ..ImportanceFactors::default()
        };
        manager.set_importance(ImportanceState::new(factors, PriorityFactors::default()));
        assert!(approx(manager.importance(), 0.5));
        assert!(approx(manager.priority(), 0.5));
    }

    #[test]
    fn react_to_attenuates_local_stimuli() {
        let mut manager = npc();
        manager.character_mut().position = Position::new(5.0, 0.0, 0.0);
        let groups = GroupRegistry::new();
        let dispatcher = StimulusDispatcher::builtin();
        let scream = Stimulus::new(
            "DistressObserved",
            StimulusType::Emotional,
            1.0,
            "Villager",
            Propagation::Local,
        )
        .with_falloff(10.0);
        let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Fear", 0.4)];
        let mut rng = SmallRng::seed_from_u64(42);

        let chosen = manager.react_to(&scream, &effects, &dispatcher, &groups, &mut rng);
        // Comfort is role-restricted; the guard has no role.
        assert!(chosen.is_some_and(|behavior| behavior.name() != "Comfort"));
        let fear = manager.character().trait_value(ModelKind::Ekman, "Fear").unwrap();
        assert!(approx(fear, 0.2));
    }

    #[test]
    fn react_to_skips_out_of_range_stimuli() {
        let mut manager = npc();
        manager.character_mut().position = Position::new(50.0, 0.0, 0.0);
        let groups = GroupRegistry::new();
        let dispatcher = StimulusDispatcher::builtin();
        let scream = Stimulus::new(
            "DistressObserved",
            StimulusType::Emotional,
            1.0,
            "Villager",
            Propagation::Local,
        )
        .with_falloff(10.0);
        let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Fear", 0.4)];
        let mut rng = SmallRng::seed_from_u64(42);

        assert!(manager.react_to(&scream, &effects, &dispatcher, &groups, &mut rng).is_none());
        let fear = manager.character().trait_value(ModelKind::Ekman, "Fear").unwrap();
        assert!(approx(fear, 0.0));
    }

    #[test]
    fn unknown_stimulus_applies_effects_but_selects_nothing() {
        let mut manager = npc();
        let groups = GroupRegistry::new();
        let dispatcher = StimulusDispatcher::builtin();
        let thunder = Stimulus::new("Thunder", StimulusType::Emotional, 0.5, "Sky", Propagation::Direct);
        let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Fear", 0.4)];
        let mut rng = SmallRng::seed_from_u64(42);

        assert!(manager.react_to(&thunder, &effects, &dispatcher, &groups, &mut rng).is_none());
        let fear = manager.character().trait_value(ModelKind::Ekman, "Fear").unwrap();
        assert!(approx(fear, 0.2));
    }
}
