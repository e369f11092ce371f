//! Stimulus effects: declarative rules for how a stimulus changes state.

use psyche_types::{AffectedSystem, CharacterId, GroupId};

/// A rule describing what a stimulus modifies and by how much.
///
/// The effective amount is `remaining * base * (1 + strength * m)` where
/// `m` is the receiving character's FFM modulator trait clamped to [0, 1],
/// or the modulation term is dropped entirely when no modulator is set.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusEffect {
    affected_system: AffectedSystem,
    affected_trait: String,
    base_magnitude: f32,
    personality_modulator: Option<String>,
    modulation_strength: f32,
    target_character: Option<CharacterId>,
    target_group: Option<GroupId>,
    affected_goal: Option<String>,
}

impl StimulusEffect {
    /// Create an unmodulated, untargeted effect.
    ///
    /// `affected_trait` names an emotion trait, a social variable
    /// (`"Dominance"` / `"Agreeableness"`), or a goal description, depending
    /// on `affected_system`.
    pub fn new(
        affected_system: AffectedSystem,
        affected_trait: impl Into<String>,
        base_magnitude: f32,
    ) -> Self {
        Self {
            affected_system,
            affected_trait: affected_trait.into(),
            base_magnitude,
            personality_modulator: None,
            modulation_strength: 0.0,
            target_character: None,
            target_group: None,
            affected_goal: None,
        }
    }

    /// Builder-style: scale the effect by an FFM trait of the receiver.
    #[must_use]
    pub fn modulated_by(mut self, ffm_trait: impl Into<String>, strength: f32) -> Self {
        self.personality_modulator = Some(ffm_trait.into());
        self.modulation_strength = strength;
        self
    }

    /// Builder-style: aim a relationship effect at one character.
    #[must_use]
    pub const fn toward_character(mut self, target: CharacterId) -> Self {
        self.target_character = Some(target);
        self
    }

    /// Builder-style: aim a relationship effect at every member of a group.
    #[must_use]
    pub const fn toward_group(mut self, target: GroupId) -> Self {
        self.target_group = Some(target);
        self
    }

    /// Builder-style: record the goal this effect is about. Informational only.
    #[must_use]
    pub fn with_affected_goal(mut self, goal: impl Into<String>) -> Self {
        self.affected_goal = Some(goal.into());
        self
    }

    /// The subsystem this effect modifies.
    pub const fn affected_system(&self) -> AffectedSystem {
        self.affected_system
    }

    /// The trait, social variable, or goal description to modify.
    pub fn affected_trait(&self) -> &str {
        &self.affected_trait
    }

    /// Unscaled magnitude.
    pub const fn base_magnitude(&self) -> f32 {
        self.base_magnitude
    }

    /// The FFM trait scaling this effect, if any.
    pub fn personality_modulator(&self) -> Option<&str> {
        self.personality_modulator.as_deref()
    }

    /// How strongly the modulator scales the effect.
    pub const fn modulation_strength(&self) -> f32 {
        self.modulation_strength
    }

    /// The single character a relationship effect targets.
    pub const fn target_character(&self) -> Option<CharacterId> {
        self.target_character
    }

    /// The group a relationship effect targets.
    pub const fn target_group(&self) -> Option<GroupId> {
        self.target_group
    }

    /// The goal recorded with this effect.
    pub fn affected_goal(&self) -> Option<&str> {
        self.affected_goal.as_deref()
    }

    /// Base magnitude scaled by the modulator.
    ///
    /// `modulator_value` is the receiver's raw trait value; it is clamped to
    /// [0, 1]. Ignored when the effect has no modulator.
    pub fn modulated_magnitude(&self, modulator_value: f32) -> f32 {
        if self.personality_modulator.is_none() {
            return self.base_magnitude;
        }
        let modulator = modulator_value.clamp(0.0, 1.0);
        self.base_magnitude * self.modulation_strength.mul_add(modulator, 1.0)
    }
}
