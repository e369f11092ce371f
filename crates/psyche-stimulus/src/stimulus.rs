//! Stimulus: an immutable descriptor of a social event.

use psyche_types::{Position, Propagation, StimulusType, StimulusTypes};

/// An event that may reach and affect characters.
///
/// Magnitude is clamped to [0, 1] at construction. Falloff radius and
/// position only matter for [`Propagation::Local`]; the target group only
/// matters for [`Propagation::Broadcast`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stimulus {
    name: String,
    types: StimulusTypes,
    magnitude: f32,
    source: String,
    propagation: Propagation,
    falloff_radius: f32,
    position: Position,
    target_group: Option<String>,
}

impl Stimulus {
    /// Create a stimulus at the origin with no falloff radius and no target group.
    pub fn new(
        name: impl Into<String>,
        types: impl Into<StimulusTypes>,
        magnitude: f32,
        source: impl Into<String>,
        propagation: Propagation,
    ) -> Self {
        Self {
            name: name.into(),
            types: types.into(),
            magnitude: magnitude.clamp(0.0, 1.0),
            source: source.into(),
            propagation,
            falloff_radius: 0.0,
            position: Position::ORIGIN,
            target_group: None,
        }
    }

    /// Builder-style: place the stimulus in the world.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Builder-style: set the local falloff radius.
    #[must_use]
    pub const fn with_falloff(mut self, radius: f32) -> Self {
        self.falloff_radius = radius;
        self
    }

    /// Builder-style: restrict a broadcast to members of the named group.
    #[must_use]
    pub fn for_group(mut self, group_name: impl Into<String>) -> Self {
        self.target_group = Some(group_name.into());
        self
    }

    /// The stimulus name, used as the dispatcher key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classification flags.
    pub const fn types(&self) -> StimulusTypes {
        self.types
    }

    /// Magnitude in [0, 1].
    pub const fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Who or what emitted the stimulus.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// How the stimulus spreads.
    pub const fn propagation(&self) -> Propagation {
        self.propagation
    }

    /// Radius of local propagation.
    pub const fn falloff_radius(&self) -> f32 {
        self.falloff_radius
    }

    /// Where the stimulus originated.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Name of the group a broadcast is restricted to, if any.
    pub fn target_group(&self) -> Option<&str> {
        self.target_group.as_deref()
    }

    /// Whether the emotional flag is set.
    pub fn is_emotional(&self) -> bool {
        self.types.contains(StimulusType::Emotional)
    }

    /// Whether the social flag is set.
    pub fn is_social(&self) -> bool {
        self.types.contains(StimulusType::Social)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_is_clamped() {
        let loud = Stimulus::new("Shout", StimulusType::Social, 3.0, "Bob", Propagation::Local);
        assert!((loud.magnitude() - 1.0).abs() < f32::EPSILON);
        let silent = Stimulus::new("Shout", StimulusType::Social, -1.0, "Bob", Propagation::Local);
        assert!(silent.magnitude().abs() < f32::EPSILON);
    }

    #[test]
    fn flags_combine() {
        let stimulus = Stimulus::new(
            "Compliment",
            StimulusType::Emotional | StimulusType::Social,
            0.5,
            "Player",
            Propagation::Direct,
        );
        assert!(stimulus.is_emotional());
        assert!(stimulus.is_social());

        let gossip = Stimulus::new("GossipHeard", StimulusType::Social, 0.5, "Eve", Propagation::Broadcast)
            .for_group("Villagers");
        assert!(!gossip.is_emotional());
        assert_eq!(gossip.target_group(), Some("Villagers"));
    }
}
