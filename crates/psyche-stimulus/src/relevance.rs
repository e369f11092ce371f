//! Whether a stimulus reaches a character, and how much of it survives.

use psyche_aspects::Character;
use psyche_social::{GroupMembership, GroupRegistry};
use psyche_types::Propagation;

use crate::stimulus::Stimulus;

/// Outcome of a relevance check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relevance {
    /// Whether the stimulus reaches the character at all.
    pub relevant: bool,
    /// Magnitude left after propagation. Zero when not relevant.
    pub remaining_magnitude: f32,
}

impl Relevance {
    const IRRELEVANT: Self = Self {
        relevant: false,
        remaining_magnitude: 0.0,
    };

    const fn reached(remaining_magnitude: f32) -> Self {
        Self {
            relevant: true,
            remaining_magnitude,
        }
    }
}

/// Decide whether `stimulus` reaches `character`.
///
/// - Direct: always, at full magnitude.
/// - Local: when within the falloff radius, attenuated linearly with
///   distance. A character exactly on the radius is reached with zero
///   magnitude.
/// - Broadcast: always at full magnitude, unless the stimulus names a
///   target group and the character is in no group of that name.
pub fn is_relevant(
    stimulus: &Stimulus,
    character: &Character,
    membership: &GroupMembership,
    groups: &GroupRegistry,
) -> Relevance {
    let magnitude = stimulus.magnitude();
    match stimulus.propagation() {
        Propagation::Direct => Relevance::reached(magnitude),
        Propagation::Local => {
            let radius = stimulus.falloff_radius();
            let distance = character.position.distance(stimulus.position());
            if distance > radius {
                return Relevance::IRRELEVANT;
            }
            if radius <= 0.0 {
                // Zero radius, character standing on the origin point.
                return Relevance::reached(magnitude);
            }
            Relevance::reached(magnitude * (1.0 - distance / radius))
        }
        Propagation::Broadcast => match stimulus.target_group() {
            Some(target) if !target.is_empty() => {
                let in_target = membership
                    .resolve(groups)
                    .any(|group| group.name() == target);
                if in_target {
                    Relevance::reached(magnitude)
                } else {
                    Relevance::IRRELEVANT
                }
            }
            _ => Relevance::reached(magnitude),
        },
    }
}
