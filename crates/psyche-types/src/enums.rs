//! Enumeration types for the Psyche decision engine.
//!
//! Closed vocabularies replace string switches wherever the set of values
//! is known up front: aspect categories, model variants, propagation modes,
//! affected subsystems, and the behavior catalog. Where callers can still
//! introduce new names (behaviors), an explicit `Other` variant carries the
//! free-form string.

use core::fmt;

use flagset::{FlagSet, flags};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Aspects and models
// ---------------------------------------------------------------------------

/// The category of an aspect attached to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    /// Stable dispositions (FFM, MBTI).
    Personality,
    /// Transient affective state (Ekman, Parrott).
    Emotion,
}

impl AspectKind {
    /// Human-readable aspect name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Personality => "Personality",
            Self::Emotion => "Emotion",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete aspect model variant with a fixed core-trait vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Five-Factor Model (Big Five).
    #[serde(rename = "FFMPersonalityModel")]
    Ffm,
    /// Myers-Briggs axes, each a bipolar scale.
    #[serde(rename = "MBTIPersonalityModel")]
    Mbti,
    /// Ekman's six basic emotions.
    #[serde(rename = "EkmanEmotionModel")]
    Ekman,
    /// Parrott's three-level emotion hierarchy.
    #[serde(rename = "ParrottEmotionModel")]
    Parrott,
}

impl ModelKind {
    /// Every model variant, in declaration order.
    pub const ALL: [Self; 4] = [Self::Ffm, Self::Mbti, Self::Ekman, Self::Parrott];

    /// The model's canonical name, as used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ffm => "FFMPersonalityModel",
            Self::Mbti => "MBTIPersonalityModel",
            Self::Ekman => "EkmanEmotionModel",
            Self::Parrott => "ParrottEmotionModel",
        }
    }

    /// Look up a model variant by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The aspect category this model belongs to.
    pub const fn category(self) -> AspectKind {
        match self {
            Self::Ffm | Self::Mbti => AspectKind::Personality,
            Self::Ekman | Self::Parrott => AspectKind::Emotion,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Stimuli
// ---------------------------------------------------------------------------

flags! {
    /// Classification flags for a stimulus. Flags combine bitwise.
    pub enum StimulusType: u8 {
        /// The stimulus carries emotional content.
        Emotional,
        /// The stimulus is a social interaction.
        Social,
    }
}

/// A combination of [`StimulusType`] flags.
pub type StimulusTypes = FlagSet<StimulusType>;

/// How a stimulus spreads from its origin to potential receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Propagation {
    /// Only the involved characters; distance is irrelevant.
    Direct,
    /// Everyone within the falloff radius, attenuated by distance.
    Local,
    /// Spreads socially, optionally restricted to a named group.
    Broadcast,
}

/// The subsystem a stimulus effect modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AffectedSystem {
    /// A trait of the agent's emotion model.
    Emotion,
    /// A social variable of one or more relationships.
    Relationship,
    /// The priority of a goal in the agent's most important role.
    GoalPlanning,
}

// ---------------------------------------------------------------------------
// Behaviors
// ---------------------------------------------------------------------------

/// A candidate response an agent may exhibit.
///
/// The named variants form the built-in catalog and carry personality
/// weight formulas. [`BehaviorKind::Other`] holds any behavior outside the
/// catalog; such behaviors are still selectable but only receive the base
/// weight.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BehaviorKind {
    /// Smile at the source.
    Smile,
    /// Thank the source.
    Thank,
    /// Return the compliment.
    ComplimentBack,
    /// Physically or socially withdraw.
    Withdraw,
    /// Ignore the stimulus.
    Ignore,
    /// Downplay the remark.
    Downplay,
    /// Postpone a decision.
    Postpone,
    /// Defend the target of a remark.
    Defend,
    /// Voice disagreement.
    Disagree,
    /// Confront the source.
    Confront,
    /// Comfort someone in distress.
    Comfort,
    /// Offer assistance.
    OfferHelp,
    /// Refuse a request.
    Refuse,
    /// Comply with a request.
    Comply,
    /// Pass the gossip on.
    SpreadGossip,
    /// Keep the gossip to oneself.
    KeepSecret,
    /// Accept an invitation.
    Accept,
    /// Decline an invitation politely.
    PolitelyDecline,
    /// Confront the subject of gossip.
    ConfrontSubject,
    /// A behavior outside the built-in catalog.
    Other(String),
}

impl BehaviorKind {
    /// Every catalog variant (excluding [`BehaviorKind::Other`]).
    pub const CATALOG: [Self; 19] = [
        Self::Smile,
        Self::Thank,
        Self::ComplimentBack,
        Self::Withdraw,
        Self::Ignore,
        Self::Downplay,
        Self::Postpone,
        Self::Defend,
        Self::Disagree,
        Self::Confront,
        Self::Comfort,
        Self::OfferHelp,
        Self::Refuse,
        Self::Comply,
        Self::SpreadGossip,
        Self::KeepSecret,
        Self::Accept,
        Self::PolitelyDecline,
        Self::ConfrontSubject,
    ];

    /// The human-readable behavior name.
    pub fn name(&self) -> &str {
        match self {
            Self::Smile => "Smile",
            Self::Thank => "Thank",
            Self::ComplimentBack => "Compliment Back",
            Self::Withdraw => "Withdraw",
            Self::Ignore => "Ignore",
            Self::Downplay => "Downplay",
            Self::Postpone => "Postpone",
            Self::Defend => "Defend",
            Self::Disagree => "Disagree",
            Self::Confront => "Confront",
            Self::Comfort => "Comfort",
            Self::OfferHelp => "Offer Help",
            Self::Refuse => "Refuse",
            Self::Comply => "Comply",
            Self::SpreadGossip => "Spread Gossip",
            Self::KeepSecret => "Keep Secret",
            Self::Accept => "Accept",
            Self::PolitelyDecline => "Politely Decline",
            Self::ConfrontSubject => "Confront Subject",
            Self::Other(name) => name,
        }
    }

    /// Resolve a behavior name to its catalog variant, or `Other` if unknown.
    pub fn from_name(name: &str) -> Self {
        Self::CATALOG
            .into_iter()
            .find(|kind| kind.name() == name)
            .unwrap_or_else(|| Self::Other(String::from(name)))
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for BehaviorKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for BehaviorKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<BehaviorKind> for String {
    fn from(kind: BehaviorKind) -> Self {
        match kind {
            BehaviorKind::Other(name) => name,
            known => Self::from(known.name()),
        }
    }
}
