//! Fixed trait vocabularies for each aspect model variant.
//!
//! Each [`ModelKind`] declares the set of top-level ("core") trait names it
//! accepts. The Parrott model additionally declares which sub-trait names
//! are valid beneath each parent, forming a primary -> secondary ->
//! tertiary emotion hierarchy.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::ModelKind;

// ---------------------------------------------------------------------------
// Five-Factor Model
// ---------------------------------------------------------------------------

/// A Five-Factor Model personality trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FfmTrait {
    /// Curiosity and openness to new experience.
    Openness,
    /// Organisation, dependability, and self-discipline.
    Conscientiousness,
    /// Sociability and assertiveness.
    Extraversion,
    /// Warmth and cooperativeness.
    Agreeableness,
    /// Emotional instability.
    Neuroticism,
}

impl FfmTrait {
    /// All five factors in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];

    /// The trait name as registered in the model.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::Neuroticism => "Neuroticism",
        }
    }
}

impl fmt::Display for FfmTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MBTI
// ---------------------------------------------------------------------------

/// An MBTI axis. Positive values lean toward the first pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MbtiAxis {
    /// Extraversion (+) versus Introversion (-).
    #[serde(rename = "EI")]
    Ei,
    /// Sensing (+) versus Intuition (-).
    #[serde(rename = "SN")]
    Sn,
    /// Thinking (+) versus Feeling (-).
    #[serde(rename = "TF")]
    Tf,
    /// Judging (+) versus Perceiving (-).
    #[serde(rename = "JP")]
    Jp,
}

impl MbtiAxis {
    /// All four axes in canonical order.
    pub const ALL: [Self; 4] = [Self::Ei, Self::Sn, Self::Tf, Self::Jp];

    /// The axis code as registered in the model.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ei => "EI",
            Self::Sn => "SN",
            Self::Tf => "TF",
            Self::Jp => "JP",
        }
    }

    /// Look up an axis by its two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.code() == code)
    }

    /// The `(positive, negative)` pole names of this axis.
    pub const fn poles(self) -> (&'static str, &'static str) {
        match self {
            Self::Ei => ("Extraversion", "Introversion"),
            Self::Sn => ("Sensing", "Intuition"),
            Self::Tf => ("Thinking", "Feeling"),
            Self::Jp => ("Judging", "Perceiving"),
        }
    }

    /// The pole an axis value leans toward. Zero counts as positive.
    pub fn pole_for(self, value: f32) -> &'static str {
        let (positive, negative) = self.poles();
        if value >= 0.0 { positive } else { negative }
    }
}

impl fmt::Display for MbtiAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Ekman
// ---------------------------------------------------------------------------

/// One of Ekman's six basic emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EkmanEmotion {
    /// Joy.
    Joy,
    /// Sadness.
    Sadness,
    /// Anger.
    Anger,
    /// Fear.
    Fear,
    /// Disgust.
    Disgust,
    /// Surprise.
    Surprise,
}

impl EkmanEmotion {
    /// All six emotions in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Disgust,
        Self::Surprise,
    ];

    /// The trait name as registered in the model.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Joy => "Joy",
            Self::Sadness => "Sadness",
            Self::Anger => "Anger",
            Self::Fear => "Fear",
            Self::Disgust => "Disgust",
            Self::Surprise => "Surprise",
        }
    }
}

impl fmt::Display for EkmanEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Core vocabularies
// ---------------------------------------------------------------------------

const FFM_CORE: &[&str] = &[
    "Openness",
    "Conscientiousness",
    "Extraversion",
    "Agreeableness",
    "Neuroticism",
];

const MBTI_CORE: &[&str] = &["EI", "SN", "TF", "JP"];

const EKMAN_CORE: &[&str] = &["Joy", "Sadness", "Anger", "Fear", "Disgust", "Surprise"];

const PARROTT_CORE: &[&str] = &["Anger", "Love", "Fear", "Joy", "Sadness", "Surprise"];

/// Parrott's parent -> valid-children table.
///
/// Names are shared between levels (e.g. "Sadness" is both a primary and a
/// secondary emotion), so a parent's entry lists every child valid under
/// that name at any level.
const PARROTT_HIERARCHY: &[(&str, &[&str])] = &[
    // Primary -> secondary
    ("Love", &["Affection", "Lust", "Longing"]),
    (
        "Joy",
        &[
            "Cheerfulness",
            "Zest",
            "Contentment",
            "Pride",
            "Optimism",
            "Enthrallment",
            "Relief",
        ],
    ),
    ("Surprise", &["Surprise", "Amazement", "Astonishment"]),
    (
        "Anger",
        &["Irritability", "Exasperation", "Rage", "Disgust", "Envy", "Torment"],
    ),
    (
        "Sadness",
        &[
            "Suffering",
            "Sadness",
            "Disappointment",
            "Shame",
            "Neglect",
            "Sympathy",
            "Depression",
            "Despair",
            "Gloom",
            "Glumness",
            "Unhappy",
            "Grief",
            "Sorrow",
            "Woe",
            "Misery",
            "Melancholy",
        ],
    ),
    ("Fear", &["Horror", "Nervousness"]),
    // Secondary -> tertiary
    (
        "Affection",
        &[
            "Adoration",
            "Fondness",
            "Liking",
            "Attractiveness",
            "Caring",
            "Tenderness",
            "Compassion",
            "Sentimentality",
        ],
    ),
    ("Lust", &["Desire", "Passion", "Infatuation"]),
    ("Longing", &["Longing"]),
    (
        "Cheerfulness",
        &[
            "Amusement",
            "Bliss",
            "Gaiety",
            "Glee",
            "Jolliness",
            "Joviality",
            "Joy",
            "Delight",
            "Enjoyment",
            "Gladness",
            "Happiness",
            "Jubilation",
            "Elation",
            "Satisfaction",
            "Ecstacy",
            "Euphoria",
        ],
    ),
    (
        "Zest",
        &["Enthusiasm", "Zeal", "Excitement", "Thrill", "Exhilaration"],
    ),
    ("Contentment", &["Pleasure"]),
    ("Pride", &["Triumph"]),
    ("Optimism", &["Hope", "Eagerness"]),
    ("Enthrallment", &["Enthrallment", "Rapture"]),
    ("Relief", &["Relief"]),
    (
        "Irritability",
        &[
            "Aggravation",
            "Agitation",
            "Annoyance",
            "Grouchy",
            "Grumpy",
            "Crosspatch",
        ],
    ),
    ("Exasperation", &["Frustration"]),
    (
        "Rage",
        &[
            "Anger",
            "Outrage",
            "Fury",
            "Wrath",
            "Hostility",
            "Ferocity",
            "Bitter",
            "Hatred",
            "Scom",
            "Spite",
            "Vengefulness",
            "Dislike",
            "Resentment",
        ],
    ),
    ("Disgust", &["Revulsion", "Loathing", "Contempt"]),
    ("Envy", &["Jealousy"]),
    ("Torment", &["Torment"]),
    ("Suffering", &["Agony", "Hurt", "Anguish"]),
    ("Disappointment", &["Dismay", "Displeasure"]),
    ("Shame", &["Guilt", "Regret", "Remorse"]),
    (
        "Neglect",
        &[
            "Alienation",
            "Defeat",
            "Dejection",
            "Embarrassment",
            "Homesickness",
            "Humiliation",
            "Insecurity",
            "Insult",
            "Isolation",
            "Loneliness",
            "Rejection",
        ],
    ),
    ("Sympathy", &["Pity", "Sympathy"]),
    (
        "Horror",
        &[
            "Terror",
            "Horror",
            "Alarm",
            "Shock",
            "Fear",
            "Fright",
            "Panic",
            "Hysteria",
            "Mortification",
        ],
    ),
    (
        "Nervousness",
        &[
            "Anxiety",
            "Suspense",
            "Uneasiness",
            "Apprehension",
            "Worry",
            "Distress",
            "Dread",
        ],
    ),
];

impl ModelKind {
    /// The top-level trait names this model accepts.
    pub const fn core_traits(self) -> &'static [&'static str] {
        match self {
            Self::Ffm => FFM_CORE,
            Self::Mbti => MBTI_CORE,
            Self::Ekman => EKMAN_CORE,
            Self::Parrott => PARROTT_CORE,
        }
    }

    /// Whether `name` belongs to this model's core vocabulary.
    pub fn is_core_trait(self, name: &str) -> bool {
        self.core_traits().iter().any(|known| *known == name)
    }

    /// Whether this model restricts sub-trait names to a fixed hierarchy.
    pub const fn enforces_hierarchy(self) -> bool {
        matches!(self, Self::Parrott)
    }

    /// The declared valid children of `parent`, for hierarchical models.
    ///
    /// Returns `None` for models without a hierarchy and for parents that
    /// have no declared children.
    pub fn valid_children(self, parent: &str) -> Option<&'static [&'static str]> {
        if !self.enforces_hierarchy() {
            return None;
        }
        PARROTT_HIERARCHY
            .iter()
            .find(|(name, _)| *name == parent)
            .map(|(_, children)| *children)
    }

    /// Whether `child` may be added beneath `parent` in this model.
    ///
    /// Models without a hierarchy accept any sub-trait name.
    pub fn allows_sub_trait(self, parent: &str, child: &str) -> bool {
        if !self.enforces_hierarchy() {
            return true;
        }
        self.valid_children(parent)
            .is_some_and(|children| children.iter().any(|valid| *valid == child))
    }
}
