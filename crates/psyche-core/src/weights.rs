//! Personality-driven behavior weights.
//!
//! Each catalog behavior has a [`WeightFormula`]: a linear combination of
//! nine personality scalars (five FFM factors, four MBTI axes), plus
//! threshold bonuses such as "+5 if EI > 0.5". The [`WeightTable`] holds one
//! formula per [`BehaviorKind`] and turns a [`PersonalityProfile`] into a
//! selection weight:
//!
//! ```text
//! weight = max(base_weight + formula(profile), min_weight)
//! ```
//!
//! Behaviors without a formula get only the base weight. The floor keeps
//! every candidate selectable with a small probability.

use std::collections::BTreeMap;

use psyche_aspects::Character;
use psyche_types::{BehaviorKind, FfmTrait, MbtiAxis, ModelKind};

/// Base weight every candidate starts with.
pub const DEFAULT_BASE_WEIGHT: f32 = 0.2;

/// Lowest weight a candidate can end up with.
pub const DEFAULT_MIN_WEIGHT: f32 = 0.001;

/// Value used for every scalar of a model the character does not have.
pub const MISSING_MODEL_DEFAULT: f32 = 0.5;

// ---------------------------------------------------------------------------
// Personality profile
// ---------------------------------------------------------------------------

/// One of the nine scalars a weight formula can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    /// An FFM factor.
    Ffm(FfmTrait),
    /// An MBTI axis.
    Mbti(MbtiAxis),
}

/// The nine personality scalars used to weight behaviors.
///
/// A missing FFM or MBTI model makes all of its scalars read
/// [`MISSING_MODEL_DEFAULT`]. A present model with a missing trait reads 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityProfile {
    /// FFM values in [`FfmTrait::ALL`] order.
    ffm: [f32; 5],
    /// MBTI values in [`MbtiAxis::ALL`] order.
    mbti: [f32; 4],
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self {
            ffm: [MISSING_MODEL_DEFAULT; 5],
            mbti: [MISSING_MODEL_DEFAULT; 4],
        }
    }
}

impl PersonalityProfile {
    /// Read the profile from a character's personality aspect.
    pub fn from_character(character: &Character) -> Self {
        let mut profile = Self::default();
        if let Some(ffm) = character.model(ModelKind::Ffm) {
            for (slot, factor) in profile.ffm.iter_mut().zip(FfmTrait::ALL) {
                *slot = ffm.trait_value(factor.name());
            }
        }
        if let Some(mbti) = character.model(ModelKind::Mbti) {
            for (slot, axis) in profile.mbti.iter_mut().zip(MbtiAxis::ALL) {
                *slot = mbti.trait_value(axis.code());
            }
        }
        profile
    }

    /// Build a profile from explicit FFM and MBTI values.
    pub const fn from_values(ffm: [f32; 5], mbti: [f32; 4]) -> Self {
        Self { ffm, mbti }
    }

    /// Read one scalar.
    pub fn get(&self, factor: Factor) -> f32 {
        match factor {
            Factor::Ffm(t) => self.ffm(t),
            Factor::Mbti(axis) => self.mbti(axis),
        }
    }

    /// An FFM factor value.
    pub fn ffm(&self, factor: FfmTrait) -> f32 {
        FfmTrait::ALL
            .iter()
            .position(|known| *known == factor)
            .and_then(|i| self.ffm.get(i))
            .copied()
            .unwrap_or(MISSING_MODEL_DEFAULT)
    }

    /// An MBTI axis value.
    pub fn mbti(&self, axis: MbtiAxis) -> f32 {
        MbtiAxis::ALL
            .iter()
            .position(|known| *known == axis)
            .and_then(|i| self.mbti.get(i))
            .copied()
            .unwrap_or(MISSING_MODEL_DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    factor: Factor,
    coefficient: f32,
    /// Use `1 - value` instead of `value`.
    inverted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Threshold {
    Above(f32),
    Below(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bonus {
    factor: Factor,
    threshold: Threshold,
    amount: f32,
}

/// A linear formula over personality scalars with threshold bonuses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightFormula {
    terms: Vec<Term>,
    bonuses: Vec<Bonus>,
}

impl WeightFormula {
    /// An empty formula (always 0).
    pub const fn new() -> Self {
        Self {
            terms: Vec::new(),
            bonuses: Vec::new(),
        }
    }

    /// Add `coefficient * value`.
    #[must_use]
    pub fn plus(mut self, factor: Factor, coefficient: f32) -> Self {
        self.terms.push(Term {
            factor,
            coefficient,
            inverted: false,
        });
        self
    }

    /// Add `coefficient * (1 - value)`.
    #[must_use]
    pub fn plus_inverse(mut self, factor: Factor, coefficient: f32) -> Self {
        self.terms.push(Term {
            factor,
            coefficient,
            inverted: true,
        });
        self
    }

    /// Add `amount` when the value is strictly above `threshold`.
    #[must_use]
    pub fn bonus_above(mut self, factor: Factor, threshold: f32, amount: f32) -> Self {
        self.bonuses.push(Bonus {
            factor,
            threshold: Threshold::Above(threshold),
            amount,
        });
        self
    }

    /// Add `amount` when the value is strictly below `threshold`.
    #[must_use]
    pub fn bonus_below(mut self, factor: Factor, threshold: f32, amount: f32) -> Self {
        self.bonuses.push(Bonus {
            factor,
            threshold: Threshold::Below(threshold),
            amount,
        });
        self
    }

    /// Evaluate against a profile.
    pub fn evaluate(&self, profile: &PersonalityProfile) -> f32 {
        let linear = self.terms.iter().fold(0.0, |sum, term| {
            let value = profile.get(term.factor);
            let input = if term.inverted { 1.0 - value } else { value };
            term.coefficient.mul_add(input, sum)
        });
        self.bonuses.iter().fold(linear, |sum, bonus| {
            let value = profile.get(bonus.factor);
            let hit = match bonus.threshold {
                Threshold::Above(limit) => value > limit,
                Threshold::Below(limit) => value < limit,
            };
            if hit { sum + bonus.amount } else { sum }
        })
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Behavior -> formula mapping with base and floor weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    formulas: BTreeMap<BehaviorKind, WeightFormula>,
    base_weight: f32,
    min_weight: f32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightTable {
    /// A table with no formulas: every behavior gets the base weight.
    pub const fn empty(base_weight: f32, min_weight: f32) -> Self {
        Self {
            formulas: BTreeMap::new(),
            base_weight,
            min_weight,
        }
    }

    /// The stock formulas for the behavior catalog, with default limits.
    pub fn standard() -> Self {
        Self::standard_with_limits(DEFAULT_BASE_WEIGHT, DEFAULT_MIN_WEIGHT)
    }

    /// The stock formulas with custom base and floor weights.
    #[allow(clippy::too_many_lines)]
    pub fn standard_with_limits(base_weight: f32, min_weight: f32) -> Self {
        use BehaviorKind as B;
        use WeightFormula as F;

        const E: Factor = Factor::Ffm(FfmTrait::Extraversion);
        const A: Factor = Factor::Ffm(FfmTrait::Agreeableness);
        const N: Factor = Factor::Ffm(FfmTrait::Neuroticism);
        const C: Factor = Factor::Ffm(FfmTrait::Conscientiousness);
        const O: Factor = Factor::Ffm(FfmTrait::Openness);
        const EI: Factor = Factor::Mbti(MbtiAxis::Ei);
        const TF: Factor = Factor::Mbti(MbtiAxis::Tf);
        const SN: Factor = Factor::Mbti(MbtiAxis::Sn);
        const JP: Factor = Factor::Mbti(MbtiAxis::Jp);

        let mut table = Self::empty(base_weight, min_weight);
        table.insert(B::Smile, F::new().plus(E, 10.0).bonus_above(EI, 0.5, 5.0));
        table.insert(B::Thank, F::new().plus(A, 10.0).bonus_above(EI, 0.5, 5.0));
        table.insert(B::ComplimentBack, F::new().plus(E, 8.0).plus(EI, 5.0));
        table.insert(
            B::Withdraw,
            F::new().plus_inverse(E, 10.0).bonus_below(EI, 0.5, 5.0),
        );
        for quiet in [B::Ignore, B::Downplay, B::Postpone] {
            table.insert(quiet, F::new().plus_inverse(E, 8.0).bonus_below(EI, 0.5, 4.0));
        }
        table.insert(
            B::Defend,
            F::new().plus_inverse(A, 8.0).bonus_above(TF, 0.5, 5.0),
        );
        table.insert(
            B::Disagree,
            F::new().plus(A, 5.0).plus(O, 4.0).bonus_below(TF, 0.5, 3.0),
        );
        table.insert(
            B::Confront,
            F::new()
                .plus_inverse(A, 8.0)
                .plus(N, 5.0)
                .bonus_above(TF, 0.5, 4.0),
        );
        table.insert(B::Comfort, F::new().plus(A, 8.0).bonus_above(EI, 0.5, 4.0));
        table.insert(B::OfferHelp, F::new().plus(A, 8.0).bonus_below(TF, 0.5, 4.0));
        table.insert(
            B::Refuse,
            F::new().plus_inverse(C, 8.0).bonus_below(JP, 0.5, 4.0),
        );
        table.insert(
            B::Comply,
            F::new().plus(A, 5.0).plus(C, 5.0).bonus_above(JP, 0.5, 2.5),
        );
        table.insert(
            B::SpreadGossip,
            F::new().plus(E, 8.0).plus(N, 4.0).bonus_below(SN, 0.5, 2.0),
        );
        table.insert(B::KeepSecret, F::new().plus(C, 8.0).bonus_above(SN, 0.5, 2.0));
        table.insert(B::Accept, F::new().plus(A, 8.0).bonus_above(EI, 0.5, 4.0));
        table.insert(
            B::PolitelyDecline,
            F::new().plus_inverse(A, 8.0).bonus_below(EI, 0.5, 4.0),
        );
        table
    }

    /// Set (or replace) the formula for a behavior.
    pub fn insert(&mut self, kind: BehaviorKind, formula: WeightFormula) {
        self.formulas.insert(kind, formula);
    }

    /// The formula for a behavior, if it has one.
    pub fn formula(&self, kind: &BehaviorKind) -> Option<&WeightFormula> {
        self.formulas.get(kind)
    }

    /// The weight every behavior starts from.
    pub const fn base_weight(&self) -> f32 {
        self.base_weight
    }

    /// The floor applied to every weight.
    pub const fn min_weight(&self) -> f32 {
        self.min_weight
    }

    /// The floored selection weight of `kind` for `profile`.
    pub fn weight(&self, kind: &BehaviorKind, profile: &PersonalityProfile) -> f32 {
        let bonus = self
            .formula(kind)
            .map_or(0.0, |formula| formula.evaluate(profile));
        (self.base_weight + bonus).max(self.min_weight)
    }
}
