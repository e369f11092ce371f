//! Bounded scalar traits with optional weighted sub-traits.
//!
//! A [`Trait`] without sub-traits stores its value directly, clamped to
//! [-1.0, 1.0] on every write. Once a trait has sub-traits, they become
//! authoritative: its effective value is the weighted sum of their
//! effective values, computed recursively, and the stored value is ignored.
//!
//! Weights are not normalized. Callers choose weights that sum to a
//! sensible total for their model.

/// Lower bound of a trait value.
pub const TRAIT_MIN: f32 = -1.0;

/// Upper bound of a trait value.
pub const TRAIT_MAX: f32 = 1.0;

/// Default sub-trait weight when none is meaningful.
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// A named scalar attribute in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    name: String,
    value: f32,
    weight: f32,
    /// Sub-traits in insertion order. Names are unique among siblings.
    sub_traits: Vec<Trait>,
}

impl Trait {
    /// Create a leaf trait. `value` is clamped to [-1, 1] and `weight` to [0, 1].
    pub fn new(name: impl Into<String>, value: f32, weight: f32) -> Self {
        Self {
            name: name.into(),
            value: clamp_value(value),
            weight: weight.clamp(0.0, 1.0),
            sub_traits: Vec::new(),
        }
    }

    /// The trait name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The directly stored value. Ignored by [`Trait::compute_value`] once
    /// the trait has sub-traits.
    pub const fn stored_value(&self) -> f32 {
        self.value
    }

    /// This trait's weight within its parent.
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Store a new value, clamped to [-1, 1].
    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_value(value);
    }

    /// Whether this trait derives its value from sub-traits.
    pub fn has_sub_traits(&self) -> bool {
        !self.sub_traits.is_empty()
    }

    /// Sub-traits in insertion order.
    pub fn sub_traits(&self) -> &[Self] {
        &self.sub_traits
    }

    /// Find a direct sub-trait by name.
    pub fn sub_trait(&self, name: &str) -> Option<&Self> {
        self.sub_traits.iter().find(|sub| sub.name == name)
    }

    /// Attach a sub-trait.
    ///
    /// Returns the new sub-trait's position among its siblings, or `None`
    /// if a sibling with the same name already exists.
    pub fn push_sub_trait(&mut self, sub_trait: Self) -> Option<usize> {
        if self.sub_trait(&sub_trait.name).is_some() {
            return None;
        }
        let position = self.sub_traits.len();
        self.sub_traits.push(sub_trait);
        Some(position)
    }

    /// Effective value: the stored value for leaves, otherwise the
    /// weighted sum of sub-trait effective values.
    pub fn compute_value(&self) -> f32 {
        if self.sub_traits.is_empty() {
            return self.value;
        }
        self.sub_traits
            .iter()
            .fold(0.0, |sum, sub| sub.weight.mul_add(sub.compute_value(), sum))
    }

    pub(crate) fn child(&self, position: usize) -> Option<&Self> {
        self.sub_traits.get(position)
    }

    pub(crate) fn child_mut(&mut self, position: usize) -> Option<&mut Self> {
        self.sub_traits.get_mut(position)
    }
}

/// Clamp a trait value to [-1.0, 1.0].
pub fn clamp_value(value: f32) -> f32 {
    value.clamp(TRAIT_MIN, TRAIT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn leaf_value_is_clamped() {
        let mut t = Trait::new("Joy", 0.0, DEFAULT_WEIGHT);
        t.set_value(1.5);
        assert!(approx(t.compute_value(), 1.0));
        t.set_value(-2.0);
        assert!(approx(t.compute_value(), -1.0));
    }

    #[test]
    fn constructor_clamps_value_and_weight() {
        let t = Trait::new("Fear", 3.0, 2.0);
        assert!(approx(t.stored_value(), 1.0));
        assert!(approx(t.weight(), 1.0));

        let t = Trait::new("Fear", -3.0, -0.5);
        assert!(approx(t.stored_value(), -1.0));
        assert!(approx(t.weight(), 0.0));
    }

    #[test]
    fn weighted_sum_of_sub_traits() {
        let mut parent = Trait::new("Extraversion", 0.0, DEFAULT_WEIGHT);
        parent.push_sub_trait(Trait::new("Outgoing", 0.8, 0.7));
        parent.push_sub_trait(Trait::new("Talkative", 0.9, 0.3));
        assert!(approx(parent.compute_value(), 0.83));
    }

    #[test]
    fn sub_traits_are_authoritative() {
        let mut parent = Trait::new("Joy", 0.0, DEFAULT_WEIGHT);
        parent.push_sub_trait(Trait::new("Zest", 0.4, 0.5));
        parent.set_value(1.0);
        assert!(approx(parent.compute_value(), 0.2));
        assert!(approx(parent.stored_value(), 1.0));
    }

    #[test]
    fn nested_sub_traits_recurse() {
        let mut cheer = Trait::new("Cheerfulness", 0.0, 0.7);
        cheer.push_sub_trait(Trait::new("Happiness", 0.9, 0.5));
        let mut joy = Trait::new("Joy", 0.0, DEFAULT_WEIGHT);
        joy.push_sub_trait(cheer);
        assert!(approx(joy.compute_value(), 0.9 * 0.5 * 0.7));
    }

    #[test]
    fn duplicate_sibling_is_rejected() {
        let mut parent = Trait::new("EI", 0.0, DEFAULT_WEIGHT);
        assert_eq!(parent.push_sub_trait(Trait::new("Outgoing", 0.1, 0.5)), Some(0));
        assert_eq!(parent.push_sub_trait(Trait::new("Outgoing", 0.9, 0.5)), None);
        assert_eq!(parent.sub_traits().len(), 1);
        assert!(parent.sub_trait("Outgoing").is_some_and(|t| approx(t.stored_value(), 0.1)));
    }
}
