//! Importance and scheduling priority of a character.
//!
//! An [`ImportanceState`] scores how much a character matters right now
//! (player focus, designer intent, role, context) and derives a scheduling
//! priority that rises while the character waits and falls while it runs.
//! Time only moves when the owner calls [`ImportanceState::advance`].

use serde::Deserialize;

/// Default starvation growth per second.
pub const DEFAULT_STARVATION_RATE: f32 = 0.05;

/// Default completion decay per second.
pub const DEFAULT_COMPLETION_DECAY: f32 = 0.02;

/// Inputs to the overall importance score, each nominally in [0, 1],
/// with one weight per input.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportanceFactors {
    /// How much the player is paying attention to the character.
    pub player_focus: f32,
    /// Importance assigned by the designer.
    pub designer_importance: f32,
    /// Importance of the character's current role.
    pub role_importance: f32,
    /// Importance of the surrounding situation.
    pub context_importance: f32,
    /// Weight of `player_focus`.
    pub alpha: f32,
    /// Weight of `designer_importance`.
    pub beta: f32,
    /// Weight of `role_importance`.
    pub gamma: f32,
    /// Weight of `context_importance`.
    pub delta: f32,
}

impl Default for ImportanceFactors {
    fn default() -> Self {
        Self {
            player_focus: 0.0,
            designer_importance: 0.0,
            role_importance: 0.0,
            context_importance: 0.0,
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
            delta: 1.0,
        }
    }
}

/// Inputs to the scheduling priority, with one weight per input.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriorityFactors {
    /// Grows while the character waits, in [0, 1].
    pub starvation_factor: f32,
    /// How often the character has run recently.
    pub run_counter: f32,
    /// Progress of the current activity, in [0, 1].
    pub completion_progress: f32,
    /// Weight of the overall importance.
    pub epsilon: f32,
    /// Weight of `starvation_factor`.
    pub zeta: f32,
    /// Weight of `run_counter` (subtracted).
    pub eta: f32,
    /// Weight of `completion_progress`.
    pub theta: f32,
}

impl Default for PriorityFactors {
    fn default() -> Self {
        Self {
            starvation_factor: 0.0,
            run_counter: 0.0,
            completion_progress: 0.0,
            epsilon: 1.0,
            zeta: 1.0,
            eta: 1.0,
            theta: 1.0,
        }
    }
}

/// Importance and priority of one character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportanceState {
    importance: ImportanceFactors,
    priority: PriorityFactors,
    starvation_rate: f32,
    completion_decay: f32,
}

impl Default for ImportanceState {
    fn default() -> Self {
        Self::new(ImportanceFactors::default(), PriorityFactors::default())
    }
}

impl ImportanceState {
    /// Create a state with the default starvation and completion rates.
    pub const fn new(importance: ImportanceFactors, priority: PriorityFactors) -> Self {
        Self {
            importance,
            priority,
            starvation_rate: DEFAULT_STARVATION_RATE,
            completion_decay: DEFAULT_COMPLETION_DECAY,
        }
    }

    /// Builder-style: override the per-second rates used by [`Self::advance`].
    /// Negative rates are treated as zero.
    #[must_use]
    pub fn with_rates(mut self, starvation_rate: f32, completion_decay: f32) -> Self {
        self.starvation_rate = starvation_rate.max(0.0);
        self.completion_decay = completion_decay.max(0.0);
        self
    }

    /// The importance inputs.
    pub const fn importance_factors(&self) -> &ImportanceFactors {
        &self.importance
    }

    /// The importance inputs, mutably.
    pub const fn importance_factors_mut(&mut self) -> &mut ImportanceFactors {
        &mut self.importance
    }

    /// The priority inputs.
    pub const fn priority_factors(&self) -> &PriorityFactors {
        &self.priority
    }

    /// The priority inputs, mutably.
    pub const fn priority_factors_mut(&mut self) -> &mut PriorityFactors {
        &mut self.priority
    }

    /// Set how much the player is focused on this character.
    pub const fn set_player_focus(&mut self, focus: f32) {
        self.importance.player_focus = focus;
    }

    /// Record one more run of this character. Resets starvation.
    pub fn record_run(&mut self) {
        self.priority.run_counter += 1.0;
        self.priority.starvation_factor = 0.0;
    }

    /// `clamp01((a*pf + b*di + g*ri + d*ci) / 4)`.
    pub fn overall_importance(&self) -> f32 {
        let f = &self.importance;
        let weighted = f.alpha.mul_add(
            f.player_focus,
            f.beta.mul_add(
                f.designer_importance,
                f.gamma
                    .mul_add(f.role_importance, f.delta * f.context_importance),
            ),
        );
        (weighted / 4.0).clamp(0.0, 1.0)
    }

    /// `clamp01(e*importance + z*starvation - h*run_counter + t*completion)`.
    pub fn priority(&self) -> f32 {
        let p = &self.priority;
        let score = p.epsilon.mul_add(
            self.overall_importance(),
            p.zeta.mul_add(
                p.starvation_factor,
                p.theta
                    .mul_add(p.completion_progress, -(p.eta * p.run_counter)),
            ),
        );
        score.clamp(0.0, 1.0)
    }

    /// Advance time by `delta_seconds`. Starvation grows and completion
    /// decays, both kept in [0, 1]. Negative deltas are ignored.
    pub fn advance(&mut self, delta_seconds: f32) {
        if delta_seconds <= 0.0 || !delta_seconds.is_finite() {
            return;
        }
        let p = &mut self.priority;
        p.starvation_factor = self
            .starvation_rate
            .mul_add(delta_seconds, p.starvation_factor)
            .clamp(0.0, 1.0);
        p.completion_progress = (-self.completion_decay)
            .mul_add(delta_seconds, p.completion_progress)
            .clamp(0.0, 1.0);
    }
}
