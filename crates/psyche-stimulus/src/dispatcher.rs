//! Stimulus name -> candidate behavior table.
//!
//! A [`StimulusDispatcher`] is built once at startup, either from the
//! built-in table or from configuration, and then passed to whoever needs
//! it. The table is read-only after construction.

use std::collections::BTreeMap;

use psyche_types::BehaviorKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::behavior::Behavior;
use crate::stimulus::Stimulus;

/// One stimulus and its ordered candidate behaviors, as written in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusCatalogEntry {
    /// Stimulus name, matched against [`Stimulus::name`].
    pub stimulus: String,
    /// Candidates in selection order.
    pub behaviors: Vec<Behavior>,
}

/// Maps stimulus names to ordered candidate behaviors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StimulusDispatcher {
    table: BTreeMap<String, Vec<Behavior>>,
}

impl StimulusDispatcher {
    /// An empty dispatcher. Every lookup yields no candidates.
    pub const fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// The built-in table covering the six stock social stimuli.
    pub fn builtin() -> Self {
        use BehaviorKind as B;

        let mut table = BTreeMap::new();
        table.insert(
            String::from("NegativeComment"),
            vec![
                Behavior::new(B::Disagree),
                Behavior::new(B::Ignore),
                Behavior::new(B::Withdraw),
                Behavior::for_roles(B::Defend, ["Friend", "Family"]),
                Behavior::for_roles(B::Confront, ["Supervisor", "Rival"]),
            ],
        );
        table.insert(
            String::from("Compliment"),
            vec![
                Behavior::new(B::Smile),
                Behavior::new(B::Thank),
                Behavior::new(B::ComplimentBack),
                Behavior::new(B::Downplay),
                Behavior::new(B::Ignore),
            ],
        );
        table.insert(
            String::from("DistressObserved"),
            vec![
                Behavior::for_roles(B::Comfort, ["Friend", "Family", "Colleague"]),
                Behavior::new(B::OfferHelp),
                Behavior::new(B::Withdraw),
                Behavior::new(B::Ignore),
            ],
        );
        table.insert(
            String::from("HelpRequest"),
            vec![
                Behavior::new(B::OfferHelp),
                Behavior::new(B::Refuse),
                Behavior::for_roles(B::Comply, ["Subordinate", "Student"]),
                Behavior::new(B::Ignore),
            ],
        );
        table.insert(
            String::from("SocialInvitation"),
            vec![
                Behavior::new(B::Accept),
                Behavior::new(B::PolitelyDecline),
                Behavior::new(B::Refuse),
                Behavior::new(B::Postpone),
                Behavior::new(B::Ignore),
            ],
        );
        table.insert(
            String::from("GossipHeard"),
            vec![
                Behavior::new(B::SpreadGossip),
                Behavior::new(B::KeepSecret),
                Behavior::new(B::ConfrontSubject),
                Behavior::new(B::Ignore),
            ],
        );
        Self { table }
    }

    /// Build a dispatcher from configuration entries.
    ///
    /// A stimulus listed twice keeps its last entry.
    pub fn from_catalog(entries: impl IntoIterator<Item = StimulusCatalogEntry>) -> Self {
        let mut table = BTreeMap::new();
        for entry in entries {
            if table.insert(entry.stimulus.clone(), entry.behaviors).is_some() {
                warn!(stimulus = %entry.stimulus, "Stimulus listed twice in catalog, keeping the last entry");
            }
        }
        Self { table }
    }

    /// Candidate behaviors for a stimulus. Unknown stimuli yield an empty slice.
    pub fn candidates(&self, stimulus: &Stimulus) -> &[Behavior] {
        self.candidates_for(stimulus.name())
    }

    /// Candidate behaviors for a stimulus name.
    pub fn candidates_for(&self, stimulus_name: &str) -> &[Behavior] {
        self.table
            .get(stimulus_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every stimulus name the table knows, sorted.
    pub fn stimulus_names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Number of known stimuli.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use psyche_types::{Propagation, StimulusType};

    use super::*;

    #[test]
    fn builtin_covers_stock_stimuli() {
        let dispatcher = StimulusDispatcher::builtin();
        assert_eq!(dispatcher.len(), 6);

        let names: Vec<&str> = dispatcher
            .candidates_for("Compliment")
            .iter()
            .map(Behavior::name)
            .collect();
        assert_eq!(
            names,
            vec!["Smile", "Thank", "Compliment Back", "Downplay", "Ignore"]
        );

        let confront = dispatcher
            .candidates_for("NegativeComment")
            .iter()
            .find(|behavior| behavior.kind == BehaviorKind::Confront)
            .unwrap();
        assert_eq!(confront.associated_roles, vec!["Supervisor", "Rival"]);
    }

    #[test]
    fn unknown_stimulus_yields_empty_slice() {
        let dispatcher = StimulusDispatcher::builtin();
        let stimulus = Stimulus::new("Earthquake", StimulusType::Emotional, 1.0, "World", Propagation::Local);
        assert!(dispatcher.candidates(&stimulus).is_empty());
        assert!(StimulusDispatcher::empty().candidates_for("Compliment").is_empty());
    }

    #[test]
    fn catalog_parses_from_yaml() {
        let yaml = r"
- stimulus: Wave
  behaviors:
    - kind: Smile
    - kind: Wave Back
    - kind: Ignore
      associated_roles: [Stranger]
";
        let entries: Vec<StimulusCatalogEntry> = serde_yml::from_str(yaml).unwrap();
        let dispatcher = StimulusDispatcher::from_catalog(entries);
        let candidates = dispatcher.candidates_for("Wave");
        assert_eq!(candidates.len(), 3);
        assert_eq!(
            candidates.get(1).map(|behavior| &behavior.kind),
            Some(&BehaviorKind::Other(String::from("Wave Back")))
        );
        assert_eq!(candidates.get(2).unwrap().associated_roles, vec!["Stranger"]);
    }
}
