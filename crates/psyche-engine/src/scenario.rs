//! Scripted scenarios: who is in the scene and what happens to them.
//!
//! A scenario file (`psyche-scenario.yaml`) lists characters with their
//! personality and emotion values, roles, relationships, and groups, then
//! a sequence of stimuli with their effects. Names are resolved to ids
//! when the scenario is built, so the YAML never mentions UUIDs.

use std::collections::BTreeMap;
use std::path::Path;

use psyche_aspects::{Aspect, Character};
use psyche_core::{CharacterManager, EngineConfig, ImportanceFactors, PriorityFactors};
use psyche_social::{GroupRegistry, Role, RoleAction, RoleGoal};
use psyche_stimulus::{Stimulus, StimulusEffect};
use psyche_types::{
    AffectedSystem, CharacterId, MbtiAxis, ModelKind, Position, Propagation, StimulusType,
    StimulusTypes,
};
use serde::Deserialize;
use tracing::info;

use crate::error::EngineError;

/// The scenario used when no scenario file is present: an innkeeper and a
/// guard receive a compliment, then the innkeeper hears a negative comment.
const DEMO_SCENARIO: &str = r"
groups: [Villagers]
characters:
  - name: Mira
    personality:
      ffm: { Extraversion: 0.8, Agreeableness: 0.7, Neuroticism: 0.3 }
      mbti: { EI: 0.6, TF: -0.4 }
    emotions: { Joy: 0.2, Anger: 0.0, Sadness: 0.1 }
    roles:
      - name: Friend
        importance: 0.8
        goals:
          - { description: KeepPeace, priority: 0.5 }
    relationships: [Bram]
    groups: [Villagers]
    importance: { player_focus: 0.9, designer_importance: 0.7 }
  - name: Bram
    position: { x: 4.0, y: 0.0, z: 0.0 }
    personality:
      ffm: { Extraversion: 0.2, Agreeableness: 0.3, Neuroticism: 0.8, Conscientiousness: 0.7 }
      mbti: { EI: -0.7, TF: 0.5, JP: 0.6 }
    emotions: { Joy: 0.0, Anger: 0.3, Fear: 0.2 }
    roles:
      - name: Rival
        importance: 0.6
    relationships: [Mira]
    groups: [Villagers]
stimuli:
  - name: Compliment
    types: [Social, Emotional]
    magnitude: 0.8
    source: Player
    propagation: Direct
    effects:
      - { system: Emotion, trait: Joy, magnitude: 0.3, modulator: Extraversion, strength: 0.5 }
  - name: NegativeComment
    types: [Social, Emotional]
    magnitude: 0.9
    source: Player
    propagation: Local
    position: { x: 0.0, y: 0.0, z: 0.0 }
    falloff_radius: 10.0
    effects:
      - { system: Emotion, trait: Anger, magnitude: 0.4, modulator: Neuroticism, strength: 0.5 }
      - { system: Relationship, trait: Agreeableness, magnitude: -0.2, target_group: Villagers }
";

// -----------------------------------------------------------------------
// File schema
// -----------------------------------------------------------------------

/// A scenario as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScenarioFile {
    /// Groups to create up front. Groups named by characters are created
    /// on demand as well.
    #[serde(default)]
    pub groups: Vec<String>,

    /// The cast.
    #[serde(default)]
    pub characters: Vec<CharacterSpec>,

    /// Stimuli delivered in order to every character.
    #[serde(default)]
    pub stimuli: Vec<StimulusSpec>,
}

/// One character.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CharacterSpec {
    /// Unique name, used to refer to the character elsewhere in the file.
    pub name: String,
    /// Where the character stands.
    #[serde(default)]
    pub position: Position,
    /// FFM and MBTI values.
    #[serde(default)]
    pub personality: PersonalitySpec,
    /// Top-level emotion values for the configured emotion model.
    #[serde(default)]
    pub emotions: BTreeMap<String, f32>,
    /// Weighted sub-emotions, attached in order.
    #[serde(default)]
    pub sub_emotions: Vec<SubTraitSpec>,
    /// Roles the character holds.
    #[serde(default)]
    pub roles: Vec<RoleSpec>,
    /// Names of characters this character has a relationship with.
    #[serde(default)]
    pub relationships: Vec<String>,
    /// Names of groups the character belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Importance inputs. No importance state is attached when absent.
    #[serde(default)]
    pub importance: Option<ImportanceFactors>,
}

/// Personality values keyed by FFM factor name and MBTI axis code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersonalitySpec {
    /// FFM factors, e.g. `Extraversion: 0.8`.
    #[serde(default)]
    pub ffm: BTreeMap<String, f32>,
    /// MBTI axes, e.g. `EI: -0.5`.
    #[serde(default)]
    pub mbti: BTreeMap<String, f32>,
}

/// A weighted sub-trait under an emotion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubTraitSpec {
    /// The registered parent trait.
    pub parent: String,
    /// The sub-trait name.
    pub name: String,
    /// Contribution to the parent's computed value.
    pub weight: f32,
    /// Initial value.
    #[serde(default)]
    pub value: Option<f32>,
}

/// A role with its goals and actions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleSpec {
    /// Role name, matched against behavior role restrictions.
    pub name: String,
    /// Role importance.
    #[serde(default = "default_one")]
    pub importance: f32,
    /// Goals of the role.
    #[serde(default)]
    pub goals: Vec<GoalSpec>,
    /// Names of actions the role offers.
    #[serde(default)]
    pub actions: Vec<String>,
}

/// A role goal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoalSpec {
    /// Goal description, matched by goal-planning effects.
    pub description: String,
    /// Goal priority.
    #[serde(default = "default_one")]
    pub priority: f32,
}

/// Stimulus classification flags as written in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StimulusTypeSpec {
    /// [`StimulusType::Emotional`].
    Emotional,
    /// [`StimulusType::Social`].
    Social,
}

impl From<StimulusTypeSpec> for StimulusType {
    fn from(spec: StimulusTypeSpec) -> Self {
        match spec {
            StimulusTypeSpec::Emotional => Self::Emotional,
            StimulusTypeSpec::Social => Self::Social,
        }
    }
}

/// One scripted stimulus.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StimulusSpec {
    /// Stimulus name, used for candidate lookup.
    pub name: String,
    /// Classification flags.
    #[serde(default)]
    pub types: Vec<StimulusTypeSpec>,
    /// Intensity in [0, 1].
    pub magnitude: f32,
    /// Free-form origin. A character with this name does not react.
    #[serde(default)]
    pub source: String,
    /// How the stimulus spreads.
    pub propagation: Propagation,
    /// Origin, for local stimuli.
    #[serde(default)]
    pub position: Position,
    /// Radius, for local stimuli.
    #[serde(default)]
    pub falloff_radius: f32,
    /// Group restriction, for broadcast stimuli.
    #[serde(default)]
    pub target_group: Option<String>,
    /// What the stimulus changes.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

/// One stimulus effect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectSpec {
    /// The subsystem to modify.
    pub system: AffectedSystem,
    /// Emotion trait, social variable, or goal description.
    #[serde(rename = "trait")]
    pub affected_trait: String,
    /// Unscaled magnitude.
    pub magnitude: f32,
    /// FFM factor scaling the effect.
    #[serde(default)]
    pub modulator: Option<String>,
    /// How strongly the modulator scales the effect.
    #[serde(default)]
    pub strength: f32,
    /// Character name a relationship effect targets.
    #[serde(default)]
    pub target_character: Option<String>,
    /// Group name a relationship effect targets.
    #[serde(default)]
    pub target_group: Option<String>,
    /// Goal recorded with the effect.
    #[serde(default)]
    pub goal: Option<String>,
}

const fn default_one() -> f32 {
    1.0
}

// -----------------------------------------------------------------------
// Built scenario
// -----------------------------------------------------------------------

/// A stimulus ready for delivery, with its resolved effects.
#[derive(Debug, Clone)]
pub struct ScriptedStimulus {
    /// The stimulus.
    pub stimulus: Stimulus,
    /// Its effects, with targets resolved to ids.
    pub effects: Vec<StimulusEffect>,
}

/// A scenario with every name resolved.
#[derive(Debug)]
pub struct Scenario {
    /// One manager per character, in file order.
    pub characters: Vec<CharacterManager>,
    /// The shared group registry.
    pub groups: GroupRegistry,
    /// Stimuli in delivery order.
    pub stimuli: Vec<ScriptedStimulus>,
}

impl ScenarioFile {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read, or
    /// [`EngineError::Yaml`] if the content does not match the schema.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Yaml`] if the string does not match the schema.
    pub fn parse(yaml: &str) -> Result<Self, EngineError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// The built-in demo scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Yaml`] if the embedded demo fails to parse.
    pub fn demo() -> Result<Self, EngineError> {
        Self::parse(DEMO_SCENARIO)
    }

    /// Resolve names and build every character, group, and stimulus.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Aspect`] or [`EngineError::Social`] when a
    /// trait, role, relationship, or group is rejected, and
    /// [`EngineError::Scenario`] when a name refers to nothing.
    pub fn build(&self, config: &EngineConfig) -> Result<Scenario, EngineError> {
        let mut groups = GroupRegistry::new();
        for name in &self.groups {
            ensure_group(&mut groups, name)?;
        }

        let mut characters = Vec::with_capacity(self.characters.len());
        let mut ids: BTreeMap<&str, CharacterId> = BTreeMap::new();
        for spec in &self.characters {
            let manager = build_character(spec, config, &mut groups)?;
            if ids.insert(spec.name.as_str(), manager.character().id()).is_some() {
                return Err(scenario_error(format!("character `{}` defined twice", spec.name)));
            }
            characters.push(manager);
        }

        for (spec, manager) in self.characters.iter().zip(characters.iter_mut()) {
            for other in &spec.relationships {
                let target = lookup(&ids, other)?;
                manager.relationships_mut().add_relationship(target)?;
            }
        }

        let stimuli = self
            .stimuli
            .iter()
            .map(|spec| build_stimulus(spec, &ids, &groups))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            characters = characters.len(),
            groups = groups.groups().count(),
            stimuli = stimuli.len(),
            "Scenario built"
        );
        Ok(Scenario {
            characters,
            groups,
            stimuli,
        })
    }
}

fn build_character(
    spec: &CharacterSpec,
    config: &EngineConfig,
    groups: &mut GroupRegistry,
) -> Result<CharacterManager, EngineError> {
    let emotion_model = config.decision.emotion_model;
    let mut character = Character::at(spec.name.as_str(), spec.position);
    character.add_aspect(Aspect::personality())?;
    character.add_aspect(Aspect::emotion(emotion_model))?;

    if let Some(ffm) = character.model_mut(ModelKind::Ffm) {
        for (name, value) in &spec.personality.ffm {
            ffm.add_trait(name, Some(*value))?;
        }
    }
    if let Some(mbti) = character.model_mut(ModelKind::Mbti) {
        for (code, value) in &spec.personality.mbti {
            if MbtiAxis::from_code(code).is_none() {
                return Err(scenario_error(format!(
                    "`{}` has unknown MBTI axis `{code}`",
                    spec.name
                )));
            }
            mbti.set_trait_value(code, *value);
        }
    }
    if let Some(emotions) = character.model_mut(emotion_model) {
        for (name, value) in &spec.emotions {
            emotions.add_trait(name, Some(*value))?;
        }
        for sub in &spec.sub_emotions {
            emotions.add_sub_trait(&sub.parent, &sub.name, sub.weight, sub.value)?;
        }
    }

    let mut manager = CharacterManager::from_character(character, config.decision_maker());
    let owner = manager.character().id();
    for role_spec in &spec.roles {
        let mut role = Role::new(role_spec.name.as_str(), owner).with_importance(role_spec.importance);
        for goal in &role_spec.goals {
            role.add_goal(RoleGoal::with_priority(goal.description.as_str(), goal.priority));
        }
        for action in &role_spec.actions {
            role.add_action(RoleAction::new(action.as_str()));
        }
        manager.roles_mut().add_role(role)?;
    }

    for name in &spec.groups {
        let group = ensure_group(groups, name)?;
        manager.membership_mut().join(groups, group)?;
    }

    if let Some(factors) = spec.importance {
        manager.set_importance(config.importance.state(factors, PriorityFactors::default()));
    }
    Ok(manager)
}

fn build_stimulus(
    spec: &StimulusSpec,
    ids: &BTreeMap<&str, CharacterId>,
    groups: &GroupRegistry,
) -> Result<ScriptedStimulus, EngineError> {
    let types: StimulusTypes = spec
        .types
        .iter()
        .fold(StimulusTypes::default(), |acc, kind| acc | StimulusType::from(*kind));
    let mut stimulus = Stimulus::new(
        spec.name.as_str(),
        types,
        spec.magnitude,
        spec.source.as_str(),
        spec.propagation,
    )
    .at(spec.position)
    .with_falloff(spec.falloff_radius);
    if let Some(group) = &spec.target_group {
        stimulus = stimulus.for_group(group.as_str());
    }

    let mut effects = Vec::with_capacity(spec.effects.len());
    for effect_spec in &spec.effects {
        let mut effect = StimulusEffect::new(
            effect_spec.system,
            effect_spec.affected_trait.as_str(),
            effect_spec.magnitude,
        );
        if let Some(modulator) = &effect_spec.modulator {
            effect = effect.modulated_by(modulator.as_str(), effect_spec.strength);
        }
        if let Some(name) = &effect_spec.target_character {
            effect = effect.toward_character(lookup(ids, name)?);
        }
        if let Some(name) = &effect_spec.target_group {
            let group = groups
                .group_by_name(name)
                .ok_or_else(|| scenario_error(format!("unknown group `{name}`")))?;
            effect = effect.toward_group(group.id());
        }
        if let Some(goal) = &effect_spec.goal {
            effect = effect.with_affected_goal(goal.as_str());
        }
        effects.push(effect);
    }

    Ok(ScriptedStimulus { stimulus, effects })
}

fn ensure_group(groups: &mut GroupRegistry, name: &str) -> Result<psyche_types::GroupId, EngineError> {
    if let Some(existing) = groups.group_by_name(name) {
        return Ok(existing.id());
    }
    Ok(groups.create_group(name)?)
}

fn lookup(ids: &BTreeMap<&str, CharacterId>, name: &str) -> Result<CharacterId, EngineError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| scenario_error(format!("unknown character `{name}`")))
}

fn scenario_error(message: String) -> EngineError {
    EngineError::Scenario { message }
}
