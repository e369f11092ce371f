//! Scenario runner for the Psyche NPC decision engine.
//!
//! Loads configuration and a scripted scenario, then delivers every
//! scripted stimulus to every character and logs what each one decides.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `psyche-config.yaml`
//! 3. Build the stimulus dispatcher
//! 4. Load `psyche-scenario.yaml`, or the built-in demo
//! 5. Build characters, groups, and stimuli
//! 6. Deliver each stimulus to each character with a seeded random source
//! 7. Log the final state

mod error;
mod scenario;

use std::path::Path;

use psyche_core::{CharacterManager, EngineConfig};
use psyche_types::{MbtiAxis, ModelKind};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::scenario::{Scenario, ScenarioFile};

/// Simulated seconds between two scripted stimuli.
const ROUND_SECONDS: f32 = 1.0;

/// Application entry point for the scenario runner.
///
/// # Errors
///
/// Returns an error if the config or scenario cannot be loaded or built.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("psyche-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        seed = config.seed,
        emotion_model = %config.decision.emotion_model,
        empty_effects = ?config.decision.empty_effects,
        base_weight = config.decision.base_weight,
        min_weight = config.decision.min_weight,
        "Configuration loaded"
    );

    // 3. Build the dispatcher.
    let dispatcher = config.dispatcher();
    info!(stimuli = dispatcher.len(), "Stimulus dispatcher ready");

    // 4-5. Load and build the scenario.
    let Scenario {
        mut characters,
        groups,
        stimuli,
    } = load_scenario()?.build(&config)?;
    for manager in &characters {
        log_profile(manager, config.decision.emotion_model);
    }

    // 6. Deliver stimuli.
    let mut rng = SmallRng::seed_from_u64(config.seed);
    for (round, scripted) in stimuli.iter().enumerate() {
        let stimulus = &scripted.stimulus;
        info!(
            round,
            stimulus = stimulus.name(),
            source = stimulus.source(),
            magnitude = stimulus.magnitude(),
            propagation = ?stimulus.propagation(),
            "Delivering stimulus"
        );

        for manager in &mut characters {
            if manager.character().name() == stimulus.source() {
                continue;
            }
            let chosen =
                manager.react_to(stimulus, &scripted.effects, &dispatcher, &groups, &mut rng);
            match chosen {
                Some(behavior) => {
                    info!(
                        character = manager.character().name(),
                        behavior = %behavior.kind,
                        "Behavior chosen"
                    );
                    if let Some(state) = manager.importance_state_mut() {
                        state.record_run();
                    }
                }
                None => info!(character = manager.character().name(), "No reaction"),
            }
            log_emotions(manager, config.decision.emotion_model);
        }

        for manager in &mut characters {
            if let Some(state) = manager.importance_state_mut() {
                state.advance(ROUND_SECONDS);
            }
        }
    }

    // 7. Final state.
    for manager in &characters {
        info!(
            character = manager.character().name(),
            importance = manager.importance(),
            priority = manager.priority(),
            relationships = manager.relationships().relationships().len(),
            "Final state"
        );
        for relationship in manager.relationships().relationships() {
            debug!(
                character = manager.character().name(),
                target = %relationship.target(),
                dominance = relationship.dominance(),
                agreeableness = relationship.agreeableness(),
                "Relationship"
            );
        }
    }

    info!(rounds = stimuli.len(), "psyche-engine finished");
    Ok(())
}

/// Load the engine configuration from `psyche-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = Path::new("psyche-config.yaml");
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}

/// Load the scripted scenario from `psyche-scenario.yaml`, falling back to
/// the built-in demo.
fn load_scenario() -> Result<ScenarioFile, EngineError> {
    let scenario_path = Path::new("psyche-scenario.yaml");
    if scenario_path.exists() {
        ScenarioFile::from_file(scenario_path)
    } else {
        info!("Scenario file not found, running the built-in demo");
        ScenarioFile::demo()
    }
}

fn log_profile(manager: &CharacterManager, emotion_model: ModelKind) {
    let character = manager.character();
    let poles: Vec<&str> = character
        .model(ModelKind::Mbti)
        .map(|mbti| {
            MbtiAxis::ALL
                .into_iter()
                .map(|axis| mbti.dominant_pole(axis.code()))
                .collect()
        })
        .unwrap_or_default();
    info!(
        character = character.name(),
        position = ?character.position,
        mbti = %poles.join("/"),
        roles = manager.roles().roles().len(),
        groups = manager.membership().groups().len(),
        "Character ready"
    );
    log_emotions(manager, emotion_model);
}

fn log_emotions(manager: &CharacterManager, emotion_model: ModelKind) {
    let Some(model) = manager.character().model(emotion_model) else {
        return;
    };
    let summary: Vec<String> = model
        .trait_names()
        .map(|name| format!("{name}={:.2}", model.trait_value(name)))
        .collect();
    debug!(
        character = manager.character().name(),
        model = %emotion_model,
        emotions = %summary.join(" "),
        "Emotion state"
    );
}
