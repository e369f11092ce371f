//! End-to-end decision scenarios through the public API.

#![allow(clippy::unwrap_used)]

use psyche_aspects::{Aspect, Character};
use psyche_core::{CharacterManager, DecisionMaker, EngineConfig};
use psyche_social::{GroupRegistry, Role, RoleGoal};
use psyche_stimulus::{Behavior, Stimulus, StimulusDispatcher, StimulusEffect};
use psyche_types::{
    AffectedSystem, BehaviorKind, CharacterId, ModelKind, Propagation, StimulusType,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn npc(name: &str, extraversion: f32, ei: f32) -> CharacterManager {
    let mut character = Character::new(name);
    character.add_aspect(Aspect::personality()).unwrap();
    character.add_aspect(Aspect::emotion(ModelKind::Ekman)).unwrap();
    character
        .model_mut(ModelKind::Ffm)
        .unwrap()
        .add_trait("Extraversion", Some(extraversion))
        .unwrap();
    character.model_mut(ModelKind::Mbti).unwrap().set_trait_value("EI", ei);
    let ekman = character.model_mut(ModelKind::Ekman).unwrap();
    ekman.add_trait("Joy", Some(0.0)).unwrap();
    ekman.add_trait("Anger", Some(0.0)).unwrap();
    CharacterManager::from_character(character, DecisionMaker::default())
}

fn direct(name: &str, kind: impl Into<psyche_types::StimulusTypes>) -> Stimulus {
    Stimulus::new(name, kind, 1.0, "Player", Propagation::Direct)
}

#[test]
fn extravert_mostly_smiles() {
    let manager = npc("Bard", 1.0, 0.8);
    let candidates = [
        Behavior::new(BehaviorKind::Smile),
        Behavior::new(BehaviorKind::Withdraw),
    ];
    let mut rng = SmallRng::seed_from_u64(42);

    let smiles = (0..1000)
        .filter_map(|_| {
            manager.decision_maker().select_behavior(
                manager.character(),
                manager.roles(),
                &candidates,
                &mut rng,
            )
        })
        .filter(|chosen| chosen.kind == BehaviorKind::Smile)
        .count();
    assert!(smiles > 900, "smiles = {smiles}");
}

#[test]
fn goal_effect_raises_priority() {
    let mut manager = npc("Farmer", 0.5, 0.5);
    let owner = manager.character().id();
    let mut survivor = Role::new("Survivor", owner).with_importance(1.0);
    survivor.add_goal(RoleGoal::with_priority("SecureFood", 0.5));
    manager.roles_mut().add_role(survivor).unwrap();

    let groups = GroupRegistry::new();
    let famine = direct("FamineRumor", StimulusType::Social);
    let effects = [StimulusEffect::new(AffectedSystem::GoalPlanning, "SecureFood", 0.3)];
    let mut rng = SmallRng::seed_from_u64(42);
    let chosen = manager.process_stimulus(&famine, &effects, &[], 1.0, &groups, &mut rng);
    assert!(chosen.is_none());

    let goal = manager.roles().role("Survivor").unwrap().goal("SecureFood").unwrap();
    assert!(approx(goal.priority, 0.8));
}

#[test]
fn relationship_dominance_accumulates_and_clamps() {
    let mut manager = npc("Squire", 0.5, 0.5);
    let knight = CharacterId::new();
    manager.relationships_mut().add_relationship(knight).unwrap();

    let groups = GroupRegistry::new();
    let order = direct("OrderGiven", StimulusType::Social);
    let effects = [StimulusEffect::new(AffectedSystem::Relationship, "Dominance", 0.4)
        .toward_character(knight)];
    let mut rng = SmallRng::seed_from_u64(42);

    let _ = manager.process_stimulus(&order, &effects, &[], 1.0, &groups, &mut rng);
    let dominance = manager.relationships().relationship(knight).unwrap().dominance();
    assert!(approx(dominance, 0.4));

    for _ in 0..3 {
        let _ = manager.process_stimulus(&order, &effects, &[], 1.0, &groups, &mut rng);
    }
    let dominance = manager.relationships().relationship(knight).unwrap().dominance();
    assert!(approx(dominance, 1.0));
}

#[test]
fn failed_gate_applies_nothing() {
    let mut manager = npc("Hermit", 0.5, 0.5);
    let groups = GroupRegistry::new();
    let insult = direct("NegativeComment", StimulusType::Social | StimulusType::Emotional);
    let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Anger", 0.0)];
    let dispatcher = StimulusDispatcher::builtin();
    let mut rng = SmallRng::seed_from_u64(42);

    let chosen = manager.process_stimulus(
        &insult,
        &effects,
        dispatcher.candidates(&insult),
        1.0,
        &groups,
        &mut rng,
    );
    assert!(chosen.is_none());
}

#[test]
fn role_filter_can_empty_the_candidate_set() {
    let mut manager = npc("Clerk", 0.5, 0.5);
    let owner = manager.character().id();
    manager.roles_mut().add_role(Role::new("Merchant", owner)).unwrap();

    let groups = GroupRegistry::new();
    let insult = direct("NegativeComment", StimulusType::Social);
    let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Anger", 0.2)];
    let candidates = [
        Behavior::for_roles(BehaviorKind::Defend, ["Friend", "Family"]),
        Behavior::for_roles(BehaviorKind::Confront, ["Supervisor", "Rival"]),
    ];
    let mut rng = SmallRng::seed_from_u64(42);

    let chosen = manager.process_stimulus(&insult, &effects, &candidates, 1.0, &groups, &mut rng);
    assert!(chosen.is_none());
    // The gate passed, so the effect still landed.
    let anger = manager.character().trait_value(ModelKind::Ekman, "Anger").unwrap();
    assert!(approx(anger, 0.2));
}

#[test]
fn compliment_through_full_pipeline() {
    let config = EngineConfig::default();
    let dispatcher = config.dispatcher();
    let mut manager = npc("Innkeeper", 0.9, 0.7);
    let groups = GroupRegistry::new();
    let compliment = direct("Compliment", StimulusType::Social | StimulusType::Emotional);
    let effects = [StimulusEffect::new(AffectedSystem::Emotion, "Joy", 0.3)
        .modulated_by("Extraversion", 0.5)];
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let chosen = manager
        .react_to(&compliment, &effects, &dispatcher, &groups, &mut rng)
        .unwrap();
    assert!(
        dispatcher
            .candidates(&compliment)
            .iter()
            .any(|candidate| candidate == chosen)
    );
    // 0.3 * (1 + 0.5 * 0.9)
    let joy = manager.character().trait_value(ModelKind::Ekman, "Joy").unwrap();
    assert!(approx(joy, 0.435));
}

#[test]
fn group_broadcast_shifts_member_relationships() {
    let mut groups = GroupRegistry::new();
    let guild = groups.create_group("Guild").unwrap();

    let mut speaker = npc("Speaker", 0.5, 0.5);
    let mut listener = npc("Listener", 0.5, 0.5);
    let listener_id = listener.character().id();
    listener.membership_mut().join(&mut groups, guild).unwrap();
    speaker.membership_mut().join(&mut groups, guild).unwrap();
    speaker.relationships_mut().add_relationship(listener_id).unwrap();

    let news = Stimulus::new("GuildVote", StimulusType::Social, 0.5, "Guildmaster", Propagation::Broadcast)
        .for_group("Guild");
    let effects = [StimulusEffect::new(AffectedSystem::Relationship, "Agreeableness", 0.4)
        .toward_group(guild)];
    let dispatcher = StimulusDispatcher::empty();
    let mut rng = SmallRng::seed_from_u64(42);

    let _ = speaker.react_to(&news, &effects, &dispatcher, &groups, &mut rng);
    let agreeableness = speaker
        .relationships()
        .relationship(listener_id)
        .unwrap()
        .agreeableness();
    assert!(approx(agreeableness, 0.2));
}
