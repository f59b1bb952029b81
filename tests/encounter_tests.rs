//! End-to-end encounter tests: catalog loading, configuration, replay,
//! and shared access.

use std::io::Write;
use std::thread;

use combat_tracker::{
    Ability, CombatEvent, CombatState, CombatantTemplate, Encounter, EncounterBuilder, Notice,
    NoticeLog, Phase, ScriptedDice, SharedEncounter, Spell, SpellTemplate, TemplateCatalog,
    TrackerConfig,
};

const BESTIARY: &str = r#"[
    {
        "name": "Goblin",
        "hp": 7,
        "ac": 15,
        "ability_scores": { "str": 8, "dex": 14, "con": 10, "int": 10, "wis": 8, "cha": 8 },
        "attacks": [
            { "name": "Scimitar", "damage": "1d6", "damage_type": "slashing", "to_hit_bonus": 4 }
        ]
    },
    {
        "name": "Acolyte",
        "hp": 9,
        "ac": 10,
        "known_spells": [{ "name": "Sacred Flame", "level": 0, "save_dc": 12,
                           "description": "Radiant flame with a blinding effect." }]
    }
]"#;

fn catalog() -> TemplateCatalog {
    let mut catalog = TemplateCatalog::new();
    let templates: Vec<CombatantTemplate> = serde_json::from_str(BESTIARY).unwrap();
    catalog.extend(templates);
    catalog
}

/// Play a short fixed script against an encounter.
fn play(encounter: &mut Encounter) {
    let goblin = encounter.add_from_catalog("goblin").unwrap();
    let acolyte = encounter.add_from_catalog("acolyte").unwrap();
    encounter.toggle_concentration(acolyte);
    encounter.roll_initiative();

    for _ in 0..6 {
        let acting = encounter.acting().unwrap().id;
        if acting == goblin {
            encounter.acting_attack("Scimitar", &[acolyte]);
        } else {
            encounter.acting_spell("Sacred Flame", &[goblin]);
        }
        encounter.end_turn();
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Stat blocks load from JSON and spawn independent instances.
#[test]
fn test_catalog_spawns_instances() {
    let mut encounter = EncounterBuilder::new().catalog(catalog()).build();

    let first = encounter.add_from_catalog("Goblin").unwrap();
    let second = encounter.add_from_catalog("GOBLIN").unwrap();
    encounter.modify_hp(-5, first);

    assert_eq!(encounter.combatant(first).unwrap().hit_points.current(), 2);
    assert_eq!(encounter.combatant(second).unwrap().hit_points.current(), 7);
    assert_eq!(encounter.combatant(second).unwrap().modifier(Ability::Dexterity), 2);
    assert_eq!(encounter.catalog().combatant("goblin").unwrap().hp_average, 7);
}

/// Spell-list records convert to known spells.
#[test]
fn test_spell_templates_cast() {
    let mut encounter = EncounterBuilder::new().dice(ScriptedDice::new([2])).build();
    encounter.catalog_mut().register_spell(SpellTemplate {
        name: "Bane".into(),
        level: 1,
        save_dc: 13,
        description: "A cursed effect dulls the target.".into(),
        damage_inflict: vec![],
        saving_throw: vec!["cha".into()],
    });
    let target = encounter.add_combatant(&CombatantTemplate::new("Guard", 11, 16));

    let spell: Spell = encounter.catalog().spell("bane").unwrap().into();
    let hits = encounter.resolve_spell(&spell, &[target]);

    assert_eq!(hits[0].damage, 2);
    assert!(encounter.combatant(target).unwrap().has_effect("Bane"));
}

// =============================================================================
// Configuration
// =============================================================================

/// Config files override only the keys they name.
#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 7\nspell_damage = \"2d4\"\ndefault_effect_rounds = 3").unwrap();

    let config = TrackerConfig::load(file.path()).unwrap();
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.unknown_source, "Unknown");

    let mut encounter = Encounter::new(config);
    let target = encounter.add_combatant(&CombatantTemplate::new("Guard", 11, 16));
    let hits = encounter.resolve_spell(&Spell::new("Hex", 1, "Curse effect."), &[target]);

    assert!((2..=8).contains(&hits[0].damage));
    assert_eq!(hits[0].effect.as_ref().unwrap().remaining_rounds, 3);
}

/// A missing config file is an I/O error, not a panic.
#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TrackerConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

// =============================================================================
// Replay and snapshots
// =============================================================================

/// The same seed and commands produce the same history.
#[test]
fn test_seeded_replay() {
    let config = TrackerConfig::default().with_seed(2024);
    let mut first = EncounterBuilder::new().config(config.clone()).catalog(catalog()).build();
    let mut second = EncounterBuilder::new().config(config).catalog(catalog()).build();

    play(&mut first);
    play(&mut second);

    assert_eq!(first.history(), second.history());
    assert_eq!(first.phase(), Phase::RolledInitiative);
    assert_eq!(first.round(), 4);
}

/// Concentration checks raised during play reach the notifier.
#[test]
fn test_play_notifies_concentration() {
    let log = NoticeLog::new();
    let mut encounter = EncounterBuilder::new()
        .config(TrackerConfig::default().with_seed(11))
        .catalog(catalog())
        .notifier(log.clone())
        .build();

    play(&mut encounter);

    let recorded = encounter
        .history()
        .iter()
        .filter(|r| matches!(r.event, CombatEvent::ConcentrationChecked(_)))
        .count();
    let notified = log
        .notices()
        .iter()
        .filter(|n| matches!(n, Notice::Concentration(_)))
        .count();
    assert_eq!(recorded, notified);
}

/// A serialized snapshot restores to the same encounter state.
#[test]
fn test_snapshot_serializes() {
    let mut encounter = EncounterBuilder::new()
        .config(TrackerConfig::default().with_seed(5))
        .catalog(catalog())
        .build();
    play(&mut encounter);

    let json = serde_json::to_string(&encounter.snapshot()).unwrap();
    let restored: CombatState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.order_ids(), encounter.state().order_ids());
    assert_eq!(restored.history(), encounter.history());
    assert_eq!(restored.round(), encounter.round());
    assert_eq!(restored.concentrating(), encounter.concentrating());
}

// =============================================================================
// Shared access
// =============================================================================

/// Commands from several threads are applied atomically.
#[test]
fn test_shared_encounter_threads() {
    let shared = SharedEncounter::new(
        EncounterBuilder::new()
            .config(TrackerConfig::default().with_seed(3))
            .catalog(catalog())
            .build(),
    );
    let ids: Vec<_> = (0..4)
        .map(|_| shared.with(|e| e.add_from_catalog("Goblin").unwrap()))
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.with(|e| e.toggle_concentration(id));
                shared.with(|e| e.modify_hp(3, id));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.concentrating().len(), 4);
    assert!(ids.iter().all(|&id| snapshot.get(id).unwrap().hit_points.current() == 7));
}
