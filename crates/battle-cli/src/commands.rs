//! Non-interactive subcommands

use crate::app::seeded_rng;
use crate::config::GameConfig;
use crate::forms::describe;
use anyhow::{Context, Result};
use battle_core::{
    AttackKind, BattleEvent, BattleObserver, BattleSession, MonsterDraft, MonsterId, Outcome,
    ResolvedAttack, Side, StatUpdate,
};
use battle_db::Store;
use battle_script::RosterLoader;
use std::path::Path;
use std::time::Duration;

/// Print the roster names
pub fn list(store: &Store) -> Result<()> {
    let names = store.names()?;
    if names.is_empty() {
        println!("The roster is empty.");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Print every stat of every monster
pub fn show(store: &Store) -> Result<()> {
    for monster in store.list()? {
        println!("{}", describe(&monster));
    }
    Ok(())
}

pub fn add(store: &Store, draft: MonsterDraft) -> Result<()> {
    let monster = store.create(draft).context("could not add monster")?;
    println!("Monster '{}' added successfully ({}).", monster.name, monster.id);
    Ok(())
}

pub fn update(store: &Store, id: u32, update: StatUpdate) -> Result<()> {
    let monster = store
        .update(MonsterId::new(id), update)
        .context("could not update monster")?;
    println!("Monster '{}' updated successfully.", monster.name);
    Ok(())
}

pub fn delete(store: &Store, id: u32) -> Result<()> {
    let monster = store
        .delete(MonsterId::new(id))
        .context("could not delete monster")?;
    println!("Monster '{}' deleted successfully.", monster.name);
    Ok(())
}

pub fn migrate(store: &Store) -> Result<()> {
    let report = store.migrate_speed().context("speed migration failed")?;
    println!("{}", report);
    Ok(())
}

/// Load roster RON files and add the monsters that are not in the store yet
pub fn seed(store: &Store, path: &Path) -> Result<()> {
    let mut loader = RosterLoader::new();
    loader
        .load_path(path)
        .with_context(|| format!("could not load roster from {}", path.display()))?;
    let defs = loader.finish();
    let found = defs.len();
    let added = store.seed(defs.into_drafts())?;
    println!("Seeded {} of {} monsters from {}.", added, found, path.display());
    Ok(())
}

/// Prints each hit as it resolves
struct Narrator {
    names: [String; 2],
}

impl Narrator {
    fn name(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.names[0],
            Side::Enemy => &self.names[1],
        }
    }
}

impl BattleObserver for Narrator {
    fn on_attack(&mut self, attack: &ResolvedAttack) {
        println!(
            "{} used {} on {}: {} damage ({} -> {})",
            self.name(attack.attacker),
            attack.kind.label(),
            self.name(attack.defender()),
            attack.damage,
            attack.hp_before,
            attack.hp_after
        );
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        println!(
            "{} wins the battle after {} turns!",
            self.name(outcome.winner),
            outcome.turns
        );
    }
}

/// Fight a battle without the terminal UI
pub fn simulate(store: &Store, config: &GameConfig, player: u32, kind: AttackKind) -> Result<Outcome> {
    let id = MonsterId::new(player);
    let chosen = store
        .list()?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(battle_core::Error::UnknownMonster(id))
        .context("cannot start battle")?;

    let mut rng = seeded_rng(config.seed);
    let mut session = BattleSession::start(store, chosen, config.battle.clone(), &mut rng)
        .context("cannot start battle")?;

    println!(
        "{} vs {} ({})",
        session.player().monster.name,
        session.enemy().monster.name,
        session.policy()
    );
    let mut narrator = Narrator {
        names: [
            session.player().monster.name.clone(),
            session.enemy().monster.name.clone(),
        ],
    };
    let outcome = session.play_out(kind, Duration::from_millis(100), &mut narrator)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::TurnPolicy;

    fn store() -> Store {
        let store = Store::in_memory().unwrap();
        store.create(MonsterDraft::new("Pyro", "Fire", 100, 30, 20)).unwrap();
        store.create(MonsterDraft::new("Aqua", "Water", 100, 25, 15)).unwrap();
        store
    }

    #[test]
    fn test_simulate_scenario() {
        let store = store();
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        let outcome = simulate(&store, &config, 1, AttackKind::Normal).unwrap();
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.turns, 13);
    }

    #[test]
    fn test_simulate_every_policy_finishes() {
        let store = store();
        for policy in TurnPolicy::ALL {
            let mut config = GameConfig::default();
            config.battle.policy = policy;
            assert!(simulate(&store, &config, 2, AttackKind::Powerful).is_ok());
        }
    }

    #[test]
    fn test_simulate_needs_two_monsters() {
        let store = Store::in_memory().unwrap();
        let pyro = store.create(MonsterDraft::new("Pyro", "Fire", 100, 30, 20)).unwrap();
        let err = simulate(&store, &GameConfig::default(), pyro.id.raw(), AttackKind::Normal)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("at least 2"));
    }

    #[test]
    fn test_simulate_unknown_monster() {
        let err = simulate(&store(), &GameConfig::default(), 7, AttackKind::Normal).unwrap_err();
        assert!(format!("{:#}", err).contains("Monster not found in roster: monster:7"));
    }

    #[test]
    fn test_seed_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.ron");
        std::fs::write(
            &path,
            r#"(monsters: [
                (name: "Pyro", kind: "Fire", health: 100, attack: 30, defense: 20),
                (name: "Terra", kind: "Earth", health: 120, attack: 20, defense: 25),
            ])"#,
        )
        .unwrap();

        let store = store();
        seed(&store, &path).unwrap();
        assert_eq!(store.names().unwrap(), vec!["Pyro", "Aqua", "Terra"]);
    }
}
