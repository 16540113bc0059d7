//! The battle state machine
//!
//! A [`BattleSession`] owns two combatant snapshots and their health
//! counters and resolves turns according to its [`TurnPolicy`]:
//!
//! ```text
//! Alternating:  AwaitingInput --attack--> AwaitingEnemyTurn --delay--> AwaitingInput
//! Animated:     AwaitingInput --attack--> ResolvingAttack --hold--> AwaitingEnemyTurn
//!               AwaitingEnemyTurn --delay--> ResolvingAttack --hold--> AwaitingInput
//! Speed:        Cooldown --cooldown elapsed--> attack --> Cooldown
//! any phase --health <= 0--> Terminal
//! ```
//!
//! Player intents arrive through [`BattleSession::submit`]; everything that
//! happens with the passing of time arrives through
//! [`BattleSession::advance`]. Neither blocks.

use crate::effect::script_duration;
use crate::error::{Error, Result};
use crate::roster::{fetch, select_opponent};
use crate::time::Cooldown;
use crate::{
    resolve_attack, AttackKind, BattleConfig, BattleEvent, BattleObserver, GameRng, Intent,
    Monster, Outcome, ResolvedAttack, Roster, Side, TurnPolicy,
};
use std::time::Duration;

/// Where the session is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player's attack
    AwaitingInput,
    /// An attack landed and its presentation is being held
    ResolvingAttack,
    /// The enemy counter-attacks once its delay has elapsed
    AwaitingEnemyTurn,
    /// Speed policies: attacks are gated by cooldown timers only
    Cooldown,
    /// One side is down; no further intents are accepted
    Terminal,
}

/// A monster snapshot and its mutable health counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub monster: Monster,
    pub hp: i32,
}

impl Combatant {
    pub fn new(monster: Monster) -> Self {
        let hp = monster.health;
        Self { monster, hp }
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }

    /// Remaining health as a fraction of the maximum, clamped to `[0, 1]`
    pub fn hp_fraction(&self) -> f64 {
        if self.monster.health <= 0 {
            return 0.0;
        }
        (self.hp as f64 / self.monster.health as f64).clamp(0.0, 1.0)
    }
}

/// A single battle from monster choice to a winner
#[derive(Debug, Clone)]
pub struct BattleSession {
    player: Combatant,
    enemy: Combatant,
    config: BattleConfig,
    phase: Phase,
    turn_owner: Side,
    /// Enemy delay or resolution hold, depending on the phase
    timer: Cooldown,
    /// Speed policies only, indexed by [`side_index`]
    cooldowns: [Cooldown; 2],
    /// Decided once at construction
    faster: Side,
    turns: u32,
    outcome: Option<Outcome>,
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}

impl BattleSession {
    /// Create a session between two roster records
    pub fn new(player: Monster, enemy: Monster, config: BattleConfig) -> Result<Self> {
        if player.id == enemy.id {
            return Err(Error::SameCombatant(player.id));
        }
        for monster in [&player, &enemy] {
            if !monster.is_selectable() {
                return Err(Error::NotSelectable(monster.id));
            }
        }

        let faster = if player.speed >= enemy.speed {
            Side::Player
        } else {
            Side::Enemy
        };

        let policy = config.policy;
        let (phase, turn_owner) = if policy.takes_input() {
            (Phase::AwaitingInput, Side::Player)
        } else {
            (Phase::Cooldown, faster)
        };

        let cooldowns = match policy {
            TurnPolicy::SpeedGatedTwoSided => [
                Cooldown::ready(config.cooldown_for_speed(player.speed)),
                Cooldown::ready(config.cooldown_for_speed(enemy.speed)),
            ],
            _ => [Cooldown::ready(config.attack_cooldown()); 2],
        };

        tracing::info!(
            "Battle start ({}): {} [{} hp] vs {} [{} hp]",
            policy,
            player.name,
            player.health,
            enemy.name,
            enemy.health
        );

        Ok(Self {
            player: Combatant::new(player),
            enemy: Combatant::new(enemy),
            timer: Cooldown::new(config.enemy_delay()),
            config,
            phase,
            turn_owner,
            cooldowns,
            faster,
            turns: 0,
            outcome: None,
        })
    }

    /// Start a battle for the monster picked from the selection list
    ///
    /// The caller lists the roster once to build that selection; this lists
    /// it once more for the opponent pool, from which an opponent is sampled.
    pub fn start<R: Roster + ?Sized>(
        roster: &R,
        chosen: Monster,
        config: BattleConfig,
        rng: &mut GameRng,
    ) -> Result<Self> {
        if !chosen.is_selectable() {
            return Err(Error::NotSelectable(chosen.id));
        }
        let pool = fetch(roster)?;
        let enemy = select_opponent(&pool, chosen.id, rng)?;
        Self::new(chosen, enemy, config)
    }

    /// Forward a player intent
    pub fn submit(
        &mut self,
        intent: Intent,
        observer: &mut dyn BattleObserver,
    ) -> Result<Vec<BattleEvent>> {
        if self.phase == Phase::Terminal {
            return Err(Error::BattleOver);
        }
        if !self.config.policy.takes_input() {
            return Err(Error::NoInput(self.config.policy));
        }
        if self.phase != Phase::AwaitingInput {
            return Err(Error::NotPlayerTurn(self.turn_owner));
        }

        let mut events = Vec::new();
        let Intent::Attack(kind) = intent;
        let hit = self.strike(Side::Player, kind, observer);
        events.push(BattleEvent::Attack(hit));
        if self.check_terminal(observer, &mut events) {
            return Ok(events);
        }

        match self.config.policy {
            TurnPolicy::Animated => self.hold_resolution(),
            _ => self.pass_to_enemy(&mut events),
        }
        Ok(events)
    }

    /// Account for elapsed time
    pub fn advance(
        &mut self,
        elapsed: Duration,
        observer: &mut dyn BattleObserver,
    ) -> Result<Vec<BattleEvent>> {
        let mut events = Vec::new();

        match self.phase {
            Phase::AwaitingInput | Phase::Terminal => {}
            Phase::ResolvingAttack => {
                self.timer.advance(elapsed);
                if self.timer.fire() {
                    match self.turn_owner {
                        Side::Player => self.pass_to_enemy(&mut events),
                        Side::Enemy => self.pass_to_player(&mut events),
                    }
                }
            }
            Phase::AwaitingEnemyTurn => {
                self.timer.advance(elapsed);
                if self.timer.fire() {
                    let hit = self.strike(Side::Enemy, AttackKind::Normal, observer);
                    events.push(BattleEvent::Attack(hit));
                    if self.check_terminal(observer, &mut events) {
                        return Ok(events);
                    }
                    match self.config.policy {
                        TurnPolicy::Animated => self.hold_resolution(),
                        _ => self.pass_to_player(&mut events),
                    }
                }
            }
            Phase::Cooldown => self.advance_cooldowns(elapsed, observer, &mut events),
        }
        Ok(events)
    }

    /// Drive the session to its end without a shell
    ///
    /// Uses `kind` for every player turn and advances time in `tick` steps.
    pub fn play_out(
        &mut self,
        kind: AttackKind,
        tick: Duration,
        observer: &mut dyn BattleObserver,
    ) -> Result<Outcome> {
        let tick = tick.max(Duration::from_millis(1));
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            if self.phase == Phase::AwaitingInput {
                self.submit(Intent::Attack(kind), observer)?;
            } else {
                self.advance(tick, observer)?;
            }
        }
    }

    fn advance_cooldowns(
        &mut self,
        elapsed: Duration,
        observer: &mut dyn BattleObserver,
        events: &mut Vec<BattleEvent>,
    ) {
        let order = [self.faster, self.faster.opponent()];
        let sides = match self.config.policy {
            TurnPolicy::SpeedGatedTwoSided => &order[..],
            _ => &order[..1],
        };

        for &side in sides {
            self.cooldowns[side_index(side)].advance(elapsed);
        }
        for &side in sides {
            if self.cooldowns[side_index(side)].fire() {
                self.turn_owner = side;
                let hit = self.strike(side, AttackKind::Normal, observer);
                events.push(BattleEvent::Attack(hit));
                if self.check_terminal(observer, events) {
                    return;
                }
            }
        }
    }

    fn strike(
        &mut self,
        attacker: Side,
        kind: AttackKind,
        observer: &mut dyn BattleObserver,
    ) -> ResolvedAttack {
        let damage = resolve_attack(
            &self.combatant(attacker).monster,
            &self.combatant(attacker.opponent()).monster,
            kind,
        );
        let defender = self.combatant_mut(attacker.opponent());
        let hp_before = defender.hp;
        defender.hp = hp_before.saturating_sub(damage);

        let hit = ResolvedAttack {
            attacker,
            kind,
            damage,
            hp_before,
            hp_after: defender.hp,
        };
        self.turns += 1;

        tracing::info!(
            "{} used {:?} on {}: {} damage ({} -> {})",
            self.combatant(attacker).monster.name,
            kind,
            self.combatant(attacker.opponent()).monster.name,
            damage,
            hit.hp_before,
            hit.hp_after
        );
        observer.on_attack(&hit);
        hit
    }

    /// Returns true if this call moved the session to `Terminal`
    fn check_terminal(
        &mut self,
        observer: &mut dyn BattleObserver,
        events: &mut Vec<BattleEvent>,
    ) -> bool {
        if self.phase == Phase::Terminal {
            return false;
        }
        if !self.player.is_down() && !self.enemy.is_down() {
            return false;
        }

        // Both down at once: the enemy side is the one that loses
        let winner = if self.player.is_down() && !self.enemy.is_down() {
            Side::Enemy
        } else {
            Side::Player
        };
        let outcome = Outcome {
            winner,
            loser: winner.opponent(),
            turns: self.turns,
        };

        self.phase = Phase::Terminal;
        self.outcome = Some(outcome);
        tracing::info!(
            "{} wins the battle after {} turns",
            self.combatant(winner).monster.name,
            outcome.turns
        );
        observer.on_finish(&outcome);
        events.push(BattleEvent::Finished(outcome));
        true
    }

    fn pass_to_enemy(&mut self, events: &mut Vec<BattleEvent>) {
        self.phase = Phase::AwaitingEnemyTurn;
        self.turn_owner = Side::Enemy;
        self.timer = Cooldown::new(self.config.enemy_delay());
        tracing::debug!("Turn passed to {}", self.enemy.monster.name);
        events.push(BattleEvent::TurnPassed { to: Side::Enemy });
    }

    fn pass_to_player(&mut self, events: &mut Vec<BattleEvent>) {
        self.phase = Phase::AwaitingInput;
        self.turn_owner = Side::Player;
        tracing::debug!("Turn passed to {}", self.player.monster.name);
        events.push(BattleEvent::TurnPassed { to: Side::Player });
    }

    fn hold_resolution(&mut self) {
        self.phase = Phase::ResolvingAttack;
        self.timer = Cooldown::new(script_duration(self.config.policy));
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose action comes next (or came last, while resolving)
    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    /// Side with the higher speed (ties go to the player)
    pub fn faster(&self) -> Side {
        self.faster
    }

    pub fn policy(&self) -> TurnPolicy {
        self.config.policy
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonsterDraft, MonsterId, Recorder};
    use std::cell::Cell;
    use std::convert::Infallible;

    const TICK: Duration = Duration::from_millis(100);

    fn monster(id: u32, health: i32, attack: i32, defense: i32, speed: i32) -> Monster {
        Monster::from_draft(
            MonsterId::new(id),
            MonsterDraft::new(format!("m{}", id), "Fire", health, attack, defense).with_speed(speed),
        )
    }

    fn scenario(policy: TurnPolicy) -> BattleSession {
        BattleSession::new(
            monster(1, 100, 30, 20, 10),
            monster(2, 100, 25, 15, 10),
            BattleConfig::with_policy(policy),
        )
        .unwrap()
    }

    fn enemy_hp_after_player_hits(recorder: &Recorder) -> Vec<i32> {
        recorder
            .attacks
            .iter()
            .filter(|a| a.attacker == Side::Player)
            .map(|a| a.hp_after)
            .collect()
    }

    #[test]
    fn test_alternating_scenario() {
        let mut session = scenario(TurnPolicy::Alternating);
        let mut recorder = Recorder::default();
        let outcome = session
            .play_out(AttackKind::Normal, TICK, &mut recorder)
            .unwrap();

        assert_eq!(
            enemy_hp_after_player_hits(&recorder),
            vec![85, 70, 55, 40, 25, 10, -5]
        );
        for enemy_hit in recorder.attacks.iter().filter(|a| a.attacker == Side::Enemy) {
            assert_eq!(enemy_hit.damage, 5);
        }
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.turns, 13);
        assert_eq!(session.player().hp, 70);
        assert_eq!(session.enemy().hp, -5);
        assert_eq!(session.phase(), Phase::Terminal);
        assert_eq!(recorder.outcome, Some(outcome));
    }

    #[test]
    fn test_alternating_turn_flow() {
        let mut session = scenario(TurnPolicy::Alternating);
        assert_eq!(session.phase(), Phase::AwaitingInput);

        let events = session
            .submit(Intent::Attack(AttackKind::Powerful), &mut ())
            .unwrap();
        assert_eq!(events.len(), 2);
        match events[0] {
            BattleEvent::Attack(hit) => {
                assert_eq!(hit.damage, 30); // floor(45) - 15
                assert_eq!(hit.hp_after, 70);
            }
            ref other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[1], BattleEvent::TurnPassed { to: Side::Enemy });
        assert_eq!(session.phase(), Phase::AwaitingEnemyTurn);

        // Clicks during the enemy turn are rejected
        assert_eq!(
            session.submit(Intent::Attack(AttackKind::Normal), &mut ()),
            Err(Error::NotPlayerTurn(Side::Enemy))
        );

        // The enemy waits out its delay
        assert!(session
            .advance(Duration::from_millis(999), &mut ())
            .unwrap()
            .is_empty());
        let events = session.advance(Duration::from_millis(1), &mut ()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(session.player().hp, 95);
        assert_eq!(session.phase(), Phase::AwaitingInput);

        // No time-driven action while waiting for the player
        assert!(session.advance(Duration::from_secs(60), &mut ()).unwrap().is_empty());
        assert_eq!(session.player().hp, 95);
    }

    #[test]
    fn test_terminal_rejects_intents() {
        let mut session = BattleSession::new(
            monster(1, 100, 500, 20, 10),
            monster(2, 10, 25, 15, 10),
            BattleConfig::default(),
        )
        .unwrap();

        let events = session
            .submit(Intent::Attack(AttackKind::Normal), &mut ())
            .unwrap();
        assert!(matches!(
            events.last(),
            Some(BattleEvent::Finished(Outcome {
                winner: Side::Player,
                turns: 1,
                ..
            }))
        ));
        // The enemy never counter-attacks from the grave
        assert!(session.advance(Duration::from_secs(5), &mut ()).unwrap().is_empty());
        assert_eq!(session.player().hp, 100);
        assert_eq!(
            session.submit(Intent::Attack(AttackKind::Normal), &mut ()),
            Err(Error::BattleOver)
        );
    }

    #[test]
    fn test_enemy_can_win() {
        let mut session = BattleSession::new(
            monster(1, 10, 1, 1, 10),
            monster(2, 100, 50, 50, 10),
            BattleConfig::default(),
        )
        .unwrap();
        let outcome = session.play_out(AttackKind::Normal, TICK, &mut ()).unwrap();
        assert_eq!(outcome.winner, Side::Enemy);
        assert_eq!(outcome.loser, Side::Player);
        assert!(session.player().is_down());
        assert_eq!(session.enemy().hp, 99);
    }

    #[test]
    fn test_animated_matches_alternating() {
        let mut plain = scenario(TurnPolicy::Alternating);
        let mut animated = scenario(TurnPolicy::Animated);
        let mut plain_log = Recorder::default();
        let mut animated_log = Recorder::default();

        let a = plain.play_out(AttackKind::Normal, TICK, &mut plain_log).unwrap();
        let b = animated
            .play_out(AttackKind::Normal, TICK, &mut animated_log)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(plain_log.attacks, animated_log.attacks);
    }

    #[test]
    fn test_animated_holds_resolution() {
        let mut session = scenario(TurnPolicy::Animated);
        let events = session
            .submit(Intent::Attack(AttackKind::Normal), &mut ())
            .unwrap();
        // Damage is applied at once; the turn passes only after the effects
        assert_eq!(events.len(), 1);
        assert_eq!(session.enemy().hp, 85);
        assert_eq!(session.phase(), Phase::ResolvingAttack);

        let hold = script_duration(TurnPolicy::Animated);
        assert!(session
            .advance(hold - Duration::from_millis(1), &mut ())
            .unwrap()
            .is_empty());
        let events = session.advance(Duration::from_millis(1), &mut ()).unwrap();
        assert_eq!(events, vec![BattleEvent::TurnPassed { to: Side::Enemy }]);
        assert_eq!(session.phase(), Phase::AwaitingEnemyTurn);

        session.advance(Duration::from_millis(1000), &mut ()).unwrap();
        assert_eq!(session.player().hp, 95);
        assert_eq!(session.phase(), Phase::ResolvingAttack);
        assert_eq!(session.turn_owner(), Side::Enemy);

        let events = session.advance(hold, &mut ()).unwrap();
        assert_eq!(events, vec![BattleEvent::TurnPassed { to: Side::Player }]);
        assert_eq!(session.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_speed_gated_one_sided() {
        // Enemy is faster: only the enemy ever attacks
        let mut session = BattleSession::new(
            monster(1, 100, 30, 20, 8),
            monster(2, 100, 25, 15, 12),
            BattleConfig::with_policy(TurnPolicy::SpeedGated),
        )
        .unwrap();
        assert_eq!(session.phase(), Phase::Cooldown);
        assert_eq!(session.faster(), Side::Enemy);
        assert_eq!(
            session.submit(Intent::Attack(AttackKind::Normal), &mut ()),
            Err(Error::NoInput(TurnPolicy::SpeedGated))
        );

        // First attack lands on the first tick
        let events = session.advance(Duration::ZERO, &mut ()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(session.player().hp, 95);

        // Then at most once per 1.5s
        session.advance(Duration::from_millis(1499), &mut ()).unwrap();
        assert_eq!(session.player().hp, 95);
        session.advance(Duration::from_millis(1), &mut ()).unwrap();
        assert_eq!(session.player().hp, 90);

        let mut recorder = Recorder::default();
        let outcome = session.play_out(AttackKind::Normal, TICK, &mut recorder).unwrap();
        assert!(recorder.attacks.iter().all(|a| a.attacker == Side::Enemy));
        assert_eq!(outcome.winner, Side::Enemy);
        assert_eq!(session.enemy().hp, 100);
        assert_eq!(outcome.turns, 20);
    }

    #[test]
    fn test_speed_tie_goes_to_player() {
        let mut session = scenario(TurnPolicy::SpeedGated);
        assert_eq!(session.faster(), Side::Player);
        let outcome = session.play_out(AttackKind::Normal, TICK, &mut ()).unwrap();
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.turns, 7);
        assert_eq!(session.player().hp, 100);
    }

    #[test]
    fn test_speed_gated_two_sided() {
        // Player twice as fast: two player attacks per enemy attack
        let mut session = BattleSession::new(
            monster(1, 100, 30, 20, 20),
            monster(2, 100, 25, 15, 10),
            BattleConfig::with_policy(TurnPolicy::SpeedGatedTwoSided),
        )
        .unwrap();

        // Both ready at once: faster side first
        let events = session.advance(Duration::ZERO, &mut ()).unwrap();
        let attackers: Vec<Side> = events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::Attack(hit) => Some(hit.attacker),
                _ => None,
            })
            .collect();
        assert_eq!(attackers, vec![Side::Player, Side::Enemy]);

        session.advance(Duration::from_millis(750), &mut ()).unwrap();
        assert_eq!(session.enemy().hp, 70);
        assert_eq!(session.player().hp, 95);
        session.advance(Duration::from_millis(750), &mut ()).unwrap();
        assert_eq!(session.enemy().hp, 55);
        assert_eq!(session.player().hp, 90);

        let mut recorder = Recorder::default();
        let outcome = session.play_out(AttackKind::Normal, TICK, &mut recorder).unwrap();
        assert_eq!(outcome.winner, Side::Player);
        assert!(recorder.attacks.iter().any(|a| a.attacker == Side::Enemy));
    }

    #[test]
    fn test_termination_bound_over_stat_grid() {
        for policy in TurnPolicy::ALL {
            for hp_p in [1, 7, 40] {
                for hp_e in [1, 13, 40] {
                    for (atk, def) in [(1, 50), (30, 20), (50, 1), (5, 5)] {
                        let mut session = BattleSession::new(
                            monster(1, hp_p, atk, def, 10),
                            monster(2, hp_e, def, atk, 9),
                            BattleConfig::with_policy(policy),
                        )
                        .unwrap();
                        let outcome = session.play_out(AttackKind::Normal, TICK, &mut ()).unwrap();
                        assert!(
                            outcome.turns as i32 <= hp_p + hp_e,
                            "{:?} took {} turns",
                            policy,
                            outcome.turns
                        );
                        assert!(session.combatant(outcome.winner).hp > 0);
                        assert!(session.combatant(outcome.loser).hp <= 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_pairs() {
        assert_eq!(
            BattleSession::new(
                monster(1, 100, 30, 20, 10),
                monster(1, 100, 30, 20, 10),
                BattleConfig::default()
            )
            .unwrap_err(),
            Error::SameCombatant(MonsterId::new(1))
        );
        assert_eq!(
            BattleSession::new(
                monster(1, 100, 30, 20, 10),
                monster(2, 0, 30, 20, 10),
                BattleConfig::default()
            )
            .unwrap_err(),
            Error::NotSelectable(MonsterId::new(2))
        );
    }

    #[test]
    fn test_start_samples_from_roster() {
        let roster = vec![
            monster(1, 100, 30, 20, 10),
            monster(2, 100, 25, 15, 10),
            monster(3, 0, 25, 15, 10),
        ];
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            let session =
                BattleSession::start(&roster, roster[0].clone(), BattleConfig::default(), &mut rng)
                    .unwrap();
            assert_eq!(session.enemy().monster.id, MonsterId::new(2));
            assert_eq!(session.enemy().hp, 100);
        }

        assert_eq!(
            BattleSession::start(&roster, roster[2].clone(), BattleConfig::default(), &mut rng)
                .unwrap_err(),
            Error::NotSelectable(MonsterId::new(3))
        );
        assert_eq!(
            BattleSession::start(
                &roster,
                monster(9, 100, 30, 20, 10),
                BattleConfig::default(),
                &mut rng
            )
            .unwrap_err(),
            Error::UnknownMonster(MonsterId::new(9))
        );

        let lonely = vec![monster(1, 100, 30, 20, 10)];
        assert_eq!(
            BattleSession::start(&lonely, lonely[0].clone(), BattleConfig::default(), &mut rng)
                .unwrap_err(),
            Error::InsufficientRoster { available: 1 }
        );
    }

    struct CountingRoster {
        monsters: Vec<Monster>,
        calls: Cell<u32>,
    }

    impl Roster for CountingRoster {
        type Error = Infallible;

        fn list(&self) -> std::result::Result<Vec<Monster>, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.monsters.clone())
        }
    }

    #[test]
    fn test_start_lists_roster_once_for_pool() {
        let roster = CountingRoster {
            monsters: vec![monster(1, 100, 30, 20, 10), monster(2, 100, 25, 15, 10)],
            calls: Cell::new(0),
        };
        let mut rng = GameRng::new(8);

        // Selection list, as the shell builds it
        let listed = fetch(&roster).unwrap();
        let chosen = crate::selectable(&listed)[0].clone();
        BattleSession::start(&roster, chosen, BattleConfig::default(), &mut rng).unwrap();
        assert_eq!(roster.calls.get(), 2);
    }

    #[test]
    fn test_hp_fraction() {
        let mut c = Combatant::new(monster(1, 100, 30, 20, 10));
        assert_eq!(c.hp_fraction(), 1.0);
        c.hp = 25;
        assert_eq!(c.hp_fraction(), 0.25);
        c.hp = -5;
        assert_eq!(c.hp_fraction(), 0.0);
    }
}
