//! What a battle session reports back to the presentation shell

use crate::{AttackKind, Side};
use serde::{Deserialize, Serialize};

/// A player intent forwarded by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Attack(AttackKind),
}

/// One resolved attack: exactly one health counter changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttack {
    /// Who attacked
    pub attacker: Side,
    pub kind: AttackKind,
    pub damage: i32,
    /// Defender's health before the hit
    pub hp_before: i32,
    /// Defender's health after the hit (may be negative)
    pub hp_after: i32,
}

impl ResolvedAttack {
    pub fn defender(&self) -> Side {
        self.attacker.opponent()
    }

    /// Whether this hit brought the defender to zero or below
    pub fn is_knockout(&self) -> bool {
        self.hp_after <= 0
    }
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub loser: Side,
    /// Number of resolved attacks
    pub turns: u32,
}

/// Side-effect descriptions yielded by a session step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Damage was dealt
    Attack(ResolvedAttack),
    /// Control passed to the given side
    TurnPassed { to: Side },
    /// The session reached its terminal state
    Finished(Outcome),
}

/// Hook for presentation effects
///
/// Invoked synchronously by the session; implementations start animations,
/// play sounds and so on but can never touch the session's data.
pub trait BattleObserver {
    /// Called once per resolved attack, after health was updated
    fn on_attack(&mut self, _attack: &ResolvedAttack) {}

    /// Called once when the session becomes terminal
    fn on_finish(&mut self, _outcome: &Outcome) {}
}

/// No-op observer
impl BattleObserver for () {}

/// Observer that just records what it saw
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub attacks: Vec<ResolvedAttack>,
    pub outcome: Option<Outcome>,
}

impl BattleObserver for Recorder {
    fn on_attack(&mut self, attack: &ResolvedAttack) {
        self.attacks.push(*attack);
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        self.outcome = Some(*outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_attack_helpers() {
        let hit = ResolvedAttack {
            attacker: Side::Player,
            kind: AttackKind::Normal,
            damage: 15,
            hp_before: 10,
            hp_after: -5,
        };
        assert_eq!(hit.defender(), Side::Enemy);
        assert!(hit.is_knockout());
    }

    #[test]
    fn test_recorder() {
        let mut recorder = Recorder::default();
        let hit = ResolvedAttack {
            attacker: Side::Enemy,
            kind: AttackKind::Normal,
            damage: 5,
            hp_before: 100,
            hp_after: 95,
        };
        recorder.on_attack(&hit);
        recorder.on_finish(&Outcome {
            winner: Side::Enemy,
            loser: Side::Player,
            turns: 1,
        });
        assert_eq!(recorder.attacks, vec![hit]);
        assert_eq!(recorder.outcome.map(|o| o.winner), Some(Side::Enemy));
    }
}
