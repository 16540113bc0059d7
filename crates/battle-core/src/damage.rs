//! Damage resolution
//!
//! Both formulas clamp to a minimum of 1, so every resolved attack strictly
//! lowers the defender's health and every battle terminates.

use crate::Monster;
use serde::{Deserialize, Serialize};

/// Smallest amount of damage any attack can deal
pub const MIN_DAMAGE: i32 = 1;

/// Which attack the attacker uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// `attack - defense`
    Normal,
    /// `floor(attack * 1.5) - defense`
    Powerful,
}

impl AttackKind {
    /// Button / log label
    pub fn label(&self) -> &'static str {
        match self {
            AttackKind::Normal => "Attack (Normal)",
            AttackKind::Powerful => "Attack (Powerful)",
        }
    }
}

/// Offensive power of an attack before the defender's defense is subtracted
pub fn attack_power(attack: i32, kind: AttackKind) -> i32 {
    match kind {
        AttackKind::Normal => attack,
        // floor(attack * 1.5) without going through floats
        AttackKind::Powerful => attack.saturating_mul(3).div_euclid(2),
    }
}

/// Damage dealt by `attacker` to `defender` with the given attack
pub fn resolve_attack(attacker: &Monster, defender: &Monster, kind: AttackKind) -> i32 {
    damage_from_stats(attacker.attack, defender.defense, kind)
}

/// Same as [`resolve_attack`] on raw stats
pub fn damage_from_stats(attack: i32, defense: i32, kind: AttackKind) -> i32 {
    attack_power(attack, kind)
        .saturating_sub(defense)
        .max(MIN_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonsterDraft, MonsterId};

    fn monster(attack: i32, defense: i32) -> Monster {
        Monster::from_draft(
            MonsterId::new(1),
            MonsterDraft::new("m", "Earth", 100, attack, defense),
        )
    }

    #[test]
    fn test_normal_damage() {
        assert_eq!(damage_from_stats(30, 15, AttackKind::Normal), 15);
        assert_eq!(damage_from_stats(25, 20, AttackKind::Normal), 5);
        assert_eq!(
            resolve_attack(&monster(30, 20), &monster(25, 15), AttackKind::Normal),
            15
        );
    }

    #[test]
    fn test_powerful_damage() {
        // floor(30 * 1.5) = 45
        assert_eq!(damage_from_stats(30, 20, AttackKind::Powerful), 25);
        // floor(25 * 1.5) = 37
        assert_eq!(attack_power(25, AttackKind::Powerful), 37);
        assert_eq!(attack_power(1, AttackKind::Powerful), 1);
    }

    #[test]
    fn test_damage_clamped_to_minimum() {
        assert_eq!(damage_from_stats(10, 50, AttackKind::Normal), 1);
        assert_eq!(damage_from_stats(10, 10, AttackKind::Normal), 1);
        assert_eq!(damage_from_stats(10, 50, AttackKind::Powerful), 1);
        assert_eq!(damage_from_stats(0, 0, AttackKind::Normal), 1);
        assert_eq!(damage_from_stats(-5, 3, AttackKind::Powerful), 1);
        assert_eq!(damage_from_stats(i32::MAX, i32::MIN, AttackKind::Powerful), i32::MAX);
    }

    #[test]
    fn test_formulas_over_stat_grid() {
        for a in 1..=60 {
            for d in 1..=60 {
                let normal = damage_from_stats(a, d, AttackKind::Normal);
                let powerful = damage_from_stats(a, d, AttackKind::Powerful);
                assert_eq!(normal, (a - d).max(1));
                assert_eq!(powerful, ((a as f64 * 1.5).floor() as i32 - d).max(1));
                assert!(normal >= MIN_DAMAGE);
                assert!(powerful >= normal, "a={} d={}", a, d);
            }
        }
    }
}
