//! Battle configuration - turn policy and timings
//!
//! The three battle variants share one state machine; this module carries
//! the value that selects between them.

use crate::DEFAULT_SPEED;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Turn-order policy of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnPolicy {
    /// Player acts, then the enemy counter-attacks once, repeat
    #[default]
    Alternating,
    /// The faster side attacks once per cooldown; the slower never acts
    SpeedGated,
    /// Both sides attack on their own speed-scaled cooldowns
    SpeedGatedTwoSided,
    /// Alternating turns, each attack held while its effects play
    Animated,
}

impl TurnPolicy {
    /// All policies, in menu order
    pub const ALL: [TurnPolicy; 4] = [
        TurnPolicy::Alternating,
        TurnPolicy::SpeedGated,
        TurnPolicy::SpeedGatedTwoSided,
        TurnPolicy::Animated,
    ];

    /// Whether the player drives turns with intents
    pub fn takes_input(&self) -> bool {
        matches!(self, TurnPolicy::Alternating | TurnPolicy::Animated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPolicy::Alternating => "alternating",
            TurnPolicy::SpeedGated => "speed_gated",
            TurnPolicy::SpeedGatedTwoSided => "speed_gated_two_sided",
            TurnPolicy::Animated => "animated",
        }
    }
}

impl fmt::Display for TurnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TurnPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s.replace('-', "_"))
            .ok_or_else(|| format!("unknown turn policy: {}", s))
    }
}

/// Configuration for a battle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Which turn-order policy to run
    #[serde(default)]
    pub policy: TurnPolicy,
    /// Pause before the enemy's counter-attack in the alternating policies
    #[serde(default = "default_enemy_delay_ms")]
    pub enemy_delay_ms: u64,
    /// Minimum time between attacks in the speed policies
    #[serde(default = "default_attack_cooldown_ms")]
    pub attack_cooldown_ms: u64,
}

fn default_enemy_delay_ms() -> u64 {
    1000
}

fn default_attack_cooldown_ms() -> u64 {
    1500
}

impl BattleConfig {
    /// Default timings with the given policy
    pub fn with_policy(policy: TurnPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn enemy_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_delay_ms)
    }

    pub fn attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.attack_cooldown_ms)
    }

    /// Cooldown of a combatant in the two-sided speed policy
    ///
    /// A monster at [`DEFAULT_SPEED`] waits exactly `attack_cooldown`; twice
    /// as fast waits half as long. Speeds below 1 count as 1.
    pub fn cooldown_for_speed(&self, speed: i32) -> Duration {
        let speed = speed.max(1) as u64;
        Duration::from_millis(self.attack_cooldown_ms.saturating_mul(DEFAULT_SPEED as u64) / speed)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            policy: TurnPolicy::default(),
            enemy_delay_ms: default_enemy_delay_ms(),
            attack_cooldown_ms: default_attack_cooldown_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.policy, TurnPolicy::Alternating);
        assert_eq!(config.enemy_delay(), Duration::from_millis(1000));
        assert_eq!(config.attack_cooldown(), Duration::from_millis(1500));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("speed_gated".parse::<TurnPolicy>(), Ok(TurnPolicy::SpeedGated));
        assert_eq!(
            "speed-gated-two-sided".parse::<TurnPolicy>(),
            Ok(TurnPolicy::SpeedGatedTwoSided)
        );
        assert!("sideways".parse::<TurnPolicy>().is_err());
        for policy in TurnPolicy::ALL {
            assert_eq!(policy.to_string().parse::<TurnPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_config_from_ron() {
        let config: BattleConfig = ron::from_str("(policy: animated)").unwrap();
        assert_eq!(config.policy, TurnPolicy::Animated);
        assert_eq!(config.enemy_delay_ms, 1000);

        let config: BattleConfig = ron::from_str("(attack_cooldown_ms: 500)").unwrap();
        assert_eq!(config.policy, TurnPolicy::Alternating);
        assert_eq!(config.attack_cooldown(), Duration::from_millis(500));
    }

    #[test]
    fn test_cooldown_scales_with_speed() {
        let config = BattleConfig::default();
        assert_eq!(config.cooldown_for_speed(10), Duration::from_millis(1500));
        assert_eq!(config.cooldown_for_speed(20), Duration::from_millis(750));
        assert_eq!(config.cooldown_for_speed(5), Duration::from_millis(3000));
        assert_eq!(config.cooldown_for_speed(0), Duration::from_millis(15000));
    }

    #[test]
    fn test_cooldown_saturates() {
        let config = BattleConfig {
            attack_cooldown_ms: u64::MAX,
            ..BattleConfig::default()
        };
        assert_eq!(config.cooldown_for_speed(1), Duration::from_millis(u64::MAX));
        assert_eq!(config.cooldown_for_speed(20), Duration::from_millis(u64::MAX / 20));
    }
}
