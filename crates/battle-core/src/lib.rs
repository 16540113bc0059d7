//! Battle Core - Rules and turn state machine for monster battles
//!
//! This crate holds everything about a battle that does not touch a
//! terminal or a database:
//! - Monster records, drafts and stat updates
//! - The damage formula for normal and powerful attacks
//! - Roster access and opponent selection
//! - The battle session state machine and its turn policies
//! - Presentation timelines for hit effects
//!
//! ## Turn Policies
//!
//! A [`BattleSession`] runs under one [`TurnPolicy`]:
//! - `Alternating` - player attacks, enemy counter-attacks after a delay
//! - `SpeedGated` - the faster monster attacks on a cooldown, no input
//! - `SpeedGatedTwoSided` - both monsters attack on speed-scaled cooldowns
//! - `Animated` - alternating turns held while hit effects play
//!
//! Time is passed in explicitly through [`BattleSession::advance`]; nothing
//! in this crate sleeps.

mod config;
mod damage;
pub mod effect;
mod error;
mod event;
mod identity;
mod monster;
mod rng;
mod roster;
pub mod session;
pub mod time;

pub use config::{BattleConfig, TurnPolicy};
pub use damage::{attack_power, damage_from_stats, resolve_attack, AttackKind, MIN_DAMAGE};
pub use effect::{Effect, EffectStep, EffectTimeline};
pub use error::{Error, Result};
pub use event::{BattleEvent, BattleObserver, Intent, Outcome, Recorder, ResolvedAttack};
pub use identity::{MonsterId, Side};
pub use monster::{Monster, MonsterDraft, StatUpdate, DEFAULT_SPEED};
pub use rng::GameRng;
pub use roster::{fetch, select_opponent, selectable, Roster};
pub use session::{BattleSession, Combatant, Phase};
pub use time::Cooldown;
