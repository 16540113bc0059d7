//! Presentation effects on a time budget
//!
//! An attack is shown as a short script of steps (lunge, projectile, flash,
//! screen shake) followed by a reveal of the defender's new health. The
//! shell advances the timeline by elapsed frame time and draws whatever step
//! is current. The timeline never feeds back into the session.

use crate::{ResolvedAttack, Side, TurnPolicy};
use std::collections::VecDeque;
use std::time::Duration;

/// Flashes in one screen-shake burst
pub const SHAKE_FRAMES: u32 = 5;
/// Length of one shake flash
pub const SHAKE_FRAME: Duration = Duration::from_millis(50);

const LUNGE: Duration = Duration::from_millis(300);
const PROJECTILE: Duration = Duration::from_millis(400);
const FLASH: Duration = Duration::from_millis(150);

/// A single presentation effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Attacker sprite steps toward the defender
    Lunge { side: Side },
    /// Projectile travelling away from `from`
    Projectile { from: Side },
    /// Defender sprite flashes
    Flash { side: Side },
    /// Whole frame shakes
    Shake,
    /// Health bar of `side` now shows `hp`
    Reveal { side: Side, hp: i32 },
}

/// An effect with its fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectStep {
    pub effect: Effect,
    pub duration: Duration,
}

impl EffectStep {
    fn new(effect: Effect, duration: Duration) -> Self {
        Self { effect, duration }
    }
}

/// Steps that present one attack under the given policy
pub fn script(policy: TurnPolicy, attack: &ResolvedAttack) -> Vec<EffectStep> {
    let attacker = attack.attacker;
    let defender = attack.defender();
    let shake = EffectStep::new(Effect::Shake, SHAKE_FRAME * SHAKE_FRAMES);
    let reveal = EffectStep::new(
        Effect::Reveal {
            side: defender,
            hp: attack.hp_after,
        },
        Duration::ZERO,
    );

    match policy {
        TurnPolicy::Animated => vec![
            EffectStep::new(Effect::Lunge { side: attacker }, LUNGE),
            EffectStep::new(Effect::Projectile { from: attacker }, PROJECTILE),
            EffectStep::new(Effect::Flash { side: defender }, FLASH),
            shake,
            reveal,
        ],
        TurnPolicy::Alternating => vec![shake, reveal],
        TurnPolicy::SpeedGated | TurnPolicy::SpeedGatedTwoSided => vec![reveal],
    }
}

/// Total time the effects of one attack take under the given policy
pub fn script_duration(policy: TurnPolicy) -> Duration {
    let probe = ResolvedAttack {
        attacker: Side::Player,
        kind: crate::AttackKind::Normal,
        damage: 1,
        hp_before: 1,
        hp_after: 0,
    };
    script(policy, &probe).iter().map(|s| s.duration).sum()
}

/// Queue of pending effect steps
#[derive(Debug, Clone, Default)]
pub struct EffectTimeline {
    steps: VecDeque<EffectStep>,
    elapsed: Duration,
}

impl EffectTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the script for an attack behind anything already playing
    pub fn play(&mut self, policy: TurnPolicy, attack: &ResolvedAttack) {
        self.steps.extend(script(policy, attack));
    }

    /// Advance by elapsed frame time, returning the steps that completed
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Effect> {
        let mut finished = Vec::new();
        self.elapsed = self.elapsed.saturating_add(elapsed);

        while let Some(step) = self.steps.front() {
            if self.elapsed < step.duration {
                break;
            }
            self.elapsed -= step.duration;
            finished.push(step.effect);
            self.steps.pop_front();
        }

        if self.steps.is_empty() {
            self.elapsed = Duration::ZERO;
        }
        finished
    }

    /// The step currently on screen
    pub fn current(&self) -> Option<&EffectStep> {
        self.steps.front()
    }

    /// Fraction of the current step already shown, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        match self.steps.front() {
            Some(step) if !step.duration.is_zero() => {
                (self.elapsed.as_secs_f32() / step.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Horizontal frame offset while shaking: alternates every shake frame
    pub fn shake_offset(&self) -> i16 {
        match self.current() {
            Some(EffectStep {
                effect: Effect::Shake,
                ..
            }) => {
                let frame = self.elapsed.as_millis() / SHAKE_FRAME.as_millis();
                if frame % 2 == 0 {
                    2
                } else {
                    -2
                }
            }
            _ => 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time until every queued step has finished
    pub fn remaining(&self) -> Duration {
        let total: Duration = self.steps.iter().map(|s| s.duration).sum();
        total.saturating_sub(self.elapsed)
    }
}
