//! The battle screen
//!
//! Runs one [`BattleSession`] against the terminal: input becomes intents,
//! frame time drives both the session and the effect timeline, and the
//! health bars only move when the timeline reveals a hit.

use crate::app::Flow;
use crate::assets::Assets;
use crate::config::GameConfig;
use crate::input::{self, Input};
use crate::render::{self, BattleView};
use anyhow::Result;
use battle_core::{
    AttackKind, BattleObserver, BattleSession, Effect, EffectTimeline, Intent, Outcome, Phase,
    ResolvedAttack, Side, TurnPolicy,
};
use std::io::Write;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(33);
/// How long the winner banner stays up
const BANNER_HOLD: Duration = Duration::from_secs(2);

/// Observer that turns resolved attacks into presentation state
struct Presenter {
    policy: TurnPolicy,
    names: [String; 2],
    timeline: EffectTimeline,
    shown_hp: [i32; 2],
    /// Hit cues not yet played
    cues: usize,
    last_hit: String,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}

impl Presenter {
    fn new(session: &BattleSession) -> Self {
        Self {
            policy: session.policy(),
            names: [
                session.player().monster.name.clone(),
                session.enemy().monster.name.clone(),
            ],
            timeline: EffectTimeline::new(),
            shown_hp: [session.player().hp, session.enemy().hp],
            cues: 0,
            last_hit: String::new(),
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        for effect in self.timeline.advance(elapsed) {
            if let Effect::Reveal { side, hp } = effect {
                self.shown_hp[slot(side)] = hp;
            }
        }
    }
}

impl BattleObserver for Presenter {
    fn on_attack(&mut self, attack: &ResolvedAttack) {
        self.timeline.play(self.policy, attack);
        self.cues += 1;
        self.last_hit = format!(
            "{} used {} on {}: {} damage.",
            self.names[slot(attack.attacker)],
            attack.kind.label(),
            self.names[slot(attack.defender())],
            attack.damage
        );
    }

    fn on_finish(&mut self, outcome: &Outcome) {
        tracing::debug!(
            "Presenting outcome: {} wins",
            self.names[slot(outcome.winner)]
        );
    }
}

/// Attack chosen by a key or a click on a button
fn attack_for(input: Input) -> Option<AttackKind> {
    render::buttons()
        .into_iter()
        .find(|(_, key, rect)| match input {
            Input::Char(c) => c == *key,
            Input::Click { column, row } => rect.contains(column, row),
            _ => false,
        })
        .map(|(kind, _, _)| kind)
}

fn hint(session: &BattleSession) -> String {
    match session.phase() {
        Phase::AwaitingInput => "Your turn: choose an attack.".to_string(),
        Phase::AwaitingEnemyTurn => format!("{} is preparing to strike...", session.enemy().monster.name),
        Phase::Cooldown => format!(
            "Speed battle ({}): {} is faster.",
            session.policy(),
            session.combatant(session.faster()).monster.name
        ),
        Phase::ResolvingAttack | Phase::Terminal => String::new(),
    }
}

/// Fight one battle; returns when it is over, abandoned or the game closes
pub fn run<W: Write>(
    out: &mut W,
    mut session: BattleSession,
    config: &GameConfig,
    assets: &Assets,
) -> Result<Flow> {
    let sprites = [
        assets.sprite(&session.player().monster.name)?,
        assets.sprite(&session.enemy().monster.name)?,
    ];
    let mut presenter = Presenter::new(&session);
    let title = format!("MONSTER BATTLE ({})", config.battle.policy);
    let mut banner_left: Option<Duration> = None;
    let mut last = Instant::now();

    loop {
        if let Some(input) = input::poll(FRAME)? {
            match input {
                Input::Quit => return Ok(Flow::Quit),
                Input::Back => {
                    tracing::info!("Battle abandoned after {} turns", session.turns());
                    return Ok(Flow::Continue);
                }
                other => {
                    if let Some(kind) = attack_for(other) {
                        if presenter.timeline.is_idle() {
                            if let Err(err) = session.submit(Intent::Attack(kind), &mut presenter) {
                                tracing::debug!("Attack ignored: {}", err);
                            }
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        presenter.advance(elapsed);
        session.advance(elapsed, &mut presenter)?;
        for _ in 0..std::mem::take(&mut presenter.cues) {
            assets.play_hit(out)?;
        }

        let banner = match session.outcome() {
            Some(outcome) if presenter.timeline.is_idle() => {
                let left = match banner_left {
                    None => BANNER_HOLD,
                    Some(left) => left.saturating_sub(elapsed),
                };
                if left.is_zero() {
                    return Ok(Flow::Continue);
                }
                banner_left = Some(left);
                Some(format!(
                    "{} wins the battle!",
                    session.combatant(outcome.winner).monster.name
                ))
            }
            _ => None,
        };

        let status = if presenter.last_hit.is_empty() {
            hint(&session)
        } else {
            format!("{} {}", presenter.last_hit, hint(&session))
        };
        let view = BattleView {
            title: &title,
            player: session.player(),
            enemy: session.enemy(),
            shown_hp: presenter.shown_hp,
            sprites: &sprites,
            timeline: &presenter.timeline,
            status: &status,
            banner: banner.as_deref(),
            buttons: session.phase() == Phase::AwaitingInput && presenter.timeline.is_idle(),
        };
        render::draw_battle(out, &view)?;
    }
}
