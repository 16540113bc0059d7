//! Screen drawing
//!
//! Every screen is redrawn in full each frame. Layout is fixed for an
//! 80x24 terminal.

use crate::assets::Sprite;
use crate::input::Rect;
use battle_core::{AttackKind, Combatant, Effect, EffectTimeline, Side};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

const RULE: &str =
    "================================================================================";
const BAR_WIDTH: usize = 20;
const PLAYER_X: u16 = 4;
const ENEMY_X: u16 = 46;
const NAME_ROW: u16 = 3;
const SPRITE_ROW: u16 = 6;
const PROJECTILE_ROW: u16 = 10;
const STATUS_ROW: u16 = 18;
const BUTTON_ROW: u16 = 20;
const LUNGE_DISTANCE: f32 = 8.0;

/// Clickable attack buttons and their keys
pub fn buttons() -> [(AttackKind, char, Rect); 2] {
    [
        (AttackKind::Normal, '1', Rect::new(PLAYER_X, BUTTON_ROW, 23, 3)),
        (AttackKind::Powerful, '2', Rect::new(32, BUTTON_ROW, 25, 3)),
    ]
}

/// Filled cells of a health bar, clamped at zero
pub fn health_cells(hp: i32, max: i32, width: usize) -> usize {
    if max <= 0 || hp <= 0 {
        return 0;
    }
    let hp = hp.min(max) as usize;
    (hp * width).div_ceil(max as usize).min(width)
}

fn header(out: &mut impl Write, title: &str) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(Color::Yellow),
        Print(RULE),
        MoveTo(2, 1),
        Print(title),
        MoveTo(0, 2),
        Print(RULE),
        ResetColor
    )
}

fn footer(out: &mut impl Write, hint: &str) -> io::Result<()> {
    queue!(
        out,
        MoveTo(2, 23),
        SetForegroundColor(Color::DarkGrey),
        Print(hint),
        ResetColor
    )
}

/// A vertical menu with the selected row highlighted
pub fn draw_menu(
    out: &mut impl Write,
    title: &str,
    items: &[String],
    selected: usize,
    hint: &str,
) -> io::Result<()> {
    header(out, title)?;
    for (i, item) in items.iter().enumerate() {
        let row = 4 + i as u16;
        if i == selected {
            queue!(
                out,
                MoveTo(4, row),
                SetBackgroundColor(Color::Yellow),
                SetForegroundColor(Color::Black),
                Print(format!(" > {} ", item)),
                ResetColor
            )?;
        } else {
            queue!(out, MoveTo(4, row), Print(format!("   {} ", item)))?;
        }
    }
    footer(out, hint)?;
    out.flush()
}

/// Plain lines of text, e.g. the roster listing or an error
pub fn draw_lines(
    out: &mut impl Write,
    title: &str,
    lines: &[String],
    color: Color,
    hint: &str,
) -> io::Result<()> {
    header(out, title)?;
    queue!(out, SetForegroundColor(color))?;
    for (i, line) in lines.iter().take(18).enumerate() {
        queue!(out, MoveTo(4, 4 + i as u16), Print(line))?;
    }
    queue!(out, ResetColor)?;
    footer(out, hint)?;
    out.flush()
}

/// A single-line text prompt
pub fn draw_prompt(
    out: &mut impl Write,
    title: &str,
    context: &[String],
    label: &str,
    input: &str,
    error: Option<&str>,
) -> io::Result<()> {
    header(out, title)?;
    for (i, line) in context.iter().take(12).enumerate() {
        queue!(out, MoveTo(4, 4 + i as u16), Print(line))?;
    }
    queue!(
        out,
        MoveTo(4, 17),
        Print(label),
        Print(": "),
        SetForegroundColor(Color::Cyan),
        Print(input),
        Print("_"),
        ResetColor
    )?;
    if let Some(error) = error {
        queue!(
            out,
            MoveTo(4, 19),
            SetForegroundColor(Color::Red),
            Print(error),
            ResetColor
        )?;
    }
    footer(out, "Enter to confirm | Esc to cancel")?;
    out.flush()
}

/// Everything the battle screen shows in one frame
pub struct BattleView<'a> {
    pub title: &'a str,
    pub player: &'a Combatant,
    pub enemy: &'a Combatant,
    /// Health shown on the bars, which trails the session until reveals play
    pub shown_hp: [i32; 2],
    pub sprites: &'a [Sprite; 2],
    pub timeline: &'a EffectTimeline,
    pub status: &'a str,
    pub banner: Option<&'a str>,
    pub buttons: bool,
}

fn shifted(x: u16, offset: i16) -> u16 {
    (x as i32 + offset as i32).clamp(0, u16::MAX as i32) as u16
}

fn lunge_offset(timeline: &EffectTimeline, side: Side) -> i16 {
    match timeline.current().map(|s| s.effect) {
        Some(Effect::Lunge { side: s }) if s == side => {
            let p = timeline.progress();
            let reach = if p < 0.5 { p * 2.0 } else { (1.0 - p) * 2.0 };
            let cells = (reach * LUNGE_DISTANCE).round() as i16;
            match side {
                Side::Player => cells,
                Side::Enemy => -cells,
            }
        }
        _ => 0,
    }
}

fn bar_color(hp: i32, max: i32) -> Color {
    if hp * 2 > max {
        Color::Green
    } else if hp * 5 > max {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_combatant(
    out: &mut impl Write,
    view: &BattleView<'_>,
    side: Side,
    shake: i16,
) -> io::Result<()> {
    let (combatant, base_x, index) = match side {
        Side::Player => (view.player, PLAYER_X, 0),
        Side::Enemy => (view.enemy, ENEMY_X, 1),
    };
    let x = shifted(base_x, shake);
    let hp = view.shown_hp[index];
    let max = combatant.monster.health;
    let filled = health_cells(hp, max, BAR_WIDTH);

    queue!(
        out,
        MoveTo(x, NAME_ROW),
        Print(format!(
            "{} ({})",
            combatant.monster.name, combatant.monster.kind
        )),
        MoveTo(x, NAME_ROW + 1),
        Print("["),
        SetBackgroundColor(bar_color(hp, max)),
        Print(" ".repeat(filled)),
        SetBackgroundColor(Color::DarkGrey),
        Print(" ".repeat(BAR_WIDTH - filled)),
        ResetColor,
        Print(format!("] {}/{}", hp.max(0), max))
    )?;

    let flashing = matches!(
        view.timeline.current().map(|s| s.effect),
        Some(Effect::Flash { side: s }) if s == side
    );
    let sprite_x = shifted(x, lunge_offset(view.timeline, side));
    if flashing {
        queue!(out, SetForegroundColor(Color::Red))?;
    }
    for (i, row) in view.sprites[index].rows.iter().take(10).enumerate() {
        queue!(out, MoveTo(sprite_x, SPRITE_ROW + i as u16), Print(row))?;
    }
    queue!(out, ResetColor)
}

fn draw_projectile(out: &mut impl Write, view: &BattleView<'_>, shake: i16) -> io::Result<()> {
    if let Some(Effect::Projectile { from }) = view.timeline.current().map(|s| s.effect) {
        let start = PLAYER_X + view.sprites[0].width() + 1;
        let end = ENEMY_X.saturating_sub(2);
        let span = end.saturating_sub(start) as f32;
        let travelled = (span * view.timeline.progress()).round() as u16;
        let x = match from {
            Side::Player => start + travelled,
            Side::Enemy => end - travelled.min(end),
        };
        queue!(
            out,
            MoveTo(shifted(x, shake), PROJECTILE_ROW),
            SetForegroundColor(Color::Yellow),
            Print("*"),
            ResetColor
        )?;
    }
    Ok(())
}

fn draw_button(out: &mut impl Write, label: &str, key: char, rect: Rect, enabled: bool) -> io::Result<()> {
    let inner = rect.width.saturating_sub(2) as usize;
    let text = format!("{} {}", key, label);
    let color = if enabled { Color::White } else { Color::DarkGrey };
    queue!(
        out,
        SetForegroundColor(color),
        MoveTo(rect.x, rect.y),
        Print(format!("+{}+", "-".repeat(inner))),
        MoveTo(rect.x, rect.y + 1),
        Print(format!("|{:^width$}|", text, width = inner)),
        MoveTo(rect.x, rect.y + 2),
        Print(format!("+{}+", "-".repeat(inner))),
        ResetColor
    )
}

/// The battle screen
pub fn draw_battle(out: &mut impl Write, view: &BattleView<'_>) -> io::Result<()> {
    header(out, view.title)?;
    let shake = view.timeline.shake_offset();

    draw_combatant(out, view, Side::Player, shake)?;
    draw_combatant(out, view, Side::Enemy, shake)?;
    draw_projectile(out, view, shake)?;

    match view.banner {
        Some(banner) => queue!(
            out,
            MoveTo(PLAYER_X, STATUS_ROW),
            SetForegroundColor(Color::Green),
            Print(banner),
            ResetColor
        )?,
        None => queue!(out, MoveTo(PLAYER_X, STATUS_ROW), Print(view.status))?,
    }

    for (kind, key, rect) in buttons() {
        draw_button(out, kind.label(), key, rect, view.buttons)?;
    }
    footer(out, "Click a button or press 1/2 | Esc to leave the battle")?;
    out.flush()
}
