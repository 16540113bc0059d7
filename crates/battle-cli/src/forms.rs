//! Roster management screens

use crate::app::{choose_monster, show_message, Flow, Reply};
use crate::input::{self, Input};
use crate::render;
use anyhow::Result;
use battle_core::{Monster, MonsterDraft, StatUpdate};
use battle_db::Store;
use crossterm::style::Color;
use std::io::Write;
use std::time::Duration;

const POLL: Duration = Duration::from_millis(100);

/// Unwrap a prompt answer or leave the form
macro_rules! ask {
    ($reply:expr) => {
        match $reply? {
            Ok(value) => value,
            Err(flow) => return Ok(flow),
        }
    };
}

pub fn parse_text(input: &str) -> Result<String, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("This field is required".to_string());
    }
    Ok(text.to_string())
}

pub fn parse_stat(input: &str) -> Result<i32, String> {
    match input.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Please enter a positive whole number".to_string()),
    }
}

/// Blank keeps `current`
pub fn parse_stat_or(input: &str, current: i32) -> Result<i32, String> {
    if input.trim().is_empty() {
        Ok(current)
    } else {
        parse_stat(input)
    }
}

/// Blank means the default speed
pub fn parse_speed(input: &str) -> Result<Option<i32>, String> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_stat(input).map(Some)
    }
}

pub fn parse_confirm(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err("Please answer y or n".to_string()),
    }
}

/// Read one line of text, re-asking until `parse` accepts it
fn prompt<W: Write, T>(
    out: &mut W,
    title: &str,
    context: &[String],
    label: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Reply<T>> {
    let mut text = String::new();
    let mut error: Option<String> = None;
    loop {
        render::draw_prompt(out, title, context, label, &text, error.as_deref())?;
        match input::poll(POLL)? {
            Some(Input::Char(c)) => text.push(c),
            Some(Input::Backspace) => {
                text.pop();
            }
            Some(Input::Confirm) => match parse(&text) {
                Ok(value) => return Ok(Ok(value)),
                Err(message) => error = Some(message),
            },
            Some(Input::Back) => return Ok(Err(Flow::Continue)),
            Some(Input::Quit) => return Ok(Err(Flow::Quit)),
            _ => {}
        }
    }
}

pub fn describe(monster: &Monster) -> String {
    format!(
        "{}. {} (Type: {}, HP: {}, ATK: {}, DEF: {}, SPD: {})",
        monster.id.raw(),
        monster.name,
        monster.kind,
        monster.health,
        monster.attack,
        monster.defense,
        monster.speed
    )
}

fn report<W: Write>(out: &mut W, title: &str, result: Result<String, String>) -> Result<Flow> {
    match result {
        Ok(message) => show_message(out, title, &[message], Color::Green),
        Err(message) => show_message(out, title, &[message], Color::Red),
    }
}

pub fn view_monsters<W: Write>(out: &mut W, store: &Store) -> Result<Flow> {
    let monsters = store.list()?;
    let mut lines: Vec<String> = monsters.iter().map(describe).collect();
    if lines.is_empty() {
        lines.push("The roster is empty.".to_string());
    }
    let legacy = store.legacy_rows()?;
    if legacy > 0 {
        lines.push(String::new());
        lines.push(format!(
            "{} monsters are waiting for the speed migration.",
            legacy
        ));
    }
    show_message(out, "MONSTERS", &lines, Color::White)
}

pub fn add_monster<W: Write>(out: &mut W, store: &Store) -> Result<Flow> {
    const TITLE: &str = "ADD MONSTER";
    let mut context = Vec::new();

    let name = ask!(prompt(out, TITLE, &context, "Name", parse_text));
    context.push(format!("Name: {}", name));
    let kind = ask!(prompt(out, TITLE, &context, "Type", parse_text));
    context.push(format!("Type: {}", kind));
    let health = ask!(prompt(out, TITLE, &context, "Health", parse_stat));
    context.push(format!("Health: {}", health));
    let attack = ask!(prompt(out, TITLE, &context, "Attack", parse_stat));
    context.push(format!("Attack: {}", attack));
    let defense = ask!(prompt(out, TITLE, &context, "Defense", parse_stat));
    context.push(format!("Defense: {}", defense));
    let speed = ask!(prompt(out, TITLE, &context, "Speed (blank for 10)", parse_speed));

    let mut draft = MonsterDraft::new(name, kind, health, attack, defense);
    draft.speed = speed;

    let result = store
        .create(draft)
        .map(|m| format!("Monster '{}' added successfully.", m.name))
        .map_err(|e| format!("Could not add monster: {}", e));
    report(out, TITLE, result)
}

pub fn update_monster<W: Write>(out: &mut W, store: &Store) -> Result<Flow> {
    const TITLE: &str = "UPDATE MONSTER";
    let monster = ask!(pick(out, store, TITLE));
    let context = vec![describe(&monster), "Leave a field blank to keep it.".to_string()];

    let health = ask!(prompt(out, TITLE, &context, "Health", |s| parse_stat_or(s, monster.health)));
    let attack = ask!(prompt(out, TITLE, &context, "Attack", |s| parse_stat_or(s, monster.attack)));
    let defense = ask!(prompt(out, TITLE, &context, "Defense", |s| parse_stat_or(s, monster.defense)));
    let speed = ask!(prompt(out, TITLE, &context, "Speed", |s| parse_stat_or(s, monster.speed)));

    let update = StatUpdate {
        health,
        attack,
        defense,
        speed: Some(speed),
    };
    let result = store
        .update(monster.id, update)
        .map(|m| format!("Monster '{}' updated successfully.", m.name))
        .map_err(|e| format!("Could not update monster: {}", e));
    report(out, TITLE, result)
}

pub fn delete_monster<W: Write>(out: &mut W, store: &Store) -> Result<Flow> {
    const TITLE: &str = "DELETE MONSTER";
    let monster = ask!(pick(out, store, TITLE));
    let context = vec![describe(&monster)];
    if !ask!(prompt(out, TITLE, &context, "Delete this monster? (y/n)", parse_confirm)) {
        return Ok(Flow::Continue);
    }

    let result = store
        .delete(monster.id)
        .map(|m| format!("Monster '{}' deleted successfully.", m.name))
        .map_err(|e| format!("Could not delete monster: {}", e));
    report(out, TITLE, result)
}

pub fn migrate<W: Write>(out: &mut W, store: &Store) -> Result<Flow> {
    let result = store
        .migrate_speed()
        .map(|done| done.to_string())
        .map_err(|e| format!("Migration failed: {}", e));
    report(out, "MIGRATE ROSTER", result)
}

/// Any monster in the roster, including ones that cannot battle
fn pick<W: Write>(out: &mut W, store: &Store, title: &str) -> Result<Reply<Monster>> {
    let monsters = store.list()?;
    if monsters.is_empty() {
        let flow = show_message(out, title, &["The roster is empty.".to_string()], Color::Red)?;
        return Ok(Err(flow));
    }
    choose_monster(out, title, monsters)
}
