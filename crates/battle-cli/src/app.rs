//! Interactive shell: terminal setup, main menu and monster choice

use crate::assets::Assets;
use crate::battle;
use crate::config::GameConfig;
use crate::forms;
use crate::input::{self, Input};
use crate::menu::{MainAction, Menu};
use crate::render;
use anyhow::Result;
use battle_core::{selectable, BattleSession, GameRng, Monster};
use battle_db::Store;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    style::Color,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const POLL: Duration = Duration::from_millis(100);

/// Whether the game keeps running after a screen returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A screen's answer, or how the player left it
pub type Reply<T> = std::result::Result<T, Flow>;

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until a key is pressed
pub fn wait_for_key() -> Result<Flow> {
    loop {
        match input::poll(POLL)? {
            Some(Input::Quit) => return Ok(Flow::Quit),
            Some(Input::Click { .. }) | None => {}
            Some(_) => return Ok(Flow::Continue),
        }
    }
}

/// Show some lines until a key is pressed
pub fn show_message<W: Write>(
    out: &mut W,
    title: &str,
    lines: &[String],
    color: Color,
) -> Result<Flow> {
    render::draw_lines(out, title, lines, color, "Press any key to continue...")?;
    wait_for_key()
}

/// Let the player pick a monster
pub fn choose_monster<W: Write>(
    out: &mut W,
    title: &str,
    monsters: Vec<Monster>,
) -> Result<Reply<Monster>> {
    let mut menu = Menu::new(monsters);
    loop {
        let rows: Vec<String> = menu
            .items()
            .iter()
            .map(|m| format!("{} (Type: {}, HP: {})", m.name, m.kind, m.health))
            .collect();
        render::draw_menu(
            out,
            title,
            &rows,
            menu.index(),
            "Up/Down to move | Enter to select | Esc to go back",
        )?;

        match input::poll(POLL)? {
            Some(Input::Up) => menu.up(),
            Some(Input::Down) => menu.down(),
            Some(Input::Confirm) => {
                if let Some(monster) = menu.selected() {
                    return Ok(Ok(monster.clone()));
                }
            }
            Some(Input::Back) => return Ok(Err(Flow::Continue)),
            Some(Input::Quit) => return Ok(Err(Flow::Quit)),
            _ => {}
        }
    }
}

/// Seed from configuration, or from the clock
pub fn seeded_rng(seed: Option<u64>) -> GameRng {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    });
    tracing::debug!("RNG seed {}", seed);
    GameRng::new(seed)
}

/// The interactive game
pub struct App<W: Write> {
    out: W,
    store: Store,
    config: GameConfig,
    assets: Assets,
    rng: GameRng,
}

impl<W: Write> App<W> {
    pub fn new(out: W, store: Store, config: GameConfig) -> Self {
        let assets = Assets::new(&config);
        let rng = seeded_rng(config.seed);
        Self {
            out,
            store,
            config,
            assets,
            rng,
        }
    }

    /// Main menu loop
    pub fn run_menu(&mut self) -> Result<()> {
        let mut menu = MainAction::main_menu();
        let labels: Vec<String> = menu.items().iter().map(|a| a.to_string()).collect();

        loop {
            render::draw_menu(
                &mut self.out,
                "MONSTER BATTLE",
                &labels,
                menu.index(),
                "Up/Down to move | Enter to select | Esc to quit",
            )?;

            let action = match input::poll(POLL)? {
                Some(Input::Up) => {
                    menu.up();
                    continue;
                }
                Some(Input::Down) => {
                    menu.down();
                    continue;
                }
                Some(Input::Confirm) => match menu.selected() {
                    Some(action) => *action,
                    None => continue,
                },
                Some(Input::Back) | Some(Input::Quit) => return Ok(()),
                _ => continue,
            };

            tracing::debug!("Menu: {}", action);
            let flow = match action {
                MainAction::Battle => self.battle()?,
                MainAction::ViewMonsters => forms::view_monsters(&mut self.out, &self.store)?,
                MainAction::AddMonster => forms::add_monster(&mut self.out, &self.store)?,
                MainAction::UpdateMonster => forms::update_monster(&mut self.out, &self.store)?,
                MainAction::DeleteMonster => forms::delete_monster(&mut self.out, &self.store)?,
                MainAction::MigrateRoster => forms::migrate(&mut self.out, &self.store)?,
                MainAction::Exit => Flow::Quit,
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Go straight to the choose-monster screen, once
    pub fn run_battle(&mut self) -> Result<()> {
        self.battle()?;
        Ok(())
    }

    fn battle(&mut self) -> Result<Flow> {
        let roster = self.store.list()?;
        let choices: Vec<Monster> = selectable(&roster).into_iter().cloned().collect();
        if choices.is_empty() {
            return show_message(
                &mut self.out,
                "CHOOSE YOUR MONSTER",
                &[
                    "No monsters available for battle.".to_string(),
                    "Add some from the main menu or run `monster-battle seed`.".to_string(),
                ],
                Color::Red,
            );
        }

        let chosen = match choose_monster(&mut self.out, "CHOOSE YOUR MONSTER", choices)? {
            Ok(monster) => monster,
            Err(flow) => return Ok(flow),
        };

        let session = match BattleSession::start(
            &self.store,
            chosen,
            self.config.battle.clone(),
            &mut self.rng,
        ) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("Cannot start battle: {}", err);
                return show_message(
                    &mut self.out,
                    "BATTLE",
                    &[format!("Cannot start battle: {}", err)],
                    Color::Red,
                );
            }
        };

        battle::run(&mut self.out, session, &self.config, &self.assets)
    }
}
