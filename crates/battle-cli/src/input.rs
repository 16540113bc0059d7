//! Terminal input translated into screen-level events

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::io;
use std::time::Duration;

/// One input event, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Confirm,
    /// Leave the current screen
    Back,
    /// Close the game from any screen
    Quit,
    Backspace,
    Char(char),
    /// Left click at a cell
    Click { column: u16, row: u16 },
}

/// Wait up to `timeout` for the next input
pub fn poll(timeout: Duration) -> io::Result<Option<Input>> {
    if event::poll(timeout)? {
        return Ok(translate(event::read()?));
    }
    Ok(None)
}

/// Map a crossterm event, ignoring everything the screens do not use
pub fn translate(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Input::Click { column, row }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::Enter => Some(Input::Confirm),
        KeyCode::Esc => Some(Input::Back),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}

/// Screen region for click hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && (column - self.x) < self.width
            && (row - self.y) < self.height
    }
}
