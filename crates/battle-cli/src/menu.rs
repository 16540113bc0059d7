//! Menu selection state

use std::fmt;

/// A list with one selected entry; Up and Down wrap around
#[derive(Debug, Clone)]
pub struct Menu<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T> Menu<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn up(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn index(&self) -> usize {
        self.selected
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Battle,
    ViewMonsters,
    AddMonster,
    UpdateMonster,
    DeleteMonster,
    MigrateRoster,
    Exit,
}

impl MainAction {
    pub const ALL: [MainAction; 7] = [
        MainAction::Battle,
        MainAction::ViewMonsters,
        MainAction::AddMonster,
        MainAction::UpdateMonster,
        MainAction::DeleteMonster,
        MainAction::MigrateRoster,
        MainAction::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainAction::Battle => "Battle",
            MainAction::ViewMonsters => "View Monsters",
            MainAction::AddMonster => "Add Monster",
            MainAction::UpdateMonster => "Update Monster",
            MainAction::DeleteMonster => "Delete Monster",
            MainAction::MigrateRoster => "Migrate Roster",
            MainAction::Exit => "Exit",
        }
    }

    pub fn main_menu() -> Menu<MainAction> {
        Menu::new(Self::ALL.to_vec())
    }
}

impl fmt::Display for MainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut menu = MainAction::main_menu();
        assert_eq!(menu.selected(), Some(&MainAction::Battle));
        menu.up();
        assert_eq!(menu.selected(), Some(&MainAction::Exit));
        menu.down();
        assert_eq!(menu.selected(), Some(&MainAction::Battle));
        for _ in 0..8 {
            menu.down();
        }
        assert_eq!(menu.index(), 1);
    }

    #[test]
    fn test_empty_menu() {
        let mut menu: Menu<String> = Menu::new(Vec::new());
        menu.up();
        menu.down();
        assert!(menu.is_empty());
        assert_eq!(menu.selected(), None);
    }
}
