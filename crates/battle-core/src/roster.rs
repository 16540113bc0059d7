//! Roster access and opponent selection

use crate::error::{Error, Result};
use crate::{GameRng, Monster, MonsterId};
use std::convert::Infallible;
use std::fmt;

/// Read access to the monster roster
///
/// The battle core never creates, updates or deletes records; menus do that
/// directly on the store.
pub trait Roster {
    type Error: fmt::Display;

    /// All records, in a stable order
    fn list(&self) -> std::result::Result<Vec<Monster>, Self::Error>;
}

impl Roster for [Monster] {
    type Error = Infallible;

    fn list(&self) -> std::result::Result<Vec<Monster>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl Roster for Vec<Monster> {
    type Error = Infallible;

    fn list(&self) -> std::result::Result<Vec<Monster>, Self::Error> {
        Ok(self.clone())
    }
}

/// List a roster, folding its error into the core error type
pub fn fetch<R: Roster + ?Sized>(roster: &R) -> Result<Vec<Monster>> {
    roster.list().map_err(|e| Error::Roster(e.to_string()))
}

/// Records that may be offered on the choose-monster screen
pub fn selectable(monsters: &[Monster]) -> Vec<&Monster> {
    monsters.iter().filter(|m| m.is_selectable()).collect()
}

/// Sample an opponent uniformly among every selectable record except `chosen`
///
/// Exclusion is by id, so two records with identical stats remain distinct
/// candidates.
pub fn select_opponent(
    monsters: &[Monster],
    chosen: MonsterId,
    rng: &mut GameRng,
) -> Result<Monster> {
    let available = selectable(monsters).len();
    if monsters.len() < 2 {
        return Err(Error::InsufficientRoster { available });
    }
    if !monsters.iter().any(|m| m.id == chosen) {
        return Err(Error::UnknownMonster(chosen));
    }

    let candidates: Vec<&Monster> = monsters
        .iter()
        .filter(|m| m.id != chosen && m.is_selectable())
        .collect();

    match rng.pick(&candidates) {
        Some(opponent) => {
            tracing::debug!(
                "Selected opponent {} ({}) from {} candidates",
                opponent.name,
                opponent.id,
                candidates.len()
            );
            Ok((*opponent).clone())
        }
        None => Err(Error::InsufficientRoster { available }),
    }
}
