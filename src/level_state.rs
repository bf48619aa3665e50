// level_state.rs - level state and moves of sokomad
//
// sokomad - Sokoban puzzle core
// Copyright (C) 2022  Mateusz Szpakowski
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA

use std::fmt;
use log::debug;

use crate::defs::*;

use crate::history::History;
use crate::Level;
use MoveOutcome::*;

/// LevelState is state game in given a level. Tiles are borrowed from level,
/// packs and player are copied from level and changed by moves.
#[derive(PartialEq,Eq,Debug,Clone)]
pub struct LevelState<'a> {
    pub(crate) level: &'a Level,
    player: Position,
    packs: Vec<Position>,
    steps: usize,
    pushes: usize,
    completed: bool,
    history: History,
}

impl<'a> LevelState<'a> {
    /// Create new level state from level.
    pub fn new(level: &'a Level) -> LevelState<'a> {
        let mut ls = LevelState{ level, player: level.player(),
                packs: level.packs().to_vec(), steps: 0, pushes: 0,
                completed: false, history: History::new() };
        ls.completed = ls.all_packs_on_goals();
        ls
    }

    /// Return level.
    pub fn level(&self) -> &'a Level {
        self.level
    }
    /// Return player position.
    pub fn player(&self) -> Position {
        self.player
    }
    /// Return positions of packs. Index of pack never changes.
    pub fn packs(&self) -> &[Position] {
        &self.packs
    }
    /// Return number of steps (including steps with push).
    pub fn steps(&self) -> usize {
        self.steps
    }
    /// Return number of pushes.
    pub fn pushes(&self) -> usize {
        self.pushes
    }
    /// Return undo history.
    pub fn history(&self) -> &History {
        &self.history
    }
    /// Return true if all packs lie on goals.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Return index of pack at position.
    pub fn pack_at(&self, pos: Position) -> Option<usize> {
        self.packs.iter().position(|p| *p == pos)
    }

    /// Return current field (tile with its occupant) at position.
    pub fn field(&self, pos: Position) -> Field {
        Field::with_occupant(self.level.tile(pos), self.pack_at(pos).is_some(),
                self.player == pos)
    }

    /// Reset level state to original state - undo all moves.
    pub fn reset(&mut self) {
        *self = LevelState::new(self.level);
    }

    fn all_packs_on_goals(&self) -> bool {
        self.packs.iter().all(|p| self.level.tile(*p) == TileKind::Goal)
    }

    /// Make move if possible. Returns Blocked if nothing has been changed,
    /// Stepped if player only moved and Pushed if player moved a pack.
    pub fn make_move(&mut self, dir: Direction) -> MoveOutcome {
        let next_pos = match self.player.next(dir) {
            Some(p) if self.level.tile(p).is_walkable() => p,
            _ => return Blocked,
        };

        let outcome = if let Some(pack) = self.pack_at(next_pos) {
            let next2_pos = match next_pos.next(dir) {
                Some(p) if self.level.tile(p).is_walkable() => p,
                _ => return Blocked,
            };
            if self.pack_at(next2_pos).is_some() {
                return Blocked;
            }
            self.history.record_push(self.player, pack, next_pos);
            self.packs[pack] = next2_pos;
            self.pushes += 1;
            Pushed
        } else {
            self.history.record_step(self.player);
            Stepped
        };
        self.player = next_pos;
        self.steps += 1;
        self.completed = self.all_packs_on_goals();
        debug!("Move {} {:?} to {}, steps: {}, pushes: {}", dir, outcome, self.player,
                self.steps, self.pushes);
        outcome
    }

    /// Undo move. Return true if move undone. Completion is evaluated again,
    /// so undoing the last push of a completed level makes it not completed.
    pub fn undo_move(&mut self) -> bool {
        if let Some(m) = self.history.pop() {
            self.player = m.player;
            if let Some(push) = m.push {
                self.packs[push.pack] = push.position;
                self.pushes = self.pushes.saturating_sub(1);
            }
            self.steps = self.steps.saturating_sub(1);
            self.completed = self.all_packs_on_goals();
            debug!("Undo move to {}, steps: {}, pushes: {}", self.player,
                    self.steps, self.pushes);
            true
        } else { false }
    }
}

impl fmt::Display for LevelState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.level.height() {
            if y != 0 {
                writeln!(f)?;
            }
            for x in 0..self.level.width() {
                write!(f, "{}", self.field(Position::new(x, y)).to_char())?;
            }
        }
        Ok(())
    }
}
