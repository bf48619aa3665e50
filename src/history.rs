// history.rs - bounded undo history of sokomad
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

use arrayvec::ArrayVec;

use crate::defs::*;

/// Maximal number of movements that can be undone.
pub const HISTORY_CAPACITY: usize = 3;

/// Pack displaced by a push: index of pack and its position before push.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub struct PushRecord {
    pub pack: usize,
    pub position: Position,
}

/// Single undoable movement: player position before move and
/// pushed pack if move was a push.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub struct Movement {
    pub player: Position,
    pub push: Option<PushRecord>,
}

/// History of last movements. If history is full, recording a new movement
/// drops the oldest one.
#[derive(PartialEq,Eq,Debug,Clone,Default)]
pub struct History {
    entries: ArrayVec<Movement, HISTORY_CAPACITY>,
}

impl History {
    /// Create empty history.
    pub fn new() -> History {
        History{ entries: ArrayVec::new() }
    }

    /// Record plain step.
    pub fn record_step(&mut self, player: Position) {
        self.record(Movement{ player, push: None });
    }

    /// Record push of pack.
    pub fn record_push(&mut self, player: Position, pack: usize, pack_pos: Position) {
        self.record(Movement{ player, push: Some(PushRecord{ pack, position: pack_pos }) });
    }

    fn record(&mut self, m: Movement) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(m);
    }

    /// Remove and return the newest movement.
    pub fn pop(&mut self) -> Option<Movement> {
        self.entries.pop()
    }

    /// Get number of recorded movements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Returns true if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Get recorded movements from the oldest.
    pub fn movements(&self) -> &[Movement] {
        &self.entries
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_record_and_pop() {
        let mut history = History::new();
        assert_eq!(None, history.pop());
        history.record_step(Position::new(1, 1));
        history.record_push(Position::new(2, 1), 0, Position::new(3, 1));
        assert_eq!(2, history.len());
        assert_eq!(Some(Movement{ player: Position::new(2, 1),
                push: Some(PushRecord{ pack: 0, position: Position::new(3, 1) }) }),
                history.pop());
        assert_eq!(Some(Movement{ player: Position::new(1, 1), push: None }),
                history.pop());
        assert!(history.is_empty());
        assert_eq!(None, history.pop());
    }

    #[test]
    fn test_evict_oldest() {
        let mut history = History::new();
        for x in 1..=4 {
            history.record_step(Position::new(x, 1));
        }
        assert_eq!(HISTORY_CAPACITY, history.len());
        let players: Vec<usize> = history.movements().iter().map(|m| m.player.x).collect();
        assert_eq!(vec![2, 3, 4], players);
        assert_eq!(Some(4), history.pop().map(|m| m.player.x));
        history.record_step(Position::new(5, 1));
        history.record_step(Position::new(6, 1));
        let players: Vec<usize> = history.movements().iter().map(|m| m.player.x).collect();
        assert_eq!(vec![3, 5, 6], players);
    }
}
