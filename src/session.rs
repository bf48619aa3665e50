// session.rs - game session over levels of sokomad
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

use log::{debug,info,warn};
use thiserror::Error as ThisError;

use crate::defs::*;

use crate::{Level,LevelState};

/// Command given by player.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub enum Command {
    /// Move in direction.
    Move(Direction),
    /// Undo last move.
    Undo,
    /// Restart current level.
    Restart,
    /// Go to next level. Allowed only if current level is completed.
    NextLevel,
    /// Go to previous level.
    PreviousLevel,
}

impl Command {
    /// Get command from character of move script.
    pub fn from_char(c: char) -> Option<Command> {
        match c {
            'l'|'L' => Some(Command::Move(Direction::Left)),
            'r'|'R' => Some(Command::Move(Direction::Right)),
            'u'|'U' => Some(Command::Move(Direction::Up)),
            'd'|'D' => Some(Command::Move(Direction::Down)),
            'z'|'Z' => Some(Command::Undo),
            '!' => Some(Command::Restart),
            '>' => Some(Command::NextLevel),
            '<' => Some(Command::PreviousLevel),
            _ => None,
        }
    }
}

/// Result of going to next level.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub enum Advance {
    /// New current level index.
    Level(usize),
    /// There is no next level. Session starts again from first level.
    AllLevelsComplete,
}

/// Result of a command.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub enum CommandOutcome {
    /// Move has been made or blocked.
    Moved(MoveOutcome),
    /// True if a move has been undone.
    Undone(bool),
    /// Current level has been restarted.
    Restarted,
    /// Next level (or first level after the last one) has been chosen.
    Advanced(Advance),
    /// True if previous level has been chosen.
    Retreated(bool),
    /// Command is not allowed in current state.
    Rejected,
}

/// Error caused while starting session or running script.
#[derive(ThisError,PartialEq,Eq,Debug)]
pub enum SessionError {
    /// Session can't be started without levels.
    #[error("No levels to play")]
    NoLevels,
    /// Script contains character that is not a command.
    #[error("Unknown command '{0}'")]
    UnknownCommand(char),
}

/// Game session. Holds index of current level and its state.
#[derive(Debug)]
pub struct Session<'a> {
    levels: &'a [Level],
    current: usize,
    state: LevelState<'a>,
}

impl<'a> Session<'a> {
    /// Create session starting at level with given index. Too big index
    /// starts session from first level.
    pub fn new(levels: &'a [Level], initial: usize) -> Result<Session<'a>, SessionError> {
        let first = levels.first().ok_or(SessionError::NoLevels)?;
        let mut session = Session{ levels, current: 0, state: LevelState::new(first) };
        if initial < levels.len() {
            session.load(initial);
        } else {
            warn!("Level index {} out of range, starting from first level", initial);
            session.load(0);
        }
        Ok(session)
    }

    fn load(&mut self, index: usize) {
        let levels = self.levels;
        self.current = index;
        self.state = LevelState::new(&levels[index]);
        info!("Level {}/{} '{}'", index+1, levels.len(), levels[index].name());
    }

    /// Get index of current level.
    pub fn current_index(&self) -> usize {
        self.current
    }
    /// Get number of levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
    /// Get current level state.
    pub fn state(&self) -> &LevelState<'a> {
        &self.state
    }

    /// Restart current level - discard all moves and history.
    pub fn restart(&mut self) {
        self.load(self.current);
    }

    /// Go to next level if it exists. Otherwise start again from first level.
    pub fn advance(&mut self) -> Advance {
        if self.current+1 < self.levels.len() {
            self.load(self.current+1);
            Advance::Level(self.current)
        } else {
            info!("All levels completed");
            self.load(0);
            Advance::AllLevelsComplete
        }
    }

    /// Go to previous level if it exists and restart it.
    pub fn retreat(&mut self) -> bool {
        if self.current > 0 {
            self.load(self.current-1);
            true
        } else { false }
    }

    /// Handle command of player.
    pub fn handle(&mut self, cmd: Command) -> CommandOutcome {
        let outcome = match cmd {
            Command::Move(_) if self.state.is_completed() => CommandOutcome::Rejected,
            Command::NextLevel if !self.state.is_completed() => CommandOutcome::Rejected,
            Command::Move(dir) => CommandOutcome::Moved(self.state.make_move(dir)),
            Command::Undo => CommandOutcome::Undone(self.state.undo_move()),
            Command::Restart => {
                self.restart();
                CommandOutcome::Restarted
            }
            Command::NextLevel => CommandOutcome::Advanced(self.advance()),
            Command::PreviousLevel => CommandOutcome::Retreated(self.retreat()),
        };
        debug!("Command {:?}: {:?}", cmd, outcome);
        outcome
    }

    /// Run script of commands (see `Command::from_char`). Whitespaces are ignored.
    /// Script is checked before any command is run.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<CommandOutcome>, SessionError> {
        let cmds = script.chars().filter(|c| !c.is_whitespace())
            .map(|c| Command::from_char(c).ok_or(SessionError::UnknownCommand(c)))
            .collect::<Result<Vec<Command>, SessionError>>()?;
        Ok(cmds.into_iter().map(|cmd| self.handle(cmd)).collect())
    }
}
