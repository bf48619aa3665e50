// lib.rs - main library of sokomad
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

//! Core of Sokoban puzzle: level model, movement rules with bounded undo,
//! level sets and game session.

mod defs;
mod history;
mod level;
mod level_set;
mod level_state;
mod session;
pub mod config;

pub use defs::*;
pub use history::{History,Movement,PushRecord,HISTORY_CAPACITY};
pub use level::{Level,Tile};
pub use level_set::{LevelSet,LevelResult};
pub use level_state::LevelState;
pub use session::{Session,SessionError,Command,CommandOutcome,Advance};
