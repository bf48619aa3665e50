// defs.rs - common definitions of sokomad
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

use std::error::Error;
use std::fmt;
use std::io;
use int_enum::IntEnum;
use thiserror::Error as ThisError;

/// Type represents direction of the move.
#[repr(u8)]
#[derive(PartialEq,Eq,Debug,Clone,Copy,IntEnum)]
pub enum Direction {
    /// Move left.
    Left = 0,
    /// Move right.
    Right = 1,
    /// Move up.
    Up = 2,
    /// Move down.
    Down = 3,
}

/// Unit offsets indexed by integer value of the direction.
const DIRECTION_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Direction {
    /// All directions in order of their integer values.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right,
                Direction::Up, Direction::Down];

    /// Return unit offset (dx, dy) of this direction.
    pub fn offset(self) -> (isize, isize) {
        DIRECTION_OFFSETS[self.int_value() as usize]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Static kind of a tile. A kind never changes during play; packs and
/// the player are tracked apart from the tiles.
#[repr(u8)]
#[derive(PartialEq,Eq,Debug,Clone,Copy,IntEnum)]
pub enum TileKind {
    /// Outside of the level.
    Empty = 0,
    /// Wall.
    Wall = 1,
    /// Floor.
    Floor = 2,
    /// Goal for a pack.
    Goal = 3,
}

impl TileKind {
    /// Return true if player or pack can stand on this tile.
    pub fn is_walkable(self) -> bool {
        self == TileKind::Floor || self == TileKind::Goal
    }
}

/// Type represents single cell code in level layout.
#[repr(u8)]
#[derive(PartialEq,Eq,Debug,Clone,Copy,IntEnum)]
pub enum Field {
    /// Empty field (outside of level).
    Empty = 0,
    /// Wall.
    Wall = 1,
    /// Floor.
    Floor = 2,
    /// Pack on floor.
    Pack = 3,
    /// Pack on goal.
    PackOnGoal = 4,
    /// Empty goal.
    Goal = 5,
    /// Player on floor.
    Player = 6,
    /// Player on goal.
    PlayerOnGoal = 7,
}

use Field::*;

impl Field {
    /// Return true if is player in this field.
    pub fn is_player(self) -> bool {
        self == Player || self == PlayerOnGoal
    }
    /// Return true if is pack in this field.
    pub fn is_pack(self) -> bool {
        self == Pack || self == PackOnGoal
    }
    /// Return tile kind under this field.
    pub fn tile_kind(self) -> TileKind {
        match self {
            Empty => TileKind::Empty,
            Wall => TileKind::Wall,
            Floor|Pack|Player => TileKind::Floor,
            Goal|PackOnGoal|PlayerOnGoal => TileKind::Goal,
        }
    }
    /// Return field for a tile with optional occupant.
    pub fn with_occupant(kind: TileKind, pack: bool, player: bool) -> Field {
        match (kind, pack, player) {
            (TileKind::Floor, true, _) => Pack,
            (TileKind::Goal, true, _) => PackOnGoal,
            (TileKind::Floor, false, true) => Player,
            (TileKind::Goal, false, true) => PlayerOnGoal,
            (TileKind::Floor, false, false) => Floor,
            (TileKind::Goal, false, false) => Goal,
            (TileKind::Wall, _, _) => Wall,
            (TileKind::Empty, _, _) => Empty,
        }
    }
    /// Return layout code of this field.
    pub fn to_char(self) -> char {
        match self {
            Empty => ' ',
            Wall => '#',
            Floor => '-',
            Pack => '$',
            PackOnGoal => '*',
            Goal => '.',
            Player => '@',
            PlayerOnGoal => '+',
        }
    }
}

pub(crate) fn char_to_field(x: char) -> Field {
    match x {
        '#' => Wall,
        '-'|'_' => Floor,
        '$' => Pack,
        '*' => PackOnGoal,
        '.' => Goal,
        '@' => Player,
        '+' => PlayerOnGoal,
        _ => Empty,
    }
}

/// Position (column, row) in level area.
#[derive(PartialEq,Eq,Debug,Clone,Copy,Hash,PartialOrd,Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Position {
        Position{ x, y }
    }

    /// Return neighbour in given direction or None if it would have
    /// negative coordinates.
    pub fn next(self, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.offset();
        let x = self.x as isize + dx;
        let y = self.y as isize + dy;
        if x >= 0 && y >= 0 {
            Some(Position{ x: x as usize, y: y as usize })
        } else { None }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Result of the move attempt.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub enum MoveOutcome {
    /// Move is not possible. Nothing has been changed.
    Blocked,
    /// Player stepped to free field.
    Stepped,
    /// Player stepped and pushed pack.
    Pushed,
}

impl MoveOutcome {
    /// Return true if player has been moved.
    pub fn is_move(self) -> bool {
        self != MoveOutcome::Blocked
    }
}

/// Level design problem found by level check.
#[derive(ThisError,Debug,PartialEq,Eq)]
pub enum CheckError {
    /// No packs and goals.
    #[error("No packs and goals")]
    NoPacksAndGoals,
    /// If too few packs - number of required packs.
    #[error("Too few packs - required {0}")]
    TooFewPacks(usize),
    /// If too few goals - number of required goals.
    #[error("Too few goals - required {0}")]
    TooFewGoals(usize),
    /// If pack is not reachable for player - place of pack.
    #[error("Pack {0}x{1} not reachable")]
    PackNotReachable(usize, usize),
    /// If goal is not reachable for player - place of goal.
    #[error("Goal {0}x{1} not reachable")]
    GoalNotReachable(usize, usize),
    /// If pack is locked in wall corner - place of pack.
    #[error("Locked pack {0}x{1} in corner")]
    LockedPackInCorner(usize, usize),
    /// If walls and packs creates 2x2 block - place of 2x2 block.
    #[error("Locked 2x2 block {0}x{1}")]
    Locked2x2Block(usize, usize),
}

/// Type contains all check errors.
#[derive(PartialEq,Eq)]
pub struct CheckErrors(Vec<CheckError>);

impl fmt::Display for CheckErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().take(self.0.len().saturating_sub(1)).fold(Ok(()),
                |r,x| r.and(write!(f, "{}. ", x)))?;
        if let Some(x) = self.0.last() {
            write!(f, "{}.", x)
        } else { Ok(()) }
    }
}

impl fmt::Debug for CheckErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self as &dyn fmt::Display).fmt(f)
    }
}

impl CheckErrors {
    pub(crate) fn new() -> CheckErrors {
        CheckErrors(Vec::new())
    }
    pub(crate) fn push(&mut self, e: CheckError) {
        self.0.push(e)
    }
    /// Return number of problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Return true if no problem found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Return all problems.
    pub fn errors(&self) -> &[CheckError] {
        &self.0
    }
}

impl Error for CheckErrors {
}

/// Error caused while building level from layout. Level is never built partially.
#[derive(ThisError,PartialEq,Eq,Debug)]
pub enum ParseError {
    /// If number of rows differs from height - expected width and height.
    #[error("Wrong size {0}x{1}")]
    WrongSize(usize, usize),
    /// If row length differs from width - number of row.
    #[error("Wrong length of row {0}")]
    WrongRowLength(usize),
    /// If floor or goal lies on the border of the area - place of field.
    #[error("Open border at {0}x{1}")]
    OpenBorder(usize, usize),
    /// No player.
    #[error("No player")]
    NoPlayer,
    /// Too many players.
    #[error("Too many players")]
    TooManyPlayers,
}

/// Level parse errors - contains errors and level name
#[derive(ThisError,PartialEq,Eq,Debug)]
#[error("Nr: {number}, Name: {name}, Error: {error}")]
pub struct LevelParseError {
    pub(crate) number: usize,
    pub(crate) name: String,
    pub(crate) error: ParseError,
}

impl LevelParseError {
    /// Get number of level in level set.
    pub fn number(&self) -> usize {
        self.number
    }
    /// Get name of level.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Get cause.
    pub fn error(&self) -> &ParseError {
        &self.error
    }
}

/// Error caused while reading whole level set.
#[derive(ThisError,Debug)]
pub enum LevelSetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// If bad structure of XML content.
    #[error("Bad structure of XML")]
    BadStructure,
    /// If attribute of level has wrong value.
    #[error("Bad attribute {0}")]
    BadAttribute(String),
}
