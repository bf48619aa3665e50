// level.rs - level layout of sokomad
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

use crate::defs::*;

use CheckError::*;
use ParseError::*;

/// Single tile of level area.
#[derive(PartialEq,Eq,Debug,Clone,Copy)]
pub struct Tile {
    pub position: Position,
    pub kind: TileKind,
}

/// Level in game. Name is optional name - can be empty. Width and height determines
/// dimensions of the level. Tiles are ordered from top to bottom and from left
/// to right. Packs are ordered in the same way and their order is never changed,
/// so an index of a pack identifies it during whole play.
#[derive(PartialEq,Eq,Debug,Clone)]
pub struct Level {
    pub(crate) name: String,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) tiles: Vec<TileKind>,
    pub(crate) packs: Vec<Position>,
    pub(crate) player: Position,
}

impl Level {
    /// Get name of the level.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Get width of the level.
    pub fn width(&self) -> usize {
        self.width
    }
    /// Get height of the level.
    pub fn height(&self) -> usize {
        self.height
    }
    /// Get initial positions of packs.
    pub fn packs(&self) -> &[Position] {
        &self.packs
    }
    /// Get initial position of player.
    pub fn player(&self) -> Position {
        self.player
    }

    /// Get kind of tile at position. Position outside area gives Empty.
    pub fn tile(&self, pos: Position) -> TileKind {
        if pos.x < self.width && pos.y < self.height {
            self.tiles[pos.y*self.width + pos.x]
        } else {
            TileKind::Empty
        }
    }

    /// Iterate over all tiles.
    pub fn tiles(&self) -> impl Iterator<Item=Tile> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(i, kind)| Tile{
            position: Position::new(i % width, i / width), kind: *kind })
    }

    /// Get number of goals.
    pub fn goals_count(&self) -> usize {
        self.tiles.iter().filter(|k| **k == TileKind::Goal).count()
    }

    /// Get initial field (tile with its occupant) at position.
    pub fn field(&self, pos: Position) -> Field {
        Field::with_occupant(self.tile(pos), self.packs.contains(&pos),
                self.player == pos)
    }

    /// Create level from rows of layout. Number of rows must be equal to height
    /// and every row must have width fields.
    pub fn from_rows<S: AsRef<str>>(name: &str, width: usize, height: usize,
                    rows: &[S]) -> Result<Level, ParseError> {
        if width == 0 || height == 0 || rows.len() != height {
            return Err(WrongSize(width, height));
        }
        let mut tiles = Vec::with_capacity(width*height);
        let mut packs = vec![];
        let mut player = None;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(WrongRowLength(y));
            }
            for (x, c) in row.chars().enumerate() {
                let field = char_to_field(c);
                let kind = field.tile_kind();
                if kind.is_walkable() && (x == 0 || y == 0 || x+1 == width || y+1 == height) {
                    return Err(OpenBorder(x, y));
                }
                if field.is_pack() {
                    packs.push(Position::new(x, y));
                }
                if field.is_player() {
                    if player.is_some() {
                        return Err(TooManyPlayers);
                    }
                    player = Some(Position::new(x, y));
                }
                tiles.push(kind);
            }
        }
        let player = player.ok_or(NoPlayer)?;
        Ok(Level{ name: String::from(name), width, height, tiles, packs, player })
    }

    /// Parse level from string - all rows joined together.
    pub fn from_str(name: &str, width: usize, height: usize, astr: &str)
                    -> Result<Level, ParseError> {
        let chars: Vec<char> = astr.chars().collect();
        if width == 0 || chars.len() != width*height {
            return Err(WrongSize(width, height));
        }
        let rows: Vec<String> = chars.chunks(width).map(|r| r.iter().collect())
                .collect();
        Self::from_rows(name, width, height, &rows)
    }

    // fill all tiles reachable from player
    fn fill_from_player(&self) -> Vec<bool> {
        let mut filled = vec![false; self.width*self.height];
        let mut stk = vec![self.player];
        while let Some(pos) = stk.pop() {
            let i = pos.y*self.width + pos.x;
            if filled[i] || !self.tile(pos).is_walkable() {
                continue;  // if wall or already filled
            }
            filled[i] = true;
            for dir in Direction::ALL.iter() {
                if let Some(next) = pos.next(*dir) {
                    if next.x < self.width && next.y < self.height {
                        stk.push(next);
                    }
                }
            }
        }
        filled
    }

    /// Check level design. Returns all found problems. A level with problems
    /// still can be played.
    pub fn check(&self) -> Result<(), CheckErrors> {
        let mut errors = CheckErrors::new();
        // check number of packs and goals.
        let packs_num = self.packs.len();
        let goals_num = self.goals_count();
        if packs_num == 0 && goals_num == 0 {
            errors.push(NoPacksAndGoals);
        } else if packs_num < goals_num {
            errors.push(TooFewPacks(goals_num));
        } else if goals_num < packs_num {
            errors.push(TooFewGoals(packs_num));
        }

        // check reachability
        let filled = self.fill_from_player();
        self.packs.iter().for_each(|p| {
            if !filled[p.y*self.width + p.x] {
                errors.push(PackNotReachable(p.x, p.y));
            }
        });
        self.tiles().for_each(|t| {
            if t.kind == TileKind::Goal && !filled[t.position.y*self.width + t.position.x] {
                errors.push(GoalNotReachable(t.position.x, t.position.y));
            }
        });

        let mut pack_mask = vec![false; self.width*self.height];
        self.packs.iter().for_each(|p| pack_mask[p.y*self.width + p.x] = true);
        let is_pack = |x: usize, y: usize| pack_mask[y*self.width + x];
        let is_wall = |x: usize, y: usize| self.tiles[y*self.width + x] == TileKind::Wall;

        // find locks
        for iy in 0..self.height-1 {
            for ix in 0..self.width-1 {
                let block = [(ix, iy), (ix+1, iy), (ix, iy+1), (ix+1, iy+1)];
                if block.iter().all(|&(x, y)| is_pack(x, y) || is_wall(x, y)) {
                    // only if not all packs in goal
                    let off_goal = block.iter().any(|&(x, y)| is_pack(x, y) &&
                            self.tiles[y*self.width + x] != TileKind::Goal);
                    if off_goal {
                        errors.push(Locked2x2Block(ix, iy));
                    }
                }
            }
        }
        for p in self.packs.iter() {
            let (ix, iy) = (p.x, p.y);
            // packs never lie on the border
            if self.tiles[iy*self.width + ix] == TileKind::Goal {
                continue;
            }
            let wall_u = is_wall(ix, iy-1);
            let wall_d = is_wall(ix, iy+1);
            let wall_l = is_wall(ix-1, iy);
            let wall_r = is_wall(ix+1, iy);
            if (wall_u || wall_d) && (wall_l || wall_r) {
                errors.push(LockedPackInCorner(ix, iy));
            }
        }

        if !errors.is_empty() {
            Err(errors)
        } else { Ok(()) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_from_rows() {
        let levela = Level::from_rows("blable", 5, 3, &[
            "#####",
            "#.$@#",
            "#####"]).unwrap();
        let levelb = Level::from_str("blable", 5, 3,
            "#####\
             #.$@#\
             #####").unwrap();
        assert_eq!(levela, levelb);
        assert_eq!(vec![Position::new(2, 1)], levela.packs());
        assert_eq!(Position::new(3, 1), levela.player());
        assert_eq!(TileKind::Goal, levela.tile(Position::new(1, 1)));
        assert_eq!(TileKind::Floor, levela.tile(Position::new(2, 1)));
        assert_eq!(TileKind::Floor, levela.tile(Position::new(3, 1)));
        assert_eq!(TileKind::Empty, levela.tile(Position::new(5, 1)));
        assert_eq!(TileKind::Empty, levela.tile(Position::new(1, 3)));
        assert_eq!(Field::Pack, levela.field(Position::new(2, 1)));

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#------#",
            "#--+.*-#",
            "#--$$--#",
            "#------#",
            " ###### "]).unwrap();
        assert_eq!(vec![Position::new(5, 2), Position::new(3, 3), Position::new(4, 3)],
                level.packs());
        assert_eq!(Position::new(3, 2), level.player());
        assert_eq!(3, level.goals_count());
        assert_eq!(TileKind::Empty, level.tile(Position::new(0, 0)));
        assert_eq!(TileKind::Goal, level.tile(Position::new(3, 2)));
        assert_eq!(48, level.tiles().count());
        assert_eq!(Some(Tile{ position: Position::new(5, 2), kind: TileKind::Goal }),
                level.tiles().nth(2*8 + 5));
        // other characters are empty fields
        let level = Level::from_rows("other", 5, 3, &[
            "#####",
            "#@-x#",
            "#####"]).unwrap();
        assert_eq!(TileKind::Empty, level.tile(Position::new(3, 1)));
    }

    #[test]
    fn test_level_from_rows_errors() {
        assert_eq!(Err(WrongSize(5, 4)), Level::from_rows("x", 5, 4, &[
            "#####",
            "#.$@#",
            "#####"]));
        assert_eq!(Err(WrongRowLength(1)), Level::from_rows("x", 5, 3, &[
            "#####",
            "#.$@##",
            "#####"]));
        assert_eq!(Err(WrongRowLength(2)), Level::from_rows("x", 5, 3, &[
            "#####",
            "#.$@#",
            "####"]));
        assert_eq!(Err(WrongSize(5, 3)), Level::from_str("x", 5, 3, "#####"));
        assert_eq!(Err(OpenBorder(4, 1)), Level::from_rows("x", 5, 3, &[
            "#####",
            "#.$@-",
            "#####"]));
        assert_eq!(Err(OpenBorder(2, 0)), Level::from_rows("x", 5, 3, &[
            "##.##",
            "#.$@#",
            "#####"]));
        assert_eq!(Err(NoPlayer), Level::from_rows("x", 5, 3, &[
            "#####",
            "#.$-#",
            "#####"]));
        assert_eq!(Err(TooManyPlayers), Level::from_rows("x", 6, 3, &[
            "######",
            "#.$@+#",
            "######"]));
    }

    #[test]
    fn test_check() {
        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#------#",
            "#@--...#",
            "#---$$$#",
            "#------#",
            " ###### "]).unwrap();
        assert_eq!(Ok(()), level.check());

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#------#",
            "#@--.*.#",
            "#---$-$#",
            "#------#",
            " ###### "]).unwrap();
        assert_eq!(Ok(()), level.check());

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#------#",
            "#@--..-#",
            "#---$$$#",
            "#------#",
            " ###### "]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(TooFewGoals(3));
        assert_eq!(Err(errors), level.check());

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#-----.#",
            "#@--...#",
            "#---$$-#",
            "#------#",
            " ###### "]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(TooFewPacks(4));
        assert_eq!(Err(errors), level.check());

        let level = Level::from_rows("git", 5, 3, &[
            "#####",
            "#@--#",
            "#####"]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(NoPacksAndGoals);
        assert_eq!(Err(errors), level.check());

        // reachability
        let level = Level::from_rows("git", 11, 6, &[
            " ######### ",
            "#------#..#",
            "#@--...#$$#",
            "#---$$$### ",
            "#------#   ",
            " ######    "]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(PackNotReachable(8, 2));
        errors.push(PackNotReachable(9, 2));
        errors.push(GoalNotReachable(8, 1));
        errors.push(GoalNotReachable(9, 1));
        errors.push(Locked2x2Block(7, 2));
        errors.push(Locked2x2Block(8, 2));
        errors.push(LockedPackInCorner(8, 2));
        errors.push(LockedPackInCorner(9, 2));
        assert_eq!(Err(errors), level.check());

        // locks
        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#---...#",
            "#@--$$.#",
            "#---$$-#",
            "#------#",
            " ###### "]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(Locked2x2Block(4, 2));
        assert_eq!(Err(errors), level.check());

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#------#",
            "#@--**-#",
            "#---**-#",
            "#------#",
            " ###### "]).unwrap();
        assert_eq!(Ok(()), level.check());

        let level = Level::from_rows("git", 8, 6, &[
            " ###### ",
            "#$--..*#",
            "#@----.#",
            "#------#",
            "#$----$#",
            " ###### "]).unwrap();
        let mut errors = CheckErrors::new();
        errors.push(LockedPackInCorner(1, 1));
        errors.push(LockedPackInCorner(1, 4));
        errors.push(LockedPackInCorner(6, 4));
        assert_eq!(Err(errors), level.check());
    }
}
