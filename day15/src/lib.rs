use std::{collections::HashSet, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidCharForMap(char),
    InvalidCharForMove(char),
    MultipleRobots(usize, usize),
    NoRobot,
    NoMoves,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::InvalidCharForMove(c) => write!(f, "Invalid character({}) for move.", c),
            Error::MultipleRobots(r, c) => {
                write!(f, "Expect only one robot, given another at ({}, {}).", r, c)
            }
            Error::NoRobot => write!(f, "No robot in map."),
            Error::NoMoves => write!(f, "Expect a blank line followed by the robot's moves."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Box,
    BoxLeft,
    BoxRight,
}

impl Tile {
    fn symbol(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => '.',
            Tile::Box => 'O',
            Tile::BoxLeft => '[',
            Tile::BoxRight => ']',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl TryFrom<char> for Direction {
    type Error = Error;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            '^' => Ok(Direction::Up),
            '>' => Ok(Direction::Right),
            'v' => Ok(Direction::Down),
            '<' => Ok(Direction::Left),
            other => Err(Error::InvalidCharForMove(other)),
        }
    }
}

impl Direction {
    fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Position {
    r: usize,
    c: usize,
}

impl Position {
    fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    fn step(&self, dir: Direction) -> Option<Self> {
        let (r, c) = (self.r, self.c);
        Some(match dir {
            Direction::Up => Self::new(r.checked_sub(1)?, c),
            Direction::Right => Self::new(r, c + 1),
            Direction::Down => Self::new(r + 1, c),
            Direction::Left => Self::new(r, c.checked_sub(1)?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Warehouse {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    robot: Position,
}

impl TryFrom<&str> for Warehouse {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut tiles = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        let mut robot = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            for (c, ch) in line.chars().enumerate() {
                tiles.push(match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Empty,
                    'O' => Tile::Box,
                    '[' => Tile::BoxLeft,
                    ']' => Tile::BoxRight,
                    '@' => {
                        if robot.replace(Position::new(row_n, c)).is_some() {
                            return Err(Error::MultipleRobots(row_n, c));
                        }
                        Tile::Empty
                    }
                    other => return Err(Error::InvalidCharForMap(other)),
                });
            }
            row_n += 1;
        }

        Ok(Self {
            tiles,
            row_n,
            col_n: col_n.unwrap_or(0),
            robot: robot.ok_or(Error::NoRobot)?,
        })
    }
}

impl Display for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.row_n {
            for c in 0..self.col_n {
                let pos = Position::new(r, c);
                if pos == self.robot {
                    write!(f, "@")?;
                } else {
                    write!(f, "{}", self.tile(&pos).symbol())?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Warehouse {
    /// Doubles every tile horizontally, boxes become `[]`.
    pub fn widen(&self) -> Self {
        let tiles = self
            .tiles
            .iter()
            .flat_map(|tile| match tile {
                Tile::Wall => [Tile::Wall, Tile::Wall],
                Tile::Box => [Tile::BoxLeft, Tile::BoxRight],
                Tile::Empty | Tile::BoxLeft | Tile::BoxRight => [Tile::Empty, Tile::Empty],
            })
            .collect();

        Self {
            tiles,
            row_n: self.row_n,
            col_n: self.col_n * 2,
            robot: Position::new(self.robot.r, self.robot.c * 2),
        }
    }

    /// Tries to move the robot, pushing every box in the way or nothing at all.
    /// The map's edge blocks like a wall.
    pub fn move_robot(&mut self, dir: Direction) -> bool {
        let mut movers = vec![self.robot];
        let mut targets = Vec::new();
        let mut seen = HashSet::from([self.robot]);
        let mut ind = 0;
        while ind < movers.len() {
            let Some(next) = self.step(&movers[ind], dir) else {
                return false;
            };
            ind += 1;
            targets.push(next);
            let other_half = match self.tile(&next) {
                Tile::Wall => return false,
                Tile::Empty => continue,
                Tile::BoxLeft if dir.is_vertical() => self.step(&next, Direction::Right),
                Tile::BoxRight if dir.is_vertical() => self.step(&next, Direction::Left),
                Tile::Box | Tile::BoxLeft | Tile::BoxRight => None,
            };
            for pos in std::iter::once(next).chain(other_half) {
                if seen.insert(pos) {
                    movers.push(pos);
                }
            }
        }

        let moved_tiles = movers
            .iter()
            .zip(&targets)
            .skip(1)
            .map(|(pos, target)| (*pos, *target, *self.tile(pos)))
            .collect::<Vec<_>>();
        for (pos, _, _) in &moved_tiles {
            *self.tile_mut(pos) = Tile::Empty;
        }
        for (_, target, tile) in moved_tiles {
            *self.tile_mut(&target) = tile;
        }
        self.robot = targets[0];

        true
    }

    pub fn gps_sum(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| matches!(tile, Tile::Box | Tile::BoxLeft))
            .map(|(ind, _)| (ind / self.col_n) * 100 + ind % self.col_n)
            .sum()
    }

    fn step(&self, pos: &Position, dir: Direction) -> Option<Position> {
        pos.step(dir)
            .filter(|next| next.r < self.row_n && next.c < self.col_n)
    }

    fn tile(&self, pos: &Position) -> &Tile {
        &self.tiles[pos.r * self.col_n + pos.c]
    }

    fn tile_mut(&mut self, pos: &Position) -> &mut Tile {
        &mut self.tiles[pos.r * self.col_n + pos.c]
    }
}

pub fn parse_puzzle(text: &str) -> Result<(Warehouse, Vec<Direction>), Error> {
    let text = text.replace("\r\n", "\n");
    let (map_text, moves_text) = text.split_once("\n\n").ok_or(Error::NoMoves)?;
    let warehouse = Warehouse::try_from(map_text)?;
    let moves = moves_text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Direction::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((warehouse, moves))
}

pub fn read_puzzle<P: AsRef<Path>>(path: P) -> Result<(Warehouse, Vec<Direction>)> {
    let text = common::read_text(&path)?;
    parse_puzzle(&text).with_context(|| {
        format!(
            "Failed to parse warehouse and moves in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(warehouse: &mut Warehouse, moves: &[Direction]) {
        for dir in moves {
            warehouse.move_robot(*dir);
        }
    }

    #[test]
    fn small_example() {
        let (mut warehouse, moves) = parse_puzzle(include_str!("../example.txt")).unwrap();
        run(&mut warehouse, &moves);
        assert_eq!(warehouse.gps_sum(), 2028);
    }

    #[test]
    fn widened_example() {
        let (warehouse, moves) = parse_puzzle(include_str!("../example2.txt")).unwrap();
        let mut wide = warehouse.widen();
        assert_eq!(
            wide.to_string().lines().nth(3),
            Some("##....[][]@.##")
        );
        run(&mut wide, &moves);
        assert_eq!(
            wide.to_string(),
            "##############\n\
             ##...[].##..##\n\
             ##...@.[]...##\n\
             ##....[]....##\n\
             ##..........##\n\
             ##..........##\n\
             ##############\n"
        );
        assert_eq!(wide.gps_sum(), 105 + 207 + 306);
    }

    #[test]
    fn blocked_wide_push_moves_nothing() {
        let mut wide = Warehouse::try_from("######\n#.#..#\n#[]..#\n#.@..#\n######\n").unwrap();
        let before = wide.to_string();
        assert!(!wide.move_robot(Direction::Up));
        assert_eq!(wide.to_string(), before);
    }

    #[test]
    fn large_example() {
        let (warehouse, moves) = parse_puzzle(include_str!("../example3.txt")).unwrap();
        let mut narrow = warehouse.clone();
        run(&mut narrow, &moves);
        assert_eq!(narrow.gps_sum(), 10092);

        let mut wide = warehouse.widen();
        run(&mut wide, &moves);
        assert_eq!(wide.gps_sum(), 9021);
    }

    #[test]
    fn map_edge_blocks_robot() {
        let (mut warehouse, _) = parse_puzzle("#...\n#..@\n\n>\n").unwrap();
        assert!(!warehouse.move_robot(Direction::Right));
        assert!(warehouse.move_robot(Direction::Up));
        assert!(!warehouse.move_robot(Direction::Up));
        assert_eq!(warehouse.to_string(), "#..@\n#...\n");

        let (mut warehouse, _) = parse_puzzle("..@.\n#...\n\n^\n").unwrap();
        assert!(!warehouse.move_robot(Direction::Up));
        assert_eq!(warehouse.to_string(), "..@.\n#...\n");
    }

    #[test]
    fn map_edge_blocks_boxes() {
        let mut warehouse = Warehouse::try_from("O@.\n").unwrap();
        assert!(!warehouse.move_robot(Direction::Left));
        assert!(warehouse.move_robot(Direction::Right));
        assert!(!warehouse.move_robot(Direction::Right));

        let mut wide = Warehouse::try_from("[]\n@.\n").unwrap();
        assert!(!wide.move_robot(Direction::Up));
        assert_eq!(wide.to_string(), "[]\n@.\n");
    }

    #[test]
    fn gps_of_single_box() {
        let warehouse = Warehouse::try_from("#######\n#...O..\n#.....@\n").unwrap();
        assert_eq!(warehouse.gps_sum(), 104);
    }
}
