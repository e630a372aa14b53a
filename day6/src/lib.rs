use std::{collections::HashSet, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use rayon::prelude::*;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidCharForMap(char),
    MultipleGuards(Position, Position),
    NoGuard,
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
            Error::MultipleGuards(last_pos, pos) => write!(
                f,
                "Expect only one guard, given two at {} and {}.",
                last_pos, pos
            ),
            Error::NoGuard => write!(f, "No guard in map."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn turn_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    fn ind(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patrol {
    Exit(HashSet<Position>),
    Loop,
}

#[derive(Debug)]
pub struct Map {
    obstacles: Vec<bool>,
    row_n: usize,
    col_n: usize,
    guard_pos: Position,
    guard_dir: Direction,
}

impl TryFrom<&str> for Map {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut obstacles = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        let mut guard = None;
        for line in value.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            for (c, ch) in line.chars().enumerate() {
                let dir = match ch {
                    '.' => None,
                    '#' => {
                        obstacles.push(true);
                        continue;
                    }
                    '^' => Some(Direction::Up),
                    '>' => Some(Direction::Right),
                    'v' => Some(Direction::Down),
                    '<' => Some(Direction::Left),
                    other => return Err(Error::InvalidCharForMap(other)),
                };
                if let Some(dir) = dir {
                    let pos = Position::new(row_n, c);
                    if let Some((last_pos, _)) = guard {
                        return Err(Error::MultipleGuards(last_pos, pos));
                    }
                    guard = Some((pos, dir));
                }
                obstacles.push(false);
            }
            row_n += 1;
        }

        let (guard_pos, guard_dir) = guard.ok_or(Error::NoGuard)?;
        Ok(Self {
            obstacles,
            row_n,
            col_n: col_n.unwrap_or(0),
            guard_pos,
            guard_dir,
        })
    }
}

impl Map {
    pub fn guard_pos(&self) -> Position {
        self.guard_pos
    }

    /// Walks the guard until it leaves the map or repeats a (position, direction) state.
    pub fn patrol(&self, extra_obstacle: Option<Position>) -> Patrol {
        let mut seen_states = vec![false; self.obstacles.len() * 4];
        let mut pos = self.guard_pos;
        let mut dir = self.guard_dir;
        loop {
            let state_ind = self.pos_to_ind(&pos) * 4 + dir.ind();
            if seen_states[state_ind] {
                return Patrol::Loop;
            }
            seen_states[state_ind] = true;

            let Some(next_pos) = pos.neighbor(dir).filter(|p| self.is_inside(p)) else {
                break;
            };
            if self.is_obstacle(&next_pos) || extra_obstacle == Some(next_pos) {
                dir = dir.turn_right();
            } else {
                pos = next_pos;
            }
        }

        let visited = (0..self.obstacles.len())
            .filter(|ind| seen_states[(ind * 4)..(ind * 4 + 4)].iter().any(|s| *s))
            .map(|ind| Position::new(ind / self.col_n, ind % self.col_n))
            .collect();
        Patrol::Exit(visited)
    }

    /// Positions where a single new obstacle traps the guard in a loop.
    pub fn loop_obstacles(&self) -> Vec<Position> {
        let Patrol::Exit(visited) = self.patrol(None) else {
            return Vec::new();
        };
        log::debug!("Testing {} candidate obstacle positions.", visited.len() - 1);

        let mut obstacles = visited
            .into_par_iter()
            .filter(|pos| *pos != self.guard_pos)
            .filter(|pos| self.patrol(Some(*pos)) == Patrol::Loop)
            .collect::<Vec<_>>();
        obstacles.sort_unstable_by_key(|pos| (pos.r, pos.c));
        obstacles
    }

    fn is_obstacle(&self, pos: &Position) -> bool {
        self.obstacles[self.pos_to_ind(pos)]
    }

    fn is_inside(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n
    }

    fn pos_to_ind(&self, pos: &Position) -> usize {
        pos.r * self.col_n + pos.c
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<Map> {
    let text = common::read_text(&path)?;
    Map::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse map in given file({}).",
            path.as_ref().display()
        )
    })
}
