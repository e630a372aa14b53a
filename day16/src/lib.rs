use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    RaggedRow(usize, usize),
    DuplicateTile(char, Position),
    InvalidCharForMaze(char),
    MissingTile(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RaggedRow(row_ind, col_n) => write!(
                f,
                "Row {} of maze has {} tile(s), different from the first row.",
                row_ind, col_n
            ),
            Error::DuplicateTile(c, pos) => write!(f, "Found another {} tile at {}.", c, pos),
            Error::InvalidCharForMaze(c) => write!(f, "Invalid character({}) for maze.", c),
            Error::MissingTile(c) => write!(f, "Expect one {} tile in maze, found none.", c),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub const FORWARD_SCORE: usize = 1;
pub const TURN_SCORE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}, column {}", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    fn offset(&self, (dr, dc): (isize, isize)) -> Option<Self> {
        Some(Self::new(
            self.r.checked_add_signed(dr)?,
            self.c.checked_add_signed(dc)?,
        ))
    }
}

/// Compass heading, numbered clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Heading(u8);

impl Heading {
    pub const NORTH: Heading = Heading(0);
    pub const EAST: Heading = Heading(1);
    pub const SOUTH: Heading = Heading(2);
    pub const WEST: Heading = Heading(3);

    pub fn all() -> impl Iterator<Item = Heading> {
        (0..4).map(Heading)
    }

    pub fn rotate(&self, quarter_n: u8) -> Self {
        Heading((self.0 + quarter_n) % 4)
    }

    fn delta(&self) -> (isize, isize) {
        [(-1, 0), (0, 1), (1, 0), (0, -1)][usize::from(self.0)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reindeer {
    pos: Position,
    heading: Heading,
}

impl Reindeer {
    pub fn new(pos: Position, heading: Heading) -> Self {
        Self { pos, heading }
    }
}

#[derive(Debug)]
pub struct Maze {
    walls: Vec<bool>,
    row_n: usize,
    col_n: usize,
    start_pos: Position,
    end_pos: Position,
}

impl TryFrom<&str> for Maze {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut walls = Vec::new();
        let mut col_n = None;
        let mut start_pos = None;
        let mut end_pos = None;
        let rows = value.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut row_n = 0;
        for (r, row) in rows.enumerate() {
            let this_col_n = row.chars().count();
            if *col_n.get_or_insert(this_col_n) != this_col_n {
                return Err(Error::RaggedRow(r, this_col_n));
            }

            for (c, ch) in row.chars().enumerate() {
                let marker = match ch {
                    '#' | '.' => None,
                    'S' => Some(&mut start_pos),
                    'E' => Some(&mut end_pos),
                    other => return Err(Error::InvalidCharForMaze(other)),
                };
                if let Some(marker) = marker {
                    let pos = Position::new(r, c);
                    if marker.replace(pos).is_some() {
                        return Err(Error::DuplicateTile(ch, pos));
                    }
                }
                walls.push(ch == '#');
            }
            row_n += 1;
        }

        Ok(Self {
            walls,
            row_n,
            col_n: col_n.unwrap_or(0),
            start_pos: start_pos.ok_or(Error::MissingTile('S'))?,
            end_pos: end_pos.ok_or(Error::MissingTile('E'))?,
        })
    }
}

impl Maze {
    pub fn min_score(&self) -> Option<usize> {
        let scores = self.scores_from(&[self.start_deer()], false);
        let min_score = self.end_score(&scores);
        log::debug!(
            "Searched {} state(s), lowest score to the end: {:?}.",
            scores.len(),
            min_score
        );

        min_score
    }

    /// Positions on at least one path with the minimum score.
    pub fn best_path_positions(&self) -> HashSet<Position> {
        let from_start = self.scores_from(&[self.start_deer()], false);
        let Some(min_score) = self.end_score(&from_start) else {
            return HashSet::new();
        };

        let end_deers = Heading::all()
            .map(|heading| Reindeer::new(self.end_pos, heading))
            .collect::<Vec<_>>();
        let to_end = self.scores_from(&end_deers, true);
        let positions = from_start
            .iter()
            .filter(|(deer, score)| {
                to_end
                    .get(deer)
                    .is_some_and(|rest| **score + rest == min_score)
            })
            .map(|(deer, _)| deer.pos)
            .collect::<HashSet<_>>();
        log::debug!(
            "{} tile(s) lie on best paths with score {}.",
            positions.len(),
            min_score
        );

        positions
    }

    pub fn is_open(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n && !self.walls[pos.r * self.col_n + pos.c]
    }

    fn end_score(&self, scores: &HashMap<Reindeer, usize>) -> Option<usize> {
        Heading::all()
            .filter_map(|heading| scores.get(&Reindeer::new(self.end_pos, heading)))
            .min()
            .copied()
    }

    /// Dijkstra over (position, heading) states, walking backwards when `reverse` is set.
    fn scores_from(&self, sources: &[Reindeer], reverse: bool) -> HashMap<Reindeer, usize> {
        let mut scores = sources
            .iter()
            .map(|deer| (*deer, 0))
            .collect::<HashMap<_, _>>();
        let mut queue = sources
            .iter()
            .map(|deer| Reverse((0, *deer)))
            .collect::<BinaryHeap<_>>();
        while let Some(Reverse((score, deer))) = queue.pop() {
            if scores.get(&deer).is_some_and(|best| score > *best) {
                continue;
            }

            for (next_deer, cost) in self.moves(&deer, reverse) {
                let next_score = score + cost;
                if scores.get(&next_deer).map_or(true, |best| next_score < *best) {
                    scores.insert(next_deer, next_score);
                    queue.push(Reverse((next_score, next_deer)));
                }
            }
        }

        scores
    }

    fn moves(&self, deer: &Reindeer, reverse: bool) -> Vec<(Reindeer, usize)> {
        let mut moves = [1, 3]
            .into_iter()
            .map(|quarter_n| {
                let heading = deer.heading.rotate(quarter_n);
                (Reindeer::new(deer.pos, heading), TURN_SCORE)
            })
            .collect::<Vec<_>>();
        let step_heading = if reverse {
            deer.heading.rotate(2)
        } else {
            deer.heading
        };
        if let Some(next_pos) = deer.pos.offset(step_heading.delta()) {
            if self.is_open(&next_pos) {
                moves.push((Reindeer::new(next_pos, deer.heading), FORWARD_SCORE));
            }
        }

        moves
    }

    fn start_deer(&self) -> Reindeer {
        Reindeer::new(self.start_pos, Heading::EAST)
    }
}

pub fn read_maze<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let text = common::read_text(&path)?;
    Maze::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse reindeer maze in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_example() {
        let maze = Maze::try_from(include_str!("../example.txt")).unwrap();
        assert_eq!(maze.min_score(), Some(7036));
        assert_eq!(maze.best_path_positions().len(), 45);
    }

    #[test]
    fn second_example() {
        let maze = Maze::try_from(include_str!("../example2.txt")).unwrap();
        assert_eq!(maze.min_score(), Some(11048));
        assert_eq!(maze.best_path_positions().len(), 64);
    }

    #[test]
    fn walled_off_end() {
        let maze = Maze::try_from("#####\n#S#E#\n#####\n").unwrap();
        assert_eq!(maze.min_score(), None);
        assert!(maze.best_path_positions().is_empty());
    }

    #[test]
    fn missing_end_is_rejected() {
        assert!(matches!(
            Maze::try_from("###\n#S#\n###\n"),
            Err(Error::MissingTile('E'))
        ));
    }

    #[test]
    fn headings_rotate_clockwise() {
        assert_eq!(Heading::NORTH.rotate(1), Heading::EAST);
        assert_eq!(Heading::EAST.rotate(2), Heading::WEST);
        assert_eq!(Heading::WEST.rotate(3), Heading::SOUTH);
        assert_eq!(Heading::all().count(), 4);
    }
}
