use std::{collections::VecDeque, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    RaggedRow(usize, usize),
    DuplicateTile(char, Position),
    InvalidCharForRacetrack(char),
    MissingTile(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RaggedRow(row_ind, col_n) => write!(
                f,
                "Row {} of racetrack has {} tile(s), different from the first row.",
                row_ind, col_n
            ),
            Error::DuplicateTile(c, pos) => write!(f, "Found another {} tile at {}.", c, pos),
            Error::InvalidCharForRacetrack(c) => {
                write!(f, "Invalid character({}) for racetrack.", c)
            }
            Error::MissingTile(c) => write!(f, "Expect one {} tile in racetrack, found none.", c),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Minimum picoseconds a cheat must save to be counted.
    #[arg(long)]
    pub threshold: Option<usize>,
}

impl CLIArgs {
    pub fn threshold(&self, test_default: usize) -> usize {
        self.threshold
            .unwrap_or(if self.input.test { test_default } else { 100 })
    }
}

pub const SHORT_CHEAT_LEN: usize = 2;
pub const LONG_CHEAT_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    pub fn manhattan_dist(&self, other: &Self) -> usize {
        self.r.abs_diff(other.r) + self.c.abs_diff(other.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Track,
    Wall,
}

#[derive(Debug)]
pub struct Racetrack {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    start_pos: Position,
    end_pos: Position,
}

impl Racetrack {
    /// Track positions reachable from the start, ordered by their distance from it.
    pub fn track(&self) -> Vec<(Position, usize)> {
        let mut dists = vec![None; self.tiles.len()];
        let start_ind = self.index(&self.start_pos);
        dists[start_ind] = Some(0);
        let mut track = Vec::new();
        let mut frontier = VecDeque::from([self.start_pos]);
        while let Some(pos) = frontier.pop_front() {
            let dist = dists[self.index(&pos)].unwrap_or(0);
            track.push((pos, dist));
            for next_pos in self.neighbors(&pos) {
                let next_ind = self.index(&next_pos);
                if self.tiles[next_ind] == Tile::Track && dists[next_ind].is_none() {
                    dists[next_ind] = Some(dist + 1);
                    frontier.push_back(next_pos);
                }
            }
        }

        track
    }

    pub fn fastest_time(&self) -> Option<usize> {
        self.track()
            .into_iter()
            .find(|(pos, _)| *pos == self.end_pos)
            .map(|(_, dist)| dist)
    }

    /// Counts cheats of at most `cheat_len` picoseconds saving `threshold` or more.
    pub fn cheat_n(&self, cheat_len: usize, threshold: usize) -> usize {
        let track = self.track();
        let mut cheat_n = 0;
        for (ind, (from_pos, from_dist)) in track.iter().enumerate() {
            for (to_pos, to_dist) in &track[(ind + 1)..] {
                let cheat_dist = from_pos.manhattan_dist(to_pos);
                if cheat_dist <= cheat_len && to_dist - from_dist >= threshold + cheat_dist {
                    cheat_n += 1;
                }
            }
        }
        log::debug!(
            "{} cheat(s) within {} picoseconds save at least {}.",
            cheat_n,
            cheat_len,
            threshold
        );

        cheat_n
    }

    fn neighbors(&self, pos: &Position) -> impl Iterator<Item = Position> {
        let (r, c, row_n, col_n) = (pos.r, pos.c, self.row_n, self.col_n);
        [
            (r > 0).then(|| Position::new(r - 1, c)),
            (c + 1 < col_n).then(|| Position::new(r, c + 1)),
            (r + 1 < row_n).then(|| Position::new(r + 1, c)),
            (c > 0).then(|| Position::new(r, c - 1)),
        ]
        .into_iter()
        .flatten()
    }

    fn index(&self, pos: &Position) -> usize {
        pos.r * self.col_n + pos.c
    }
}

impl TryFrom<&str> for Racetrack {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut tiles = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        let mut start_pos = None;
        let mut end_pos = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            if *col_n.get_or_insert(this_col_n) != this_col_n {
                return Err(Error::RaggedRow(row_n, this_col_n));
            }

            for (c, ch) in line.chars().enumerate() {
                let pos = Position::new(row_n, c);
                let marker = match ch {
                    '#' => {
                        tiles.push(Tile::Wall);
                        continue;
                    }
                    '.' => None,
                    'S' => Some(&mut start_pos),
                    'E' => Some(&mut end_pos),
                    other => return Err(Error::InvalidCharForRacetrack(other)),
                };
                if marker.is_some_and(|marker| marker.replace(pos).is_some()) {
                    return Err(Error::DuplicateTile(ch, pos));
                }
                tiles.push(Tile::Track);
            }
            row_n += 1;
        }

        Ok(Self {
            tiles,
            row_n,
            col_n: col_n.unwrap_or(0),
            start_pos: start_pos.ok_or(Error::MissingTile('S'))?,
            end_pos: end_pos.ok_or(Error::MissingTile('E'))?,
        })
    }
}

pub fn read_racetrack<P: AsRef<Path>>(path: P) -> Result<Racetrack> {
    let text = common::read_text(&path)?;
    Racetrack::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse racetrack in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Racetrack {
        Racetrack::try_from(include_str!("../example.txt")).unwrap()
    }

    #[test]
    fn example_fastest_time() {
        assert_eq!(example().fastest_time(), Some(84));
    }

    #[test]
    fn example_short_cheats() {
        let track = example();
        assert_eq!(track.cheat_n(SHORT_CHEAT_LEN, 2), 44);
        assert_eq!(track.cheat_n(SHORT_CHEAT_LEN, 64), 1);
    }

    #[test]
    fn example_long_cheats() {
        let track = example();
        assert_eq!(track.cheat_n(LONG_CHEAT_LEN, 50), 285);
        assert_eq!(track.cheat_n(LONG_CHEAT_LEN, 76), 3);
    }

    #[test]
    fn two_starts_are_rejected() {
        assert!(matches!(
            Racetrack::try_from("#####\n#S.S#\n#E..#\n#####\n"),
            Err(Error::DuplicateTile('S', _))
        ));
    }
}
