use std::{
    collections::{BTreeMap, HashSet},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use itertools::Itertools;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    EmptyMap,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::EmptyMap => write!(f, "Given antenna map is empty."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: isize,
    c: isize,
}

impl Position {
    pub fn new(r: isize, c: isize) -> Self {
        Self { r, c }
    }

    fn offset_to(&self, other: &Self) -> (isize, isize) {
        (other.r - self.r, other.c - self.c)
    }

    fn shift(&self, (dr, dc): (isize, isize), times: isize) -> Self {
        Self::new(self.r + dr * times, self.c + dc * times)
    }
}

#[derive(Debug)]
pub struct AntennaMap {
    antennas: BTreeMap<char, Vec<Position>>,
    row_n: isize,
    col_n: isize,
}

impl TryFrom<&str> for AntennaMap {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut antennas = BTreeMap::new();
        let mut row_n = 0;
        let mut col_n = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            for (c, freq) in line.chars().enumerate().filter(|(_, ch)| *ch != '.') {
                antennas
                    .entry(freq)
                    .or_insert_with(Vec::new)
                    .push(Position::new(row_n, c as isize));
            }
            row_n += 1;
        }

        let col_n = col_n.ok_or(Error::EmptyMap)? as isize;
        Ok(Self {
            antennas,
            row_n,
            col_n,
        })
    }
}

impl AntennaMap {
    /// Antinodes at twice the distance from each antenna of a same-frequency pair.
    pub fn antinodes(&self) -> HashSet<Position> {
        self.pairs()
            .flat_map(|(a, b)| {
                let offset = a.offset_to(&b);
                [a.shift(offset, -1), b.shift(offset, 1)]
            })
            .filter(|pos| self.is_inside(pos))
            .collect()
    }

    /// Antinodes at every grid point in line with a same-frequency pair.
    pub fn resonant_antinodes(&self) -> HashSet<Position> {
        let mut antinodes = HashSet::new();
        for (a, b) in self.pairs() {
            let offset = a.offset_to(&b);
            for dir in [1, -1] {
                let mut pos = a;
                while self.is_inside(&pos) {
                    antinodes.insert(pos);
                    pos = pos.shift(offset, dir);
                }
            }
        }

        antinodes
    }

    pub fn frequency_n(&self) -> usize {
        self.antennas.len()
    }

    fn pairs(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.antennas.iter().flat_map(|(freq, positions)| {
            log::debug!("Frequency {} has {} antennas.", freq, positions.len());
            positions.iter().copied().tuple_combinations()
        })
    }

    fn is_inside(&self, pos: &Position) -> bool {
        (0..self.row_n).contains(&pos.r) && (0..self.col_n).contains(&pos.c)
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<AntennaMap> {
    let text = common::read_text(&path)?;
    AntennaMap::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse antenna map in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_antinodes() {
        let map = AntennaMap::try_from(EXAMPLE).unwrap();
        assert_eq!(map.frequency_n(), 2);
        assert_eq!(map.antinodes().len(), 14);
    }

    #[test]
    fn example_resonant_antinodes() {
        let map = AntennaMap::try_from(EXAMPLE).unwrap();
        assert_eq!(map.resonant_antinodes().len(), 34);
    }

    #[test]
    fn lone_antenna_has_no_antinodes() {
        let map = AntennaMap::try_from("...\n.a.\n...\n").unwrap();
        assert!(map.antinodes().is_empty());
        assert!(map.resonant_antinodes().is_empty());
    }

    #[test]
    fn resonant_line_through_t_antennas() {
        let map = AntennaMap::try_from(
            "T.........\n...T......\n.T........\n..........\n..........\n\
             ..........\n..........\n..........\n..........\n..........\n",
        )
        .unwrap();
        assert_eq!(map.resonant_antinodes().len(), 9);
    }
}
