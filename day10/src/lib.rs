use std::{collections::HashSet, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidHeight(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidHeight(c) => write!(f, "Invalid character({}) for height.", c),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

const TRAIL_HEAD: u8 = 0;
const TRAIL_END: u8 = 9;

#[derive(Debug)]
pub struct TopoMap {
    heights: Vec<u8>,
    row_n: usize,
    col_n: usize,
}

impl TryFrom<&str> for TopoMap {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut heights = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            for c in line.chars() {
                heights.push(c.to_digit(10).ok_or(Error::InvalidHeight(c))? as u8);
            }
            row_n += 1;
        }

        Ok(Self {
            heights,
            row_n,
            col_n: col_n.unwrap_or(0),
        })
    }
}

impl TopoMap {
    pub fn trailheads(&self) -> Vec<usize> {
        (0..self.heights.len())
            .filter(|ind| self.heights[*ind] == TRAIL_HEAD)
            .collect()
    }

    /// Number of distinct height-9 positions reachable from given trailhead.
    pub fn score(&self, trailhead: usize) -> usize {
        let mut reached = HashSet::from([trailhead]);
        let mut frontier = vec![trailhead];
        while let Some(ind) = frontier.pop() {
            for next_ind in self.uphill_neighbors(ind) {
                if reached.insert(next_ind) {
                    frontier.push(next_ind);
                }
            }
        }

        let score = reached
            .iter()
            .filter(|ind| self.heights[**ind] == TRAIL_END)
            .count();
        log::debug!(
            "Trailhead at ({}, {}) has score {}.",
            trailhead / self.col_n,
            trailhead % self.col_n,
            score
        );

        score
    }

    /// Number of distinct hiking trails starting at each position.
    pub fn ratings(&self) -> Vec<usize> {
        let mut ratings = vec![0; self.heights.len()];
        for height in (TRAIL_HEAD..=TRAIL_END).rev() {
            for ind in (0..self.heights.len()).filter(|ind| self.heights[*ind] == height) {
                ratings[ind] = if height == TRAIL_END {
                    1
                } else {
                    self.uphill_neighbors(ind).map(|n| ratings[n]).sum()
                };
            }
        }
        for ind in self.trailheads() {
            log::debug!(
                "Trailhead at ({}, {}) has rating {}.",
                ind / self.col_n,
                ind % self.col_n,
                ratings[ind]
            );
        }

        ratings
    }

    fn uphill_neighbors(&self, ind: usize) -> impl Iterator<Item = usize> + '_ {
        let (r, c) = (ind / self.col_n, ind % self.col_n);
        let height = self.heights[ind];
        [
            (r > 0).then(|| ind - self.col_n),
            (r + 1 < self.row_n).then(|| ind + self.col_n),
            (c > 0).then(|| ind - 1),
            (c + 1 < self.col_n).then(|| ind + 1),
        ]
        .into_iter()
        .flatten()
        .filter(move |n| self.heights[*n] == height + 1)
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<TopoMap> {
    let text = common::read_text(&path)?;
    TopoMap::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse topographic map in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_scores() {
        let map = TopoMap::try_from(EXAMPLE).unwrap();
        let scores = map
            .trailheads()
            .into_iter()
            .map(|ind| map.score(ind))
            .collect::<Vec<_>>();
        assert_eq!(scores, [5, 6, 5, 3, 1, 3, 5, 3, 5]);
    }

    #[test]
    fn example_ratings() {
        let map = TopoMap::try_from(EXAMPLE).unwrap();
        let ratings = map.ratings();
        let head_ratings = map
            .trailheads()
            .into_iter()
            .map(|ind| ratings[ind])
            .collect::<Vec<_>>();
        assert_eq!(head_ratings, [20, 24, 10, 4, 1, 4, 5, 8, 5]);
    }

    #[test]
    fn single_trail() {
        let map = TopoMap::try_from("0123\n7654\n8900\n").unwrap();
        assert_eq!(map.score(0), 1);
        assert_eq!(map.ratings()[0], 1);
    }
}
