use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use itertools::Itertools;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidCharForSchematic(char),
    UnknownSchematicKind,
    BrokenColumn(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidCharForSchematic(c) => {
                write!(f, "Invalid character({}) for schematic.", c)
            }
            Error::UnknownSchematicKind => write!(
                f,
                "Expect a filled top row for lock or a filled bottom row for key."
            ),
            Error::BrokenColumn(c) => write!(
                f,
                "Column {} of schematic isn't one consecutive run of pins.",
                c
            ),
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
pub enum SchematicKind {
    Lock,
    Key,
}

/// A lock or key, described by the pin height of each column without the filled base row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    kind: SchematicKind,
    heights: Vec<usize>,
    space: usize,
}

impl TryFrom<&str> for Schematic {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut rows = Vec::new();
        let mut col_n = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            let row = line
                .chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(Error::InvalidCharForSchematic(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let is_filled = |row: Option<&Vec<bool>>| row.is_some_and(|r| r.iter().all(|p| *p));
        let kind = if is_filled(rows.first()) {
            SchematicKind::Lock
        } else if is_filled(rows.last()) {
            SchematicKind::Key
        } else {
            return Err(Error::UnknownSchematicKind);
        };

        // Count pins growing away from the base row.
        if kind == SchematicKind::Key {
            rows.reverse();
        }
        let col_n = col_n.unwrap_or(0);
        let mut heights = Vec::with_capacity(col_n);
        for c in 0..col_n {
            let run_n = rows.iter().take_while(|row| row[c]).count();
            if rows.iter().skip(run_n).any(|row| row[c]) {
                return Err(Error::BrokenColumn(c));
            }
            heights.push(run_n - 1);
        }

        Ok(Self {
            kind,
            heights,
            space: rows.len().saturating_sub(2),
        })
    }
}

impl Schematic {
    pub fn kind(&self) -> SchematicKind {
        self.kind
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    /// Whether a lock and a key fit together without any column overlapping.
    pub fn fits(&self, other: &Self) -> bool {
        self.kind != other.kind
            && self.heights.len() == other.heights.len()
            && self
                .heights
                .iter()
                .zip(&other.heights)
                .all(|(a, b)| a + b <= self.space.min(other.space))
    }
}

pub fn fitting_pair_n(schematics: &[Schematic]) -> usize {
    let (locks, keys): (Vec<_>, Vec<_>) = schematics
        .iter()
        .partition(|s| s.kind() == SchematicKind::Lock);
    log::debug!("{} lock(s) and {} key(s).", locks.len(), keys.len());

    locks
        .iter()
        .cartesian_product(keys.iter())
        .filter(|(lock, key)| lock.fits(key))
        .count()
}

pub fn parse_schematics(text: &str) -> Result<Vec<Schematic>, Error> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(Schematic::try_from)
        .collect()
}

pub fn read_schematics<P: AsRef<Path>>(path: P) -> Result<Vec<Schematic>> {
    let text = common::read_text(&path)?;
    parse_schematics(&text).with_context(|| {
        format!(
            "Failed to parse schematics in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Vec<Schematic> {
        parse_schematics(include_str!("../example.txt")).unwrap()
    }

    #[test]
    fn example_heights() {
        let schematics = example();
        assert_eq!(schematics[0].kind(), SchematicKind::Lock);
        assert_eq!(schematics[0].heights(), [0, 5, 3, 4, 3]);
        assert_eq!(schematics[2].kind(), SchematicKind::Key);
        assert_eq!(schematics[2].heights(), [5, 0, 2, 1, 3]);
    }

    #[test]
    fn example_fitting_pairs() {
        let schematics = example();
        assert!(!schematics[0].fits(&schematics[2]));
        assert!(schematics[0].fits(&schematics[4]));
        assert_eq!(fitting_pair_n(&schematics), 3);
    }

    #[test]
    fn floating_pin_is_rejected() {
        assert!(matches!(
            Schematic::try_from("###\n#..\n..#\n...\n"),
            Err(Error::BrokenColumn(2))
        ));
    }
}
