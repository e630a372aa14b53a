use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    EmptyPuzzle,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::EmptyPuzzle => write!(f, "Given word search puzzle is empty."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug)]
pub struct WordSearch {
    letters: Vec<char>,
    row_n: usize,
    col_n: usize,
}

impl TryFrom<&str> for WordSearch {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut letters = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            letters.extend(line.chars());
            row_n += 1;
        }

        let col_n = col_n.ok_or(Error::EmptyPuzzle)?;
        Ok(Self {
            letters,
            row_n,
            col_n,
        })
    }
}

impl WordSearch {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    /// Counts occurrences of `word` in all 8 directions, overlaps included.
    pub fn word_count(&self, word: &str) -> usize {
        let word = word.chars().collect::<Vec<_>>();
        let Some(first) = word.first() else {
            return 0;
        };

        let mut count = 0;
        for r in 0..self.row_n {
            for c in 0..self.col_n {
                if self.letter(r as isize, c as isize) != Some(*first) {
                    continue;
                }

                count += ALL_DIRECTIONS
                    .iter()
                    .filter(|(dr, dc)| {
                        word.iter().enumerate().skip(1).all(|(ind, letter)| {
                            let ind = ind as isize;
                            self.letter(r as isize + dr * ind, c as isize + dc * ind)
                                == Some(*letter)
                        })
                    })
                    .count();
            }
        }

        count
    }

    /// Counts `A`s whose two diagonals both read MAS in either direction.
    pub fn x_mas_count(&self) -> usize {
        let mut count = 0;
        for r in 1..self.row_n.saturating_sub(1) {
            for c in 1..self.col_n.saturating_sub(1) {
                if self.is_x_mas_center(r as isize, c as isize) {
                    log::debug!("X-MAS found at center ({}, {}).", r, c);
                    count += 1;
                }
            }
        }

        count
    }

    fn is_x_mas_center(&self, r: isize, c: isize) -> bool {
        if self.letter(r, c) != Some('A') {
            return false;
        }

        let is_ms_pair = |a: Option<char>, b: Option<char>| {
            matches!((a, b), (Some('M'), Some('S')) | (Some('S'), Some('M')))
        };

        is_ms_pair(self.letter(r - 1, c - 1), self.letter(r + 1, c + 1))
            && is_ms_pair(self.letter(r - 1, c + 1), self.letter(r + 1, c - 1))
    }

    fn letter(&self, r: isize, c: isize) -> Option<char> {
        if r < 0 || c < 0 || r as usize >= self.row_n || c as usize >= self.col_n {
            return None;
        }

        self.letters.get(r as usize * self.col_n + c as usize).copied()
    }
}

pub fn read_word_search<P: AsRef<Path>>(path: P) -> Result<WordSearch> {
    let text = common::read_text(&path)?;
    WordSearch::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse word search in given file({}).",
            path.as_ref().display()
        )
    })
}
