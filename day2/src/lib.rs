use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidLevelText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidLevelText(s) => write!(f, "Invalid text({}) for level.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    levels: Vec<isize>,
}

impl TryFrom<&str> for Report {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        value
            .split_ascii_whitespace()
            .map(|s| {
                s.parse::<isize>()
                    .map_err(|_| Error::InvalidLevelText(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Report::new)
    }
}

impl Report {
    pub fn new(levels: Vec<isize>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[isize] {
        &self.levels
    }

    pub fn is_safe(&self) -> bool {
        Self::is_safe_levels(self.levels.iter().copied())
    }

    /// Safe as is, or safe after removing exactly one level.
    pub fn is_safe_with_dampener(&self) -> bool {
        if self.is_safe() {
            return true;
        }

        (0..self.levels.len()).any(|skip_ind| {
            let safe = Self::is_safe_levels(
                self.levels
                    .iter()
                    .enumerate()
                    .filter(|(ind, _)| *ind != skip_ind)
                    .map(|(_, level)| *level),
            );
            if safe {
                log::debug!(
                    "Report {:?} is safe by removing level #{}({}).",
                    self.levels,
                    skip_ind,
                    self.levels[skip_ind]
                );
            }
            safe
        })
    }

    fn is_safe_levels<I: Iterator<Item = isize>>(mut levels: I) -> bool {
        let Some(mut last) = levels.next() else {
            return true;
        };

        let mut sign = None;
        for level in levels {
            let diff = level - last;
            if !(1..=3).contains(&diff.abs()) {
                return false;
            }

            if *sign.get_or_insert(diff.signum()) != diff.signum() {
                return false;
            }
            last = level;
        }

        true
    }
}

pub fn parse_reports(text: &str) -> Result<Vec<Report>, Error> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(Report::try_from)
        .collect()
}

pub fn read_reports<P: AsRef<Path>>(path: P) -> Result<Vec<Report>> {
    common::read_nonempty_lines(&path)?
        .iter()
        .map(|l| {
            Report::try_from(l.as_str())
                .with_context(|| format!("Failed to read levels from given string({}).", l))
        })
        .collect()
}
