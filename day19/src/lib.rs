use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    NoPatterns,
    EmptyPattern,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoPatterns => write!(f, "Expect towel patterns in the first line."),
            Error::EmptyPattern => write!(f, "Towel pattern can't be empty."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug)]
pub struct Towels {
    patterns: Vec<String>,
}

impl TryFrom<&str> for Towels {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let patterns = value
            .split(',')
            .map(str::trim)
            .map(|s| {
                if s.is_empty() {
                    Err(Error::EmptyPattern)
                } else {
                    Ok(s.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }
}

impl Towels {
    pub fn is_possible(&self, design: &str) -> bool {
        self.arrangement_n(design) > 0
    }

    /// Ways to build the design, counted over each prefix length.
    pub fn arrangement_n(&self, design: &str) -> u64 {
        let mut ways = vec![0u64; design.len() + 1];
        ways[0] = 1;
        for start in 0..design.len() {
            if ways[start] == 0 {
                continue;
            }

            for pattern in &self.patterns {
                if design.as_bytes()[start..].starts_with(pattern.as_bytes()) {
                    ways[start + pattern.len()] += ways[start];
                }
            }
        }
        log::debug!("Design {} has {} arrangement(s).", design, ways[design.len()]);

        ways[design.len()]
    }
}

pub fn parse_towels_designs(text: &str) -> Result<(Towels, Vec<String>), Error> {
    let mut lines = text.lines().map(str::trim);
    let towels = Towels::try_from(
        lines
            .by_ref()
            .find(|l| !l.is_empty())
            .ok_or(Error::NoPatterns)?,
    )?;
    let designs = lines
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    Ok((towels, designs))
}

pub fn read_towels_designs<P: AsRef<Path>>(path: P) -> Result<(Towels, Vec<String>)> {
    let text = common::read_text(&path)?;
    parse_towels_designs(&text).with_context(|| {
        format!(
            "Failed to parse towel patterns and designs in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_designs() {
        let (towels, designs) = parse_towels_designs(include_str!("../example.txt")).unwrap();
        let ways = designs
            .iter()
            .map(|d| towels.arrangement_n(d))
            .collect::<Vec<_>>();
        assert_eq!(ways, [2, 1, 4, 6, 0, 1, 2, 0]);
        assert_eq!(designs.iter().filter(|d| towels.is_possible(d)).count(), 6);
        assert_eq!(ways.iter().sum::<u64>(), 16);
    }

    #[test]
    fn no_patterns() {
        assert!(matches!(parse_towels_designs("\n\n"), Err(Error::NoPatterns)));
    }
}
