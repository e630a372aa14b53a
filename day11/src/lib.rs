use std::{collections::HashMap, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidStoneText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidStoneText(s) => write!(f, "Invalid text({}) for stone number.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// How many times to blink, defaults to 25 for part 1 and 75 for part 2.
    #[arg(long)]
    pub blinks: Option<usize>,
}

pub fn blink(stone: u64) -> Vec<u64> {
    if stone == 0 {
        return vec![1];
    }

    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half_base = 10u64.pow(digits / 2);
        vec![stone / half_base, stone % half_base]
    } else {
        vec![stone * 2024]
    }
}

/// Stone counts memoized by (stone number, blinks left).
#[derive(Debug, Default)]
pub struct StoneCounter {
    cache: HashMap<(u64, usize), usize>,
}

impl StoneCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_all(&mut self, stones: &[u64], blinks: usize) -> usize {
        let count = stones.iter().map(|s| self.count(*s, blinks)).sum();
        log::debug!(
            "{} stone(s) after {} blinks, {} cached states.",
            count,
            blinks,
            self.cache.len()
        );
        count
    }

    pub fn count(&mut self, stone: u64, blinks: usize) -> usize {
        if blinks == 0 {
            return 1;
        }

        if let Some(count) = self.cache.get(&(stone, blinks)) {
            return *count;
        }

        let count = blink(stone)
            .into_iter()
            .map(|s| self.count(s, blinks - 1))
            .sum();
        self.cache.insert((stone, blinks), count);
        count
    }
}

pub fn parse_stones(text: &str) -> Result<Vec<u64>, Error> {
    text.split_ascii_whitespace()
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| Error::InvalidStoneText(s.to_string()))
        })
        .collect()
}

pub fn read_stones<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let text = common::read_text(&path)?;
    parse_stones(&text).with_context(|| {
        format!(
            "Failed to parse stones in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_rules() {
        assert_eq!(blink(0), [1]);
        assert_eq!(blink(1), [2024]);
        assert_eq!(blink(10), [1, 0]);
        assert_eq!(blink(99), [9, 9]);
        assert_eq!(blink(999), [2021976]);
        assert_eq!(blink(1000), [10, 0]);
    }

    #[test]
    fn example_counts() {
        let stones = parse_stones(include_str!("../example.txt")).unwrap();
        let mut counter = StoneCounter::new();
        assert_eq!(counter.count_all(&stones, 6), 22);
        assert_eq!(counter.count_all(&stones, 25), 55312);
    }

    #[test]
    fn first_example_line() {
        let stones = parse_stones("0 1 10 99 999").unwrap();
        assert_eq!(StoneCounter::new().count_all(&stones, 1), 7);
    }
}
