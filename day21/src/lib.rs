use std::{collections::HashMap, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidKey(char),
    InvalidCode(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidKey(key) => write!(f, "Invalid key({}).", key),
            Error::InvalidCode(s) => write!(f, "Invalid text({}) for door code.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub const SHORT_CHAIN_ROBOT_N: usize = 2;
pub const LONG_CHAIN_ROBOT_N: usize = 25;

const ACTIVATE_KEY: char = 'A';

#[derive(Debug)]
pub struct Keypad {
    rows: &'static [&'static str],
}

impl Keypad {
    pub fn numeric() -> Self {
        Self {
            rows: &["789", "456", "123", " 0A"],
        }
    }

    pub fn directional() -> Self {
        Self {
            rows: &[" ^A", "<v>"],
        }
    }

    fn key_pos(&self, key: char) -> Result<(usize, usize), Error> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.chars().position(|k| k == key).map(|c| (r, c)))
            .filter(|_| key != ' ')
            .ok_or(Error::InvalidKey(key))
    }

    fn is_gap(&self, (r, c): (usize, usize)) -> bool {
        self.rows[r].chars().nth(c) == Some(' ')
    }

    /// Shortest key sequences moving from one key to another then pressing it.
    ///
    /// Only straight runs are kept, all horizontal moves then all vertical ones
    /// or the other way around, and the one crossing the gap is dropped.
    fn moves(&self, from: char, to: char) -> Result<Vec<String>, Error> {
        let (from_r, from_c) = self.key_pos(from)?;
        let (to_r, to_c) = self.key_pos(to)?;
        let horizontal = if to_c > from_c { ">" } else { "<" }.repeat(from_c.abs_diff(to_c));
        let vertical = if to_r > from_r { "v" } else { "^" }.repeat(from_r.abs_diff(to_r));

        let mut moves = Vec::with_capacity(2);
        if !self.is_gap((from_r, to_c)) {
            moves.push(format!("{}{}{}", horizontal, vertical, ACTIVATE_KEY));
        }
        if !self.is_gap((to_r, from_c)) {
            let other = format!("{}{}{}", vertical, horizontal, ACTIVATE_KEY);
            if !moves.contains(&other) {
                moves.push(other);
            }
        }

        Ok(moves)
    }
}

/// A numeric keypad driven through a chain of robots on directional keypads.
#[derive(Debug)]
pub struct KeypadChain {
    numeric: Keypad,
    directional: Keypad,
    robot_n: usize,
    costs: HashMap<(char, char, usize), u64>,
}

impl KeypadChain {
    pub fn new(robot_n: usize) -> Self {
        Self {
            numeric: Keypad::numeric(),
            directional: Keypad::directional(),
            robot_n,
            costs: HashMap::new(),
        }
    }

    /// Fewest button presses needed on the outermost keypad to type the code.
    pub fn min_presses_n(&mut self, code: &str) -> Result<u64, Error> {
        let mut presses_n = 0;
        let mut last_key = ACTIVATE_KEY;
        for key in code.chars() {
            let mut min_n = u64::MAX;
            for moves in self.numeric.moves(last_key, key)? {
                min_n = min_n.min(self.sequence_cost(&moves, self.robot_n)?);
            }
            presses_n += min_n;
            last_key = key;
        }
        log::debug!("Code {} needs {} press(es).", code, presses_n);

        Ok(presses_n)
    }

    pub fn complexity(&mut self, code: &str) -> Result<u64, Error> {
        let numeric_part = code
            .trim_end_matches(ACTIVATE_KEY)
            .parse::<u64>()
            .map_err(|_| Error::InvalidCode(code.to_string()))?;

        Ok(self.min_presses_n(code)? * numeric_part)
    }

    fn sequence_cost(&mut self, keys: &str, depth: usize) -> Result<u64, Error> {
        if depth == 0 {
            return Ok(keys.len() as u64);
        }

        let mut cost = 0;
        let mut last_key = ACTIVATE_KEY;
        for key in keys.chars() {
            cost += self.move_cost(last_key, key, depth)?;
            last_key = key;
        }

        Ok(cost)
    }

    fn move_cost(&mut self, from: char, to: char, depth: usize) -> Result<u64, Error> {
        if let Some(cost) = self.costs.get(&(from, to, depth)) {
            return Ok(*cost);
        }

        let mut min_cost = u64::MAX;
        for moves in self.directional.moves(from, to)? {
            min_cost = min_cost.min(self.sequence_cost(&moves, depth - 1)?);
        }
        self.costs.insert((from, to, depth), min_cost);

        Ok(min_cost)
    }
}

pub fn parse_codes(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_codes<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = common::read_text(&path).with_context(|| {
        format!(
            "Failed to read door codes in given file({}).",
            path.as_ref().display()
        )
    })?;

    Ok(parse_codes(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> Vec<String> {
        parse_codes(include_str!("../example.txt"))
    }

    #[test]
    fn example_press_counts() {
        let mut chain = KeypadChain::new(SHORT_CHAIN_ROBOT_N);
        let presses = codes()
            .iter()
            .map(|c| chain.min_presses_n(c).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(presses, [68, 60, 68, 64, 64]);
    }

    #[test]
    fn example_complexities() {
        let mut chain = KeypadChain::new(SHORT_CHAIN_ROBOT_N);
        let total = codes()
            .iter()
            .map(|c| chain.complexity(c).unwrap())
            .sum::<u64>();
        assert_eq!(total, 126384);
    }

    #[test]
    fn long_chain() {
        let mut chain = KeypadChain::new(LONG_CHAIN_ROBOT_N);
        let total = codes()
            .iter()
            .map(|c| chain.complexity(c).unwrap())
            .sum::<u64>();
        assert_eq!(total, 154115708116294);
    }

    #[test]
    fn moves_avoid_the_gap() {
        let numeric = Keypad::numeric();
        assert_eq!(numeric.moves('A', '1').unwrap(), ["^<<A"]);
        assert_eq!(numeric.moves('7', '0').unwrap(), [">vvvA"]);
        assert_eq!(numeric.moves('5', '5').unwrap(), ["A"]);
    }

    #[test]
    fn unknown_key() {
        let mut chain = KeypadChain::new(SHORT_CHAIN_ROBOT_N);
        assert!(matches!(chain.min_presses_n("12BA"), Err(Error::InvalidKey('B'))));
    }
}
