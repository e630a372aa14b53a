use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    InvalidMachineText(String),
    InvalidNumberText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidMachineText(s) => write!(f, "Invalid text({}) for claw machine.", s),
            Error::InvalidNumberText(s) => write!(f, "Invalid text({}) for number.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub const A_PRESS_COST: i64 = 3;
pub const B_PRESS_COST: i64 = 1;
pub const PRESS_LIMIT: i64 = 100;
pub const PRIZE_OFFSET: i64 = 10_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClawMachine {
    a: (i64, i64),
    b: (i64, i64),
    prize: (i64, i64),
}

impl TryFrom<&str> for ClawMachine {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static MACHINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"Button A: X\+(\d+), Y\+(\d+)\s+Button B: X\+(\d+), Y\+(\d+)\s+Prize: X=(\d+), Y=(\d+)",
            )
            .unwrap()
        });

        let caps = MACHINE_PATTERN
            .captures(value)
            .ok_or_else(|| Error::InvalidMachineText(value.to_string()))?;
        let num = |ind: usize| {
            caps[ind]
                .parse::<i64>()
                .map_err(|_| Error::InvalidNumberText(caps[ind].to_string()))
        };

        Ok(Self {
            a: (num(1)?, num(2)?),
            b: (num(3)?, num(4)?),
            prize: (num(5)?, num(6)?),
        })
    }
}

impl ClawMachine {
    pub fn with_prize_offset(&self, offset: i64) -> Self {
        Self {
            prize: (self.prize.0 + offset, self.prize.1 + offset),
            ..self.clone()
        }
    }

    /// Solves the button presses exactly with Cramer's rule.
    pub fn presses(&self, limit: Option<i64>) -> Option<(i64, i64)> {
        let (ax, ay) = self.a;
        let (bx, by) = self.b;
        let (px, py) = self.prize;
        let det = ax * by - ay * bx;
        if det == 0 {
            log::warn!("Buttons of machine {:?} are parallel, skip it.", self);
            return None;
        }

        let a_num = px * by - py * bx;
        let b_num = ax * py - ay * px;
        if a_num % det != 0 || b_num % det != 0 {
            return None;
        }

        let (a_n, b_n) = (a_num / det, b_num / det);
        if a_n < 0 || b_n < 0 || limit.is_some_and(|limit| a_n > limit || b_n > limit) {
            return None;
        }

        Some((a_n, b_n))
    }

    pub fn min_tokens(&self, limit: Option<i64>) -> Option<i64> {
        self.presses(limit)
            .map(|(a_n, b_n)| a_n * A_PRESS_COST + b_n * B_PRESS_COST)
    }
}

pub fn parse_machines(text: &str) -> Result<Vec<ClawMachine>, Error> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(ClawMachine::try_from)
        .collect()
}

pub fn read_machines<P: AsRef<Path>>(path: P) -> Result<Vec<ClawMachine>> {
    let text = common::read_text(&path)?.replace("\r\n", "\n");
    parse_machines(&text).with_context(|| {
        format!(
            "Failed to parse claw machines in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_limited_presses() {
        let machines = parse_machines(EXAMPLE).unwrap();
        assert_eq!(machines.len(), 4);
        let presses = machines
            .iter()
            .map(|m| m.presses(Some(PRESS_LIMIT)))
            .collect::<Vec<_>>();
        assert_eq!(presses, [Some((80, 40)), None, Some((38, 86)), None]);
        let tokens = machines
            .iter()
            .filter_map(|m| m.min_tokens(Some(PRESS_LIMIT)))
            .sum::<i64>();
        assert_eq!(tokens, 480);
    }

    #[test]
    fn example_with_offset() {
        let machines = parse_machines(EXAMPLE).unwrap();
        let winnable = machines
            .iter()
            .map(|m| m.with_prize_offset(PRIZE_OFFSET).presses(None).is_some())
            .collect::<Vec<_>>();
        assert_eq!(winnable, [false, true, false, true]);
    }

    #[test]
    fn malformed_machine_is_rejected() {
        assert!(matches!(
            ClawMachine::try_from("Button A: X+1, Y+2\nPrize: X=3, Y=4"),
            Err(Error::InvalidMachineText(_))
        ));
    }
}
