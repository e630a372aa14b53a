use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use rayon::prelude::*;

#[derive(Debug)]
pub enum Error {
    NoColonInEquation(String),
    InvalidNumberText(String),
    NoOperands(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoColonInEquation(s) => write!(
                f,
                "Expect a colon to separate test value and numbers in equation({}).",
                s
            ),
            Error::InvalidNumberText(s) => write!(f, "Invalid text({}) for number.", s),
            Error::NoOperands(s) => write!(f, "No numbers given in equation({}).", s),
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
pub enum Operator {
    Add,
    Multiply,
    Concat,
}

impl Operator {
    pub fn apply(&self, l: u64, r: u64) -> u64 {
        match self {
            Operator::Add => l + r,
            Operator::Multiply => l * r,
            Operator::Concat => l * digit_base(r) + r,
        }
    }

    /// Finds `l` such that `self.apply(l, r) == result`, if any.
    fn undo(&self, result: u64, r: u64) -> Option<u64> {
        match self {
            Operator::Add => result.checked_sub(r),
            Operator::Multiply => {
                if r == 0 {
                    None
                } else if result % r == 0 {
                    Some(result / r)
                } else {
                    None
                }
            }
            Operator::Concat => {
                let base = digit_base(r);
                if result % base == r {
                    Some(result / base)
                } else {
                    None
                }
            }
        }
    }
}

fn digit_base(n: u64) -> u64 {
    let mut base = 10;
    while base <= n {
        base *= 10;
    }

    base
}

#[derive(Debug, Clone)]
pub struct Equation {
    test_value: u64,
    numbers: Vec<u64>,
}

impl TryFrom<&str> for Equation {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (test_text, numbers_text) = value
            .split_once(':')
            .ok_or_else(|| Error::NoColonInEquation(value.to_string()))?;
        let parse_num = |s: &str| {
            s.trim()
                .parse::<u64>()
                .map_err(|_| Error::InvalidNumberText(s.to_string()))
        };
        let test_value = parse_num(test_text)?;
        let numbers = numbers_text
            .split_ascii_whitespace()
            .map(parse_num)
            .collect::<Result<Vec<_>, _>>()?;
        if numbers.is_empty() {
            return Err(Error::NoOperands(value.to_string()));
        }

        Ok(Self {
            test_value,
            numbers,
        })
    }
}

impl Equation {
    pub fn test_value(&self) -> u64 {
        self.test_value
    }

    /// Operators are evaluated left to right, so the search peels numbers off the right end.
    pub fn can_be_true(&self, ops: &[Operator]) -> bool {
        Self::can_reach(self.test_value, &self.numbers, ops)
    }

    fn can_reach(target: u64, numbers: &[u64], ops: &[Operator]) -> bool {
        match numbers {
            [] => false,
            [first] => *first == target,
            [rest @ .., last] => {
                if *last == 0 && target == 0 && ops.contains(&Operator::Multiply) {
                    return true;
                }

                ops.iter().any(|op| {
                    op.undo(target, *last)
                        .is_some_and(|prev| Self::can_reach(prev, rest, ops))
                })
            }
        }
    }
}

pub fn calibration_result(equations: &[Equation], ops: &[Operator]) -> u64 {
    equations
        .par_iter()
        .filter(|eq| {
            let ok = eq.can_be_true(ops);
            log::debug!(
                "{} {}: {:?}",
                if ok { "✓" } else { "✗" },
                eq.test_value,
                eq.numbers
            );
            ok
        })
        .map(Equation::test_value)
        .sum()
}

pub fn parse_equations(text: &str) -> Result<Vec<Equation>, Error> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(Equation::try_from)
        .collect()
}

pub fn read_equations<P: AsRef<Path>>(path: P) -> Result<Vec<Equation>> {
    common::read_nonempty_lines(&path)?
        .iter()
        .map(|l| {
            Equation::try_from(l.as_str())
                .with_context(|| format!("Failed to read equation from given string({}).", l))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_with_add_and_multiply() {
        let equations = parse_equations(EXAMPLE).unwrap();
        let result = calibration_result(&equations, &[Operator::Add, Operator::Multiply]);
        assert_eq!(result, 3749);
    }

    #[test]
    fn example_with_concat() {
        let equations = parse_equations(EXAMPLE).unwrap();
        let result = calibration_result(
            &equations,
            &[Operator::Add, Operator::Multiply, Operator::Concat],
        );
        assert_eq!(result, 11387);
    }

    #[test]
    fn concat_operator() {
        assert_eq!(Operator::Concat.apply(12, 345), 12345);
        assert_eq!(Operator::Concat.apply(48, 6), 486);
        assert_eq!(Operator::Concat.apply(1, 0), 10);
        assert_eq!(Operator::Concat.undo(178, 8), Some(17));
        assert_eq!(Operator::Concat.undo(178, 78), Some(1));
        assert_eq!(Operator::Concat.undo(178, 9), None);
    }

    #[test]
    fn missing_colon_is_rejected() {
        assert!(matches!(
            Equation::try_from("190 10 19"),
            Err(Error::NoColonInEquation(_))
        ));
    }
}
