use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use rayon::prelude::*;

#[derive(Debug)]
pub enum Error {
    InvalidSecretText(String),
    SecretOutOfRange(u64),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSecretText(s) => write!(f, "Invalid text({}) for secret number.", s),
            Error::SecretOutOfRange(n) => write!(
                f,
                "Secret number {} is out of range, expect one below {}.",
                n, PRUNE_MODULO
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

pub const SECRET_GENERATION_N: usize = 2000;

const PRUNE_MODULO: u64 = 16_777_216;
const CHANGE_WINDOW: usize = 4;
// Price changes lie in -9..=9, so a window of four packs into base 19.
const CHANGE_BASE: usize = 19;
const SEQUENCE_N: usize = CHANGE_BASE.pow(CHANGE_WINDOW as u32);

/// Pseudorandom secret number sequence of one buyer, yielding each next secret.
#[derive(Debug, Clone, Copy)]
pub struct Secret {
    n: u64,
}

impl Iterator for Secret {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.evolve();
        Some(self.n)
    }
}

impl TryFrom<&str> for Secret {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let text = value.trim();
        let n = text
            .parse::<u64>()
            .map_err(|_| Error::InvalidSecretText(text.to_string()))?;
        if n >= PRUNE_MODULO {
            return Err(Error::SecretOutOfRange(n));
        }

        Ok(Self::new(n))
    }
}

impl Secret {
    pub fn new(n: u64) -> Self {
        Self { n }
    }

    pub fn evolve(&mut self) {
        self.mix_prune(self.n * 64);
        self.mix_prune(self.n / 32);
        self.mix_prune(self.n * 2048);
    }

    pub fn nth_secret(&self, n: usize) -> u64 {
        let mut secret = *self;
        for _ in 0..n {
            secret.evolve();
        }

        secret.n
    }

    /// The buyer's prices, the ones digit of the initial secret and each generated one.
    pub fn prices(&self, n: usize) -> Vec<u8> {
        std::iter::once(self.n)
            .chain(*self)
            .take(n + 1)
            .map(|secret| (secret % 10) as u8)
            .collect()
    }

    fn mix_prune(&mut self, value: u64) {
        self.n = (self.n ^ value) % PRUNE_MODULO;
    }
}

/// Price at the first occurrence of each four-change window, keyed by the packed window.
fn first_sale_prices(prices: &[u8]) -> Vec<u16> {
    let mut sales = vec![0u16; SEQUENCE_N];
    let mut seen = vec![false; SEQUENCE_N];
    for window in prices.windows(CHANGE_WINDOW + 1) {
        let key = window.windows(2).fold(0, |key, pair| {
            key * CHANGE_BASE + (usize::from(pair[1]) + 9 - usize::from(pair[0]))
        });
        if !seen[key] {
            seen[key] = true;
            sales[key] = u16::from(window[CHANGE_WINDOW]);
        }
    }

    sales
}

pub fn secret_sum(secrets: &[Secret], n: usize) -> u64 {
    secrets.iter().map(|s| s.nth_secret(n)).sum()
}

/// Most bananas one change sequence can buy across all buyers.
pub fn max_bananas(secrets: &[Secret], n: usize) -> u64 {
    let totals = secrets
        .par_iter()
        .map(|s| first_sale_prices(&s.prices(n)))
        .fold(
            || vec![0u64; SEQUENCE_N],
            |mut totals, sales| {
                for (total, sale) in totals.iter_mut().zip(sales) {
                    *total += u64::from(sale);
                }
                totals
            },
        )
        .reduce(
            || vec![0u64; SEQUENCE_N],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right) {
                    *l += r;
                }
                left
            },
        );

    let (best_key, best) = totals
        .iter()
        .enumerate()
        .max_by_key(|(_, total)| **total)
        .map_or((0, 0), |(key, total)| (key, *total));
    log::debug!(
        "Best change sequence {:?} sells for {} bananas.",
        unpack_changes(best_key),
        best
    );

    best
}

fn unpack_changes(mut key: usize) -> [i8; CHANGE_WINDOW] {
    let mut changes = [0i8; CHANGE_WINDOW];
    for change in changes.iter_mut().rev() {
        *change = (key % CHANGE_BASE) as i8 - 9;
        key /= CHANGE_BASE;
    }

    changes
}

pub fn parse_secrets(text: &str) -> Result<Vec<Secret>, Error> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(Secret::try_from)
        .collect()
}

pub fn read_secrets<P: AsRef<Path>>(path: P) -> Result<Vec<Secret>> {
    common::read_nonempty_lines(&path)?
        .iter()
        .enumerate()
        .map(|(ind, l)| {
            Secret::try_from(l.as_str()).with_context(|| {
                format!(
                    "Failed to read initial secret of buyer {} from given string({}).",
                    ind, l
                )
            })
        })
        .collect()
}
