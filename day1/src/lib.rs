use std::{collections::HashMap, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidLocationId(String),
    WrongColumnCount(usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidLocationId(s) => write!(f, "Invalid text({}) for location ID.", s),
            Error::WrongColumnCount(line_ind, n) => write!(
                f,
                "Expect 2 location IDs in line {}, given {}.",
                line_ind + 1,
                n
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

pub fn parse_lists(text: &str) -> Result<(Vec<usize>, Vec<usize>), Error> {
    let mut list0 = Vec::new();
    let mut list1 = Vec::new();
    for (ind, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
        let ids = line
            .split_ascii_whitespace()
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|_| Error::InvalidLocationId(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let [id0, id1] = ids[..] else {
            return Err(Error::WrongColumnCount(ind, ids.len()));
        };
        list0.push(id0);
        list1.push(id1);
    }

    Ok((list0, list1))
}

pub fn read_lists<P: AsRef<Path>>(path: P) -> Result<(Vec<usize>, Vec<usize>)> {
    let text = common::read_text(&path)?;
    parse_lists(&text).with_context(|| {
        format!(
            "Failed to parse location ID lists in given file({}).",
            path.as_ref().display()
        )
    })
}

pub fn total_distance(list0: &[usize], list1: &[usize]) -> usize {
    let mut sorted0 = list0.to_vec();
    let mut sorted1 = list1.to_vec();
    sorted0.sort_unstable();
    sorted1.sort_unstable();

    sorted0
        .iter()
        .zip(sorted1.iter())
        .map(|(id0, id1)| id0.abs_diff(*id1))
        .sum()
}

pub fn similarity_score(list0: &[usize], list1: &[usize]) -> usize {
    let mut counts = HashMap::new();
    for id in list1 {
        *counts.entry(*id).or_insert(0usize) += 1;
    }
    log::debug!("{} distinct IDs in the right list.", counts.len());

    list0
        .iter()
        .map(|id| id * counts.get(id).copied().unwrap_or(0))
        .sum()
}
