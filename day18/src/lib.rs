use std::{
    collections::VecDeque,
    error,
    fmt::Display,
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    NoCommaInPositionText(String),
    InvalidCoordinateText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoCommaInPositionText(s) => write!(
                f,
                "Expect a comma to separate coordinates of position in text({}).",
                s
            ),
            Error::InvalidCoordinateText(s) => {
                write!(f, "Invalid text({}) for coordinate of position.", s)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Side length of the memory space, defaults to 71 (7 with --test).
    #[arg(long)]
    pub size: Option<usize>,
    /// Bytes fallen before walking, defaults to 1024 (12 with --test).
    #[arg(long)]
    pub bytes: Option<usize>,
}

impl CLIArgs {
    pub fn size(&self) -> usize {
        self.size
            .unwrap_or(if self.input.test { 7 } else { 71 })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
            .unwrap_or(if self.input.test { 12 } else { 1024 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl TryFrom<&str> for Position {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (x_text, y_text) = value
            .trim()
            .split_once(',')
            .ok_or_else(|| Error::NoCommaInPositionText(value.to_string()))?;
        let coord = |s: &str| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidCoordinateText(s.to_string()))
        };

        Ok(Self::new(coord(x_text)?, coord(y_text)?))
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Square memory space, each cell remembering when a byte falls on it.
#[derive(Debug)]
pub struct MemorySpace {
    size: usize,
    fall_times: Vec<Option<usize>>,
}

impl MemorySpace {
    pub fn new(size: usize, bytes: &[Position]) -> Self {
        let mut fall_times = vec![None; size * size];
        for (time, pos) in bytes.iter().enumerate() {
            if pos.x >= size || pos.y >= size {
                log::warn!("Byte {} falls outside of memory space, ignore it.", pos);
                continue;
            }

            fall_times[pos.y * size + pos.x].get_or_insert(time);
        }

        Self { size, fall_times }
    }

    /// Minimum steps from the top left to the bottom right corner after `fallen_n` bytes.
    pub fn min_steps_n(&self, fallen_n: usize) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        let is_free = |ind: usize| self.fall_times[ind].map_or(true, |time| time >= fallen_n);
        let end_ind = self.size * self.size - 1;
        if !is_free(0) || !is_free(end_ind) {
            return None;
        }

        let mut steps = vec![None; self.fall_times.len()];
        steps[0] = Some(0);
        let mut frontier = VecDeque::from([0]);
        while let Some(ind) = frontier.pop_front() {
            let steps_n = steps[ind].unwrap_or(0);
            if ind == end_ind {
                return Some(steps_n);
            }

            for next_ind in self.neighbors(ind) {
                if steps[next_ind].is_none() && is_free(next_ind) {
                    steps[next_ind] = Some(steps_n + 1);
                    frontier.push_back(next_ind);
                }
            }
        }

        None
    }

    /// Count of fallen bytes at which the exit first becomes unreachable.
    pub fn blocking_byte_n(&self, total_n: usize) -> Option<usize> {
        if self.min_steps_n(total_n).is_some() || self.min_steps_n(0).is_none() {
            return None;
        }

        // Reachable with `low` bytes fallen, unreachable with `high`.
        let (mut low, mut high) = (0, total_n);
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.min_steps_n(mid).is_some() {
                low = mid;
            } else {
                high = mid;
            }
        }
        log::debug!("Path exists with {} byte(s), but not with {}.", low, high);

        Some(high)
    }

    fn neighbors(&self, ind: usize) -> impl Iterator<Item = usize> {
        let size = self.size;
        let (x, y) = (ind % size, ind / size);
        [
            (y > 0).then(|| ind - size),
            (x + 1 < size).then(|| ind + 1),
            (y + 1 < size).then(|| ind + size),
            (x > 0).then(|| ind - 1),
        ]
        .into_iter()
        .flatten()
    }
}

pub fn parse_positions(text: &str) -> Result<Vec<Position>, Error> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(Position::try_from)
        .collect()
}

pub fn read_positions<P: AsRef<Path>>(path: P) -> Result<Vec<Position>> {
    common::read_nonempty_lines(&path)?
        .iter()
        .enumerate()
        .map(|(ind, l)| {
            Position::try_from(l.as_str())
                .with_context(|| format!("Failed to read byte {} from given string({}).", ind, l))
        })
        .collect()
}
