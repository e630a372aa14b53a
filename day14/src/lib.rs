use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    InvalidRobotText(String),
    InvalidMapSize(i64, i64),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRobotText(s) => write!(f, "Invalid text({}) for robot.", s),
            Error::InvalidMapSize(w, h) => {
                write!(f, "Invalid map size({}x{}), expect both positive.", w, h)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Map width, defaults to 101 (11 with --test).
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub width: Option<i64>,
    /// Map height, defaults to 103 (7 with --test).
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub height: Option<i64>,
    /// Print the robots' arrangement at the found time.
    #[arg(long)]
    pub render: bool,
}

impl CLIArgs {
    pub fn map(&self) -> Result<Map, Error> {
        let (default_width, default_height) = if self.input.test {
            (11, 7)
        } else {
            (101, 103)
        };

        Map::new(
            self.width.unwrap_or(default_width),
            self.height.unwrap_or(default_height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    pos: (i64, i64),
    vel: (i64, i64),
}

impl TryFrom<&str> for Robot {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static ROBOT_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"p=(-?\d+),(-?\d+)\s+v=(-?\d+),(-?\d+)").unwrap()
        });

        let caps = ROBOT_PATTERN
            .captures(value)
            .ok_or_else(|| Error::InvalidRobotText(value.to_string()))?;
        let num = |ind: usize| {
            caps[ind]
                .parse::<i64>()
                .map_err(|_| Error::InvalidRobotText(value.to_string()))
        };

        Ok(Self {
            pos: (num(1)?, num(2)?),
            vel: (num(3)?, num(4)?),
        })
    }
}

impl Robot {
    pub fn new(pos: (i64, i64), vel: (i64, i64)) -> Self {
        Self { pos, vel }
    }

    pub fn pos_after(&self, seconds: i64, map: &Map) -> (i64, i64) {
        (
            (self.pos.0 + self.vel.0 * seconds).rem_euclid(map.width),
            (self.pos.1 + self.vel.1 * seconds).rem_euclid(map.height),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Map {
    width: i64,
    height: i64,
}

impl Map {
    pub fn new(width: i64, height: i64) -> Result<Self, Error> {
        if width < 1 || height < 1 {
            return Err(Error::InvalidMapSize(width, height));
        }

        Ok(Self { width, height })
    }

    /// Robots on the middle row or column belong to no quadrant.
    pub fn quad_ind(&self, (x, y): (i64, i64)) -> Option<usize> {
        let (mid_x, mid_y) = (self.width / 2, self.height / 2);
        if x == mid_x || y == mid_y {
            return None;
        }

        Some(usize::from(x > mid_x) + 2 * usize::from(y > mid_y))
    }

    pub fn safety_factor(&self, robots: &[Robot], seconds: i64) -> usize {
        let mut counts_in_quads = [0usize; 4];
        for robot in robots {
            if let Some(quad_ind) = self.quad_ind(robot.pos_after(seconds, self)) {
                counts_in_quads[quad_ind] += 1;
            }
        }
        log::debug!("Robot counts in quadrants: {:?}.", counts_in_quads);

        counts_in_quads.iter().product()
    }

    /// Positional variance of all robots, low when they cluster into a picture.
    pub fn clustering_score(&self, robots: &[Robot], seconds: i64) -> f64 {
        if robots.len() < 2 {
            return 0.0;
        }

        let positions = robots
            .iter()
            .map(|r| r.pos_after(seconds, self))
            .collect::<Vec<_>>();
        let n = positions.len() as f64;
        let mean_x = positions.iter().map(|p| p.0 as f64).sum::<f64>() / n;
        let mean_y = positions.iter().map(|p| p.1 as f64).sum::<f64>() / n;
        positions
            .iter()
            .map(|p| (p.0 as f64 - mean_x).powi(2) + (p.1 as f64 - mean_y).powi(2))
            .sum::<f64>()
            / n
    }

    /// First time within one full period whose clustering score is the lowest.
    pub fn most_clustered_time(&self, robots: &[Robot]) -> i64 {
        let mut best = (0, f64::INFINITY);
        for seconds in 0..(self.width * self.height) {
            let score = self.clustering_score(robots, seconds);
            if score < best.1 {
                log::debug!("Time {}: clustering score {:.2}.", seconds, score);
                best = (seconds, score);
            }
        }

        best.0
    }

    pub fn render(&self, robots: &[Robot], seconds: i64) -> String {
        let mut counts = vec![0u32; (self.width * self.height) as usize];
        for robot in robots {
            let (x, y) = robot.pos_after(seconds, self);
            counts[(y * self.width + x) as usize] += 1;
        }

        let mut text = String::new();
        for row in counts.chunks(self.width as usize) {
            text.extend(row.iter().map(|n| match n {
                0 => '.',
                1..=9 => char::from_digit(*n, 10).unwrap_or('*'),
                _ => '*',
            }));
            text.push('\n');
        }

        text
    }
}

pub fn parse_robots(text: &str) -> Result<Vec<Robot>, Error> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(Robot::try_from)
        .collect()
}

pub fn read_robots<P: AsRef<Path>>(path: P) -> Result<Vec<Robot>> {
    let text = common::read_text(&path)?;
    parse_robots(&text).with_context(|| {
        format!(
            "Failed to parse robots in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_safety_factor() {
        let robots = parse_robots(EXAMPLE).unwrap();
        assert_eq!(Map::new(11, 7).unwrap().safety_factor(&robots, 100), 12);
    }

    #[test]
    fn robot_wraps_around() {
        let robot = Robot::try_from("p=2,4 v=2,-3").unwrap();
        let map = Map::new(11, 7).unwrap();
        assert_eq!(robot.pos_after(1, &map), (4, 1));
        assert_eq!(robot.pos_after(2, &map), (6, 5));
        assert_eq!(robot.pos_after(5, &map), (1, 3));
    }

    #[test]
    fn converging_robots_are_found() {
        let robots = [Robot::new((0, 0), (1, 1)), Robot::new((6, 0), (-1, 1))];
        let map = Map::new(11, 7).unwrap();
        assert_eq!(map.most_clustered_time(&robots), 3);
        assert_eq!(map.render(&robots, 3).lines().nth(3), Some("...2......."));
    }

    #[test]
    fn empty_map_is_rejected() {
        assert!(matches!(Map::new(0, 7), Err(Error::InvalidMapSize(0, 7))));
        assert!(matches!(Map::new(11, -1), Err(Error::InvalidMapSize(11, -1))));
        assert!(CLIArgs::try_parse_from(["day14", "--width", "0"]).is_err());
        assert!(CLIArgs::try_parse_from(["day14", "--height=-3"]).is_err());

        let args = CLIArgs::try_parse_from(["day14", "--test", "--width", "5"]).unwrap();
        assert!(args.map().is_ok());
    }
}
