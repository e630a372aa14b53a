use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidPlant(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidPlant(c) => write!(f, "Invalid character({}) for plant.", c),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

const ORTHOGONAL_DIRS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    plant: char,
    area: usize,
    perimeter: usize,
    sides: usize,
}

impl Region {
    pub fn plant(&self) -> char {
        self.plant
    }

    pub fn price(&self) -> usize {
        self.area * self.perimeter
    }

    pub fn bulk_price(&self) -> usize {
        self.area * self.sides
    }
}

#[derive(Debug)]
pub struct Garden {
    plants: Vec<char>,
    row_n: usize,
    col_n: usize,
}

impl TryFrom<&str> for Garden {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut plants = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow(expect_col_n, this_col_n));
            }

            for c in line.chars() {
                if !c.is_ascii_alphabetic() {
                    return Err(Error::InvalidPlant(c));
                }
                plants.push(c);
            }
            row_n += 1;
        }

        Ok(Self {
            plants,
            row_n,
            col_n: col_n.unwrap_or(0),
        })
    }
}

impl Garden {
    pub fn regions(&self) -> Vec<Region> {
        let mut region_ids: Vec<Option<usize>> = vec![None; self.plants.len()];
        let mut regions = Vec::new();
        for start in 0..self.plants.len() {
            if region_ids[start].is_some() {
                continue;
            }

            let plant = self.plants[start];
            let id = regions.len();
            let mut region = Region {
                plant,
                area: 0,
                perimeter: 0,
                sides: 0,
            };
            region_ids[start] = Some(id);
            let mut frontier = vec![start];
            while let Some(ind) = frontier.pop() {
                let (r, c) = ((ind / self.col_n) as isize, (ind % self.col_n) as isize);
                region.area += 1;
                region.sides += self.corner_n(r, c);
                for (dr, dc) in ORTHOGONAL_DIRS {
                    match self.index(r + dr, c + dc) {
                        Some(n) if self.plants[n] == plant => {
                            if region_ids[n].is_none() {
                                region_ids[n] = Some(id);
                                frontier.push(n);
                            }
                        }
                        _ => region.perimeter += 1,
                    }
                }
            }

            log::debug!(
                "Region {} of {}: area {}, perimeter {}, sides {}.",
                id,
                plant,
                region.area,
                region.perimeter,
                region.sides
            );
            regions.push(region);
        }

        regions
    }

    /// Corners of the region at this plot, which equals the sides it contributes.
    fn corner_n(&self, r: isize, c: isize) -> usize {
        let plant = self.plant(r, c);
        let same = |dr: isize, dc: isize| self.plant(r + dr, c + dc) == plant;
        (0..ORTHOGONAL_DIRS.len())
            .filter(|ind| {
                let (dr0, dc0) = ORTHOGONAL_DIRS[*ind];
                let (dr1, dc1) = ORTHOGONAL_DIRS[(*ind + 1) % ORTHOGONAL_DIRS.len()];
                let (side0, side1) = (same(dr0, dc0), same(dr1, dc1));
                let outer = !side0 && !side1;
                let inner = side0 && side1 && !same(dr0 + dr1, dc0 + dc1);
                outer || inner
            })
            .count()
    }

    fn plant(&self, r: isize, c: isize) -> Option<char> {
        self.index(r, c).map(|ind| self.plants[ind])
    }

    fn index(&self, r: isize, c: isize) -> Option<usize> {
        if r < 0 || c < 0 || r as usize >= self.row_n || c as usize >= self.col_n {
            None
        } else {
            Some(r as usize * self.col_n + c as usize)
        }
    }
}

pub fn read_garden<P: AsRef<Path>>(path: P) -> Result<Garden> {
    let text = common::read_text(&path)?;
    Garden::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse garden map in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");
    const SMALL: &str = "AAAA\nBBCD\nBBCC\nEEEC\n";

    #[test]
    fn small_example() {
        let regions = Garden::try_from(SMALL).unwrap().regions();
        assert_eq!(regions.len(), 5);
        assert_eq!(regions.iter().map(Region::price).sum::<usize>(), 140);
        assert_eq!(regions.iter().map(Region::bulk_price).sum::<usize>(), 80);
    }

    #[test]
    fn enclosed_regions() {
        let garden = Garden::try_from("OOOOO\nOXOXO\nOOOOO\nOXOXO\nOOOOO\n").unwrap();
        let regions = garden.regions();
        assert_eq!(regions.iter().map(Region::price).sum::<usize>(), 772);
        assert_eq!(regions.iter().map(Region::bulk_price).sum::<usize>(), 436);
    }

    #[test]
    fn e_shaped_region() {
        let garden = Garden::try_from("EEEEE\nEXXXX\nEEEEE\nEXXXX\nEEEEE\n").unwrap();
        let regions = garden.regions();
        assert_eq!(regions.iter().map(Region::bulk_price).sum::<usize>(), 236);
    }

    #[test]
    fn example_prices() {
        let regions = Garden::try_from(EXAMPLE).unwrap().regions();
        assert_eq!(regions.iter().map(Region::price).sum::<usize>(), 1930);
        assert_eq!(regions.iter().map(Region::bulk_price).sum::<usize>(), 1206);
    }
}
