use std::{cmp::Ordering, collections::HashSet, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidRuleText(String),
    InvalidPageText(String),
    EmptyUpdate,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRuleText(s) => write!(
                f,
                "Invalid text({}) for ordering rule, expect two pages separated by '|'.",
                s
            ),
            Error::InvalidPageText(s) => write!(f, "Invalid text({}) for page number.", s),
            Error::EmptyUpdate => write!(f, "Update should contain at least one page."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Default)]
pub struct OrderRules {
    before_after_pairs: HashSet<(usize, usize)>,
}

impl OrderRules {
    pub fn add(&mut self, before: usize, after: usize) {
        self.before_after_pairs.insert((before, after));
    }

    pub fn len(&self) -> usize {
        self.before_after_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before_after_pairs.is_empty()
    }

    pub fn must_precede(&self, page: usize, other: usize) -> bool {
        self.before_after_pairs.contains(&(page, other))
    }

    /// `Equal` when no rule relates the two pages.
    pub fn compare(&self, page: usize, other: usize) -> Ordering {
        if self.must_precede(page, other) {
            Ordering::Less
        } else if self.must_precede(other, page) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pages: Vec<usize>,
}

impl TryFrom<&str> for Update {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let pages = value
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidPageText(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if pages.is_empty() {
            return Err(Error::EmptyUpdate);
        }

        Ok(Self { pages })
    }
}

impl Update {
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    pub fn middle_page(&self) -> usize {
        self.pages[self.pages.len() / 2]
    }

    pub fn is_ordered(&self, rules: &OrderRules) -> bool {
        self.pages.iter().enumerate().all(|(ind, page)| {
            self.pages[(ind + 1)..]
                .iter()
                .all(|later| !rules.must_precede(*later, *page))
        })
    }

    /// Reorders pages with the rules' comparison, each page placed before the
    /// first placed one it must precede. Cyclic rules still give some order.
    pub fn fixed(&self, rules: &OrderRules) -> Update {
        let mut pages = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let ind = pages
                .iter()
                .position(|placed| rules.compare(*page, *placed) == Ordering::Less)
                .unwrap_or(pages.len());
            pages.insert(ind, *page);
        }

        Update { pages }
    }
}

pub fn parse_manual(text: &str) -> Result<(OrderRules, Vec<Update>), Error> {
    let mut rules = OrderRules::default();
    let mut updates = Vec::new();
    let mut lines = text.lines().map(str::trim);
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        let (before, after) = line
            .split_once('|')
            .ok_or_else(|| Error::InvalidRuleText(line.to_string()))?;
        let parse_page = |s: &str| {
            s.parse::<usize>()
                .map_err(|_| Error::InvalidRuleText(line.to_string()))
        };
        rules.add(parse_page(before)?, parse_page(after)?);
    }

    for line in lines.filter(|l| !l.is_empty()) {
        updates.push(Update::try_from(line)?);
    }

    Ok((rules, updates))
}

pub fn read_manual<P: AsRef<Path>>(path: P) -> Result<(OrderRules, Vec<Update>)> {
    let text = common::read_text(&path)?;
    parse_manual(&text).with_context(|| {
        format!(
            "Failed to parse ordering rules and updates in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_ordered_updates() {
        let (rules, updates) = parse_manual(EXAMPLE).unwrap();
        assert_eq!(rules.len(), 21);
        let ordered = updates
            .iter()
            .map(|u| u.is_ordered(&rules))
            .collect::<Vec<_>>();
        assert_eq!(ordered, [true, true, true, false, false, false]);
        let sum = updates
            .iter()
            .filter(|u| u.is_ordered(&rules))
            .map(Update::middle_page)
            .sum::<usize>();
        assert_eq!(sum, 143);
    }

    #[test]
    fn example_fixed_updates() {
        let (rules, updates) = parse_manual(EXAMPLE).unwrap();
        let fixed = updates
            .iter()
            .filter(|u| !u.is_ordered(&rules))
            .map(|u| u.fixed(&rules))
            .collect::<Vec<_>>();
        assert_eq!(fixed[0].pages(), [97, 75, 47, 61, 53]);
        assert_eq!(fixed[1].pages(), [61, 29, 13]);
        assert_eq!(fixed[2].pages(), [97, 75, 47, 29, 13]);
        assert_eq!(fixed.iter().map(Update::middle_page).sum::<usize>(), 123);
    }

    #[test]
    fn unrelated_pages_keep_their_order() {
        let (rules, updates) = parse_manual("1|2\n\n3,2,1\n").unwrap();
        let fixed = updates[0].fixed(&rules);
        assert_eq!(fixed.pages(), [3, 1, 2]);
        assert!(fixed.is_ordered(&rules));
    }

    #[test]
    fn cyclic_rules_still_fix() {
        let (rules, updates) = parse_manual("1|2\n2|3\n3|1\n\n1,2,3\n").unwrap();
        let mut pages = updates[0].fixed(&rules).pages().to_vec();
        pages.sort_unstable();
        assert_eq!(pages, [1, 2, 3]);
    }

    #[test]
    fn bad_rule_is_rejected() {
        assert!(matches!(
            parse_manual("47-53\n\n1,2,3\n"),
            Err(Error::InvalidRuleText(_))
        ));
    }
}
