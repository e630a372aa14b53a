use std::{
    collections::{HashMap, HashSet},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use itertools::Itertools;

#[derive(Debug)]
pub enum Error {
    InvalidConnectionText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConnectionText(s) => write!(f, "Invalid text({}) for connection.", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Undirected graph of computers, each one referred to by its index in `names`.
#[derive(Debug, Default)]
pub struct Network {
    names: Vec<String>,
    ids: HashMap<String, usize>,
    links: Vec<HashSet<usize>>,
}

impl Network {
    /// Links two computers. A computer linked to itself is only registered.
    pub fn connect(&mut self, a: &str, b: &str) {
        let a_id = self.id_or_insert(a);
        let b_id = self.id_or_insert(b);
        if a_id == b_id {
            return;
        }

        self.links[a_id].insert(b_id);
        self.links[b_id].insert(a_id);
    }

    pub fn computer_n(&self) -> usize {
        self.names.len()
    }

    /// Sets of three computers all connected to each other, names sorted in each set.
    pub fn triangles(&self) -> Vec<[&str; 3]> {
        let mut triangles = Vec::new();
        for (id, links) in self.links.iter().enumerate() {
            let later_links = links.iter().copied().filter(|other| *other > id).sorted();
            for (b, c) in later_links.tuple_combinations() {
                if self.links[b].contains(&c) {
                    let mut names = [
                        self.names[id].as_str(),
                        self.names[b].as_str(),
                        self.names[c].as_str(),
                    ];
                    names.sort_unstable();
                    triangles.push(names);
                }
            }
        }

        triangles
    }

    /// Largest set of computers all connected to each other, found by Bron–Kerbosch with pivoting.
    pub fn max_clique(&self) -> Vec<&str> {
        let mut best = Vec::new();
        let mut clique = Vec::new();
        self.expand_clique(
            &mut clique,
            (0..self.names.len()).collect(),
            HashSet::new(),
            &mut best,
        );

        best.iter()
            .map(|id| self.names[*id].as_str())
            .sorted()
            .collect()
    }

    fn expand_clique(
        &self,
        clique: &mut Vec<usize>,
        mut candidates: HashSet<usize>,
        mut excluded: HashSet<usize>,
        best: &mut Vec<usize>,
    ) {
        if candidates.is_empty() {
            if excluded.is_empty() && clique.len() > best.len() {
                log::debug!("Found clique of {} computer(s).", clique.len());
                *best = clique.clone();
            }
            return;
        }

        let Some(pivot) = candidates
            .union(&excluded)
            .copied()
            .max_by_key(|id| self.links[*id].len())
        else {
            return;
        };
        let branches = candidates
            .difference(&self.links[pivot])
            .copied()
            .collect::<Vec<_>>();
        for id in branches {
            let links = &self.links[id];
            clique.push(id);
            self.expand_clique(
                clique,
                candidates.intersection(links).copied().collect(),
                excluded.intersection(links).copied().collect(),
                best,
            );
            clique.pop();
            candidates.remove(&id);
            excluded.insert(id);
        }
    }

    fn id_or_insert(&mut self, name: &str) -> usize {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.links.push(HashSet::new());
        id
    }
}

fn parse_connection(line: &str) -> Result<(&str, &str), Error> {
    line.trim()
        .split_once('-')
        .filter(|(a, b)| !a.is_empty() && !b.is_empty())
        .ok_or_else(|| Error::InvalidConnectionText(line.to_string()))
}

pub fn parse_network(text: &str) -> Result<Network, Error> {
    let mut network = Network::default();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let (a, b) = parse_connection(line)?;
        network.connect(a, b);
    }

    Ok(network)
}

pub fn read_network<P: AsRef<Path>>(path: P) -> Result<Network> {
    let mut network = Network::default();
    for line in common::read_nonempty_lines(&path)? {
        let (a, b) = parse_connection(&line).with_context(|| {
            format!(
                "Failed to read connection in given file({}).",
                path.as_ref().display()
            )
        })?;
        network.connect(a, b);
    }

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Network {
        parse_network(include_str!("../example.txt")).unwrap()
    }

    #[test]
    fn example_triangles() {
        let network = example();
        let triangles = network.triangles();
        assert_eq!(triangles.len(), 12);
        assert!(triangles.contains(&["co", "de", "ta"]));
        let with_t = triangles
            .iter()
            .filter(|names| names.iter().any(|n| n.starts_with('t')))
            .count();
        assert_eq!(with_t, 7);
    }

    #[test]
    fn example_max_clique() {
        assert_eq!(example().max_clique().join(","), "co,de,ka,ta");
    }

    #[test]
    fn empty_network() {
        let network = parse_network("").unwrap();
        assert_eq!(network.computer_n(), 0);
        assert!(network.max_clique().is_empty());
    }

    #[test]
    fn self_link_is_ignored() {
        let network = parse_network("aa-aa\naa-bb\n").unwrap();
        assert_eq!(network.computer_n(), 2);
        assert_eq!(network.max_clique(), ["aa", "bb"]);
        assert!(network.triangles().is_empty());
    }

    #[test]
    fn malformed_connection() {
        assert!(matches!(
            parse_network("ab-\n"),
            Err(Error::InvalidConnectionText(_))
        ));
    }
}
