use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;

#[derive(Debug)]
pub enum Error {
    InvalidDigit(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidDigit(c) => write!(f, "Invalid character({}) in disk map.", c),
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
struct Span {
    start: usize,
    len: usize,
}

#[derive(Debug, Clone)]
pub struct DiskMap {
    // Indexed by file ID.
    files: Vec<Span>,
    frees: Vec<Span>,
}

impl TryFrom<&str> for DiskMap {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut files = Vec::new();
        let mut frees = Vec::new();
        let mut block_ind = 0;
        for (ind, c) in value.trim().chars().enumerate() {
            let len = c.to_digit(10).ok_or(Error::InvalidDigit(c))? as usize;
            let span = Span {
                start: block_ind,
                len,
            };
            if ind % 2 == 0 {
                files.push(span);
            } else if len > 0 {
                frees.push(span);
            }
            block_ind += len;
        }

        Ok(Self { files, frees })
    }
}

impl DiskMap {
    pub fn file_n(&self) -> usize {
        self.files.len()
    }

    /// Moves single blocks from the end of the disk into the leftmost free blocks.
    pub fn compact_blocks(&self) -> Vec<Option<usize>> {
        let mut blocks = self.blocks();
        if blocks.is_empty() {
            return blocks;
        }

        let mut front = 0;
        let mut back = blocks.len() - 1;
        loop {
            while front < back && blocks[front].is_some() {
                front += 1;
            }
            while front < back && blocks[back].is_none() {
                back -= 1;
            }
            if front >= back {
                break;
            }

            blocks.swap(front, back);
        }

        blocks
    }

    /// Moves whole files, highest ID first, into the leftmost free span that fits.
    pub fn compact_files(&self) -> Vec<Option<usize>> {
        let mut files = self.files.clone();
        let mut frees = self.frees.clone();
        for (id, file) in files.iter_mut().enumerate().rev() {
            let Some(free) = frees
                .iter_mut()
                .take_while(|free| free.start < file.start)
                .find(|free| free.len >= file.len)
            else {
                continue;
            };

            log::debug!("Moving file {} from {} to {}.", id, file.start, free.start);
            file.start = free.start;
            free.start += file.len;
            free.len -= file.len;
        }

        Self::layout(&files, self.disk_len())
    }

    pub fn checksum(blocks: &[Option<usize>]) -> usize {
        blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| id.map(|id| pos * id))
            .sum()
    }

    fn blocks(&self) -> Vec<Option<usize>> {
        Self::layout(&self.files, self.disk_len())
    }

    fn disk_len(&self) -> usize {
        self.files
            .iter()
            .chain(self.frees.iter())
            .map(|span| span.start + span.len)
            .max()
            .unwrap_or(0)
    }

    fn layout(files: &[Span], disk_len: usize) -> Vec<Option<usize>> {
        let mut blocks = vec![None; disk_len];
        for (id, file) in files.iter().enumerate() {
            for block in &mut blocks[file.start..(file.start + file.len)] {
                *block = Some(id);
            }
        }

        blocks
    }
}

pub fn display_blocks(blocks: &[Option<usize>]) -> String {
    blocks
        .iter()
        .map(|id| match id {
            Some(id) => std::char::from_digit((*id % 10) as u32, 10).unwrap_or('?'),
            None => '.',
        })
        .collect()
}

pub fn read_disk_map<P: AsRef<Path>>(path: P) -> Result<DiskMap> {
    let text = common::read_text(&path)?;
    DiskMap::try_from(text.as_str()).with_context(|| {
        format!(
            "Failed to parse disk map in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn example_block_compaction() {
        let disk = DiskMap::try_from(EXAMPLE).unwrap();
        let blocks = disk.compact_blocks();
        assert_eq!(
            display_blocks(&blocks),
            "0099811188827773336446555566.............."
        );
        assert_eq!(DiskMap::checksum(&blocks), 1928);
    }

    #[test]
    fn example_file_compaction() {
        let disk = DiskMap::try_from(EXAMPLE).unwrap();
        let blocks = disk.compact_files();
        assert_eq!(
            display_blocks(&blocks),
            "00992111777.44.333....5555.6666.....8888.."
        );
        assert_eq!(DiskMap::checksum(&blocks), 2858);
    }

    #[test]
    fn tiny_map() {
        let disk = DiskMap::try_from("12345").unwrap();
        assert_eq!(disk.file_n(), 3);
        assert_eq!(display_blocks(&disk.compact_blocks()), "022111222......");
    }
}
