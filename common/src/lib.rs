use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use log::LevelFilter;

pub const INPUT_FILE: &str = "input.txt";
pub const EXAMPLE_FILE: &str = "example.txt";

/// Input selection and verbosity switches shared by every puzzle binary.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Puzzle input file, defaults to input.txt (example.txt with --test).
    pub input_path: Option<PathBuf>,
    /// Run against the worked example in example.txt.
    #[arg(short, long)]
    pub test: bool,
    /// Print intermediate steps to stderr.
    #[arg(short, long)]
    pub debug: bool,
}

impl InputArgs {
    pub fn path(&self) -> PathBuf {
        match (&self.input_path, self.test) {
            (Some(path), _) => path.clone(),
            (None, true) => PathBuf::from(EXAMPLE_FILE),
            (None, false) => PathBuf::from(INPUT_FILE),
        }
    }

    pub fn init_logger(&self) -> Result<()> {
        init_logger(if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
    }
}

pub fn init_logger(level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to set up logger.")
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read given file({}).", path.as_ref().display()))
}

/// Every line of the file, each read failure naming its line number.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(ind, l)| {
            l.with_context(|| {
                format!(
                    "Failed to read line {} from given file({}).",
                    ind,
                    path.as_ref().display()
                )
            })
        })
        .collect()
}

/// Trimmed lines of the file, blank ones dropped.
pub fn read_nonempty_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(read_lines(path)?
        .into_iter()
        .filter_map(|l| {
            let trimmed = l.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        input: InputArgs,
    }

    #[test]
    fn explicit_path_wins_over_test_flag() {
        let args = TestArgs::parse_from(["prog", "--test", "other.txt"]);
        assert_eq!(args.input.path(), PathBuf::from("other.txt"));
    }

    #[test]
    fn test_flag_selects_example() {
        let args = TestArgs::parse_from(["prog", "-t"]);
        assert_eq!(args.input.path(), PathBuf::from(EXAMPLE_FILE));
        assert!(!args.input.debug);
    }

    #[test]
    fn default_is_real_input() {
        let args = TestArgs::parse_from(["prog", "-d"]);
        assert_eq!(args.input.path(), PathBuf::from(INPUT_FILE));
        assert!(args.input.debug);
    }

    #[test]
    fn missing_file_names_its_path() {
        let err = read_text("no_such_input.txt").unwrap_err();
        assert!(err.to_string().contains("no_such_input.txt"));
    }

    #[test]
    fn nonempty_lines_are_trimmed() {
        let path = std::env::temp_dir().join("common_nonempty_lines_test.txt");
        fs::write(&path, "  12 \n\n\t\n34\r\n").unwrap();
        assert_eq!(read_lines(&path).unwrap().len(), 4);
        assert_eq!(read_nonempty_lines(&path).unwrap(), ["12", "34"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_fails_line_reading() {
        let err = read_nonempty_lines("no_such_lines.txt").unwrap_err();
        assert!(err.to_string().contains("no_such_lines.txt"));
    }
}
