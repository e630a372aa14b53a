use anyhow::Result;
use clap::Parser;
use common::InputArgs;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(usize, usize),
    Do,
    Dont,
}

/// Corrupted memory, kept as one string so `do()`/`don't()` carry across lines.
pub struct Memory {
    text: String,
}

impl Memory {
    pub fn new(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        static INST_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").unwrap()
        });

        INST_PATTERN
            .captures_iter(&self.text)
            .map(|caps| match &caps[0] {
                "do()" => Instruction::Do,
                "don't()" => Instruction::Dont,
                _ => {
                    // At most 3 digits each, parsing can't fail.
                    let l_factor = caps[1].parse::<usize>().unwrap();
                    let r_factor = caps[2].parse::<usize>().unwrap();
                    Instruction::Mul(l_factor, r_factor)
                }
            })
            .collect()
    }

    pub fn mul_sum(&self) -> usize {
        self.instructions()
            .into_iter()
            .map(|inst| match inst {
                Instruction::Mul(l, r) => l * r,
                _ => 0,
            })
            .sum()
    }

    pub fn mul_sum_enable(&self) -> usize {
        let mut enabled = true;
        let mut sum = 0;
        for inst in self.instructions() {
            match inst {
                Instruction::Do => enabled = true,
                Instruction::Dont => enabled = false,
                Instruction::Mul(l, r) if enabled => {
                    sum += l * r;
                    log::debug!("mul({},{}) -> {} (total: {})", l, r, l * r, sum);
                }
                Instruction::Mul(l, r) => log::debug!("mul({},{}) -> disabled", l, r),
            }
        }

        sum
    }
}

pub fn read_memory<P: AsRef<std::path::Path>>(path: P) -> Result<Memory> {
    common::read_text(path).map(|text| Memory::new(&text))
}
