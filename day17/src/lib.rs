use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    NoRegister(char),
    InvalidRegisterValue(String),
    NoProgram,
    InvalidCode(String),
    InvalidOpcode(u8),
    InvalidComboOperand(u8),
    NoHalt(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoRegister(name) => write!(f, "Can't find line for register {}.", name),
            Error::InvalidRegisterValue(s) => write!(f, "Invalid text({}) for register value.", s),
            Error::NoProgram => write!(f, "Can't find line for program."),
            Error::InvalidCode(s) => write!(f, "Invalid text({}) for 3-bit code.", s),
            Error::InvalidOpcode(n) => write!(f, "Invalid operation code({}).", n),
            Error::InvalidComboOperand(n) => write!(f, "Invalid combo operand({}).", n),
            Error::NoHalt(n) => write!(f, "Program doesn't halt within {} instructions.", n),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub const INSTRUCTION_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opcode {
    Adv,
    Bxl,
    Bst,
    Jnz,
    Bxc,
    Out,
    Bdv,
    Cdv,
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Adv),
            1 => Ok(Opcode::Bxl),
            2 => Ok(Opcode::Bst),
            3 => Ok(Opcode::Jnz),
            4 => Ok(Opcode::Bxc),
            5 => Ok(Opcode::Out),
            6 => Ok(Opcode::Bdv),
            7 => Ok(Opcode::Cdv),
            other => Err(Error::InvalidOpcode(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u64,
    pub b: u64,
    pub c: u64,
}

impl Registers {
    pub fn new(a: u64, b: u64, c: u64) -> Self {
        Self { a, b, c }
    }

    fn combo(&self, operand: u8) -> Result<u64, Error> {
        match operand {
            0..=3 => Ok(u64::from(operand)),
            4 => Ok(self.a),
            5 => Ok(self.b),
            6 => Ok(self.c),
            other => Err(Error::InvalidComboOperand(other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Computer {
    registers: Registers,
    program: Vec<u8>,
}

impl Computer {
    pub fn new(registers: Registers, program: Vec<u8>) -> Self {
        Self { registers, program }
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn run(&self) -> Result<Vec<u8>, Error> {
        self.run_with_a(self.registers.a)
    }

    /// Runs the program until the instruction pointer leaves it, starting with the given register A.
    pub fn run_with_a(&self, a: u64) -> Result<Vec<u8>, Error> {
        let mut regs = Registers { a, ..self.registers };
        let mut output = Vec::new();
        let mut inst_ptr = 0;
        let mut inst_n = 0;
        while let (Some(&code), Some(&operand)) =
            (self.program.get(inst_ptr), self.program.get(inst_ptr + 1))
        {
            if inst_n == INSTRUCTION_LIMIT {
                return Err(Error::NoHalt(inst_n));
            }
            inst_n += 1;
            inst_ptr += 2;
            match Opcode::try_from(code)? {
                Opcode::Adv => regs.a = Self::divide(regs.a, regs.combo(operand)?),
                Opcode::Bxl => regs.b ^= u64::from(operand),
                Opcode::Bst => regs.b = regs.combo(operand)? % 8,
                Opcode::Jnz => {
                    if regs.a != 0 {
                        inst_ptr = usize::from(operand);
                    }
                }
                Opcode::Bxc => regs.b ^= regs.c,
                Opcode::Out => output.push((regs.combo(operand)? % 8) as u8),
                Opcode::Bdv => regs.b = Self::divide(regs.a, regs.combo(operand)?),
                Opcode::Cdv => regs.c = Self::divide(regs.a, regs.combo(operand)?),
            }
        }

        Ok(output)
    }

    /// Lowest register A making the program print itself.
    ///
    /// Only programs that loop by shifting A right 3 bits each round are searched,
    /// so every output digit depends only on the bits of A from that round upwards.
    /// Any other program gives `None`.
    pub fn self_printing_a(&self) -> Result<Option<u64>, Error> {
        if !self.shifts_a_per_output() {
            log::debug!("Program doesn't print once per 3-bit shift of A, skip searching.");
            return Ok(None);
        }

        self.search_a(0, self.program.len())
    }

    // One `adv 3`, one `out` and a single `jnz 0` closing the loop.
    fn shifts_a_per_output(&self) -> bool {
        if self.program.len() % 2 != 0 {
            return false;
        }

        let insts = self
            .program
            .chunks_exact(2)
            .map(|pair| (Opcode::try_from(pair[0]).ok(), pair[1]))
            .collect::<Vec<_>>();
        let count = |op: Opcode| {
            insts
                .iter()
                .filter(|(code, _)| *code == Some(op))
                .count()
        };

        count(Opcode::Adv) == 1
            && insts.contains(&(Some(Opcode::Adv), 3))
            && count(Opcode::Out) == 1
            && count(Opcode::Jnz) == 1
            && insts.last() == Some(&(Some(Opcode::Jnz), 0))
    }

    fn search_a(&self, prefix: u64, remain_n: usize) -> Result<Option<u64>, Error> {
        if remain_n == 0 {
            return Ok(Some(prefix));
        }

        let expect = &self.program[(remain_n - 1)..];
        for digit in 0..8 {
            let a = (prefix << 3) | digit;
            if a == 0 {
                continue;
            }

            if self.run_with_a(a)? == expect {
                log::debug!("A = {:o} prints the last {} code(s).", a, expect.len());
                if let Some(found) = self.search_a(a, remain_n - 1)? {
                    return Ok(Some(found));
                }
            }
        }

        Ok(None)
    }

    fn divide(numerator: u64, power: u64) -> u64 {
        u32::try_from(power)
            .ok()
            .and_then(|p| 1u64.checked_shl(p))
            .map_or(0, |denominator| numerator / denominator)
    }
}

pub fn format_output(output: &[u8]) -> String {
    output
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn parse_computer(text: &str) -> Result<Computer, Error> {
    static REGISTER_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"Register ([ABC]):\s*(\S+)").unwrap());
    static PROGRAM_PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"Program:\s*(\S+)").unwrap());

    let mut values = [None; 3];
    for caps in REGISTER_PATTERN.captures_iter(text) {
        let value = caps[2]
            .parse::<u64>()
            .map_err(|_| Error::InvalidRegisterValue(caps[2].to_string()))?;
        let ind = match &caps[1] {
            "A" => 0,
            "B" => 1,
            _ => 2,
        };
        values[ind] = Some(value);
    }
    let [Some(a), Some(b), Some(c)] = values else {
        let missing_ind = values.iter().position(Option::is_none).unwrap_or(0);
        return Err(Error::NoRegister(['A', 'B', 'C'][missing_ind]));
    };

    let program = PROGRAM_PATTERN
        .captures(text)
        .ok_or(Error::NoProgram)?[1]
        .split(',')
        .map(|s| match s.parse::<u8>() {
            Ok(code) if code < 8 => Ok(code),
            _ => Err(Error::InvalidCode(s.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Computer::new(Registers::new(a, b, c), program))
}

pub fn read_computer<P: AsRef<Path>>(path: P) -> Result<Computer> {
    let text = common::read_text(&path)?;
    parse_computer(&text).with_context(|| {
        format!(
            "Failed to parse debug information in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: u64, program: &[u8]) -> Vec<u8> {
        Computer::new(Registers::new(a, 0, 0), program.to_vec())
            .run()
            .unwrap()
    }

    #[test]
    fn example_output() {
        let computer = parse_computer(include_str!("../example.txt")).unwrap();
        assert_eq!(
            format_output(&computer.run().unwrap()),
            "4,6,3,5,6,3,5,2,1,0"
        );
    }

    #[test]
    fn small_programs() {
        assert_eq!(run(10, &[5, 0, 5, 1, 5, 4]), [0, 1, 2]);
        assert_eq!(
            run(2024, &[0, 1, 5, 4, 3, 0]),
            [4, 2, 5, 6, 7, 7, 7, 7, 3, 1, 0]
        );
    }

    #[test]
    fn example_self_printing() {
        let computer = parse_computer(include_str!("../example2.txt")).unwrap();
        let a = computer.self_printing_a().unwrap();
        assert_eq!(a, Some(117440));
        assert_eq!(computer.run_with_a(117440).unwrap(), computer.program());
    }

    #[test]
    fn combo_operand_seven_is_rejected() {
        let computer = Computer::new(Registers::new(1, 0, 0), vec![5, 7]);
        assert!(matches!(computer.run(), Err(Error::InvalidComboOperand(7))));
    }

    #[test]
    fn endless_loop_is_cut_off() {
        let computer = Computer::new(Registers::new(1, 0, 0), vec![3, 0]);
        assert!(matches!(
            computer.run(),
            Err(Error::NoHalt(INSTRUCTION_LIMIT))
        ));
    }

    #[test]
    fn program_without_shift_isnt_searched() {
        let computer =
            parse_computer("Register A: 5\nRegister B: 0\nRegister C: 0\n\nProgram: 5,4,3,0")
                .unwrap();
        assert_eq!(computer.self_printing_a().unwrap(), None);

        let two_outputs = Computer::new(Registers::new(1, 0, 0), vec![0, 3, 5, 4, 5, 4, 3, 0]);
        assert_eq!(two_outputs.self_printing_a().unwrap(), None);

        let early_jump = Computer::new(Registers::new(1, 0, 0), vec![3, 0, 0, 3, 5, 4]);
        assert_eq!(early_jump.self_printing_a().unwrap(), None);
    }

    #[test]
    fn missing_register_is_reported() {
        assert!(matches!(
            parse_computer("Register A: 1\nRegister C: 0\n\nProgram: 0,1"),
            Err(Error::NoRegister('B'))
        ));
    }
}
