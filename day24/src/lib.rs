use std::{
    collections::{HashMap, HashSet},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::InputArgs;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    InvalidWireText(String),
    InvalidGateText(String),
    NoGates,
    UnresolvedWires(usize),
    TooManyOutputBits(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidWireText(s) => write!(f, "Invalid text({}) for initial wire value.", s),
            Error::InvalidGateText(s) => write!(f, "Invalid text({}) for gate.", s),
            Error::NoGates => write!(f, "Expect a blank line followed by gates."),
            Error::UnresolvedWires(n) => {
                write!(f, "{} gate(s) can't get all their inputs, circuit may loop.", n)
            }
            Error::TooManyOutputBits(n) => {
                write!(f, "Can't fit {} output bits into one number.", n)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub const SWAPPED_OUTPUT_N: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    And,
    Or,
    Xor,
}

impl Operation {
    fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            Operation::And => a && b,
            Operation::Or => a || b,
            Operation::Xor => a ^ b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    inputs: [String; 2],
    op: Operation,
    output: String,
}

impl TryFrom<&str> for Gate {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static GATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(\w+)\s+(AND|OR|XOR)\s+(\w+)\s+->\s+(\w+)$").unwrap()
        });

        let caps = GATE_PATTERN
            .captures(value.trim())
            .ok_or_else(|| Error::InvalidGateText(value.to_string()))?;
        let op = match &caps[2] {
            "AND" => Operation::And,
            "OR" => Operation::Or,
            _ => Operation::Xor,
        };

        Ok(Self {
            inputs: [caps[1].to_string(), caps[3].to_string()],
            op,
            output: caps[4].to_string(),
        })
    }
}

impl Gate {
    fn has_input(&self, wire: &str) -> bool {
        self.inputs.iter().any(|w| w == wire)
    }

    fn reads_first_bit(&self) -> bool {
        self.inputs.iter().any(|w| w == "x00" || w == "y00")
    }

    fn reads_inputs(&self) -> bool {
        self.inputs.iter().all(|w| is_input_wire(w))
    }
}

fn is_input_wire(wire: &str) -> bool {
    wire.starts_with('x') || wire.starts_with('y')
}

fn is_output_wire(wire: &str) -> bool {
    wire.starts_with('z')
}

#[derive(Debug)]
pub struct Circuit {
    init_wires: HashMap<String, bool>,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Settles every wire, returning each one's value.
    pub fn simulate(&self) -> Result<HashMap<String, bool>, Error> {
        let mut wires = self.init_wires.clone();
        let mut pending = self.gates.iter().collect::<Vec<_>>();
        while !pending.is_empty() {
            let pending_n = pending.len();
            pending.retain(|gate| {
                match (wires.get(&gate.inputs[0]), wires.get(&gate.inputs[1])) {
                    (Some(a), Some(b)) => {
                        let value = gate.op.apply(*a, *b);
                        wires.insert(gate.output.clone(), value);
                        false
                    }
                    _ => true,
                }
            });

            if pending.len() == pending_n {
                return Err(Error::UnresolvedWires(pending_n));
            }
        }

        Ok(wires)
    }

    /// Number formed by the z wires, z00 being the least significant bit.
    pub fn output(&self) -> Result<u64, Error> {
        let wires = self.simulate()?;
        let mut z_bits = wires
            .iter()
            .filter(|(name, _)| is_output_wire(name))
            .collect::<Vec<_>>();
        if z_bits.len() > 64 {
            return Err(Error::TooManyOutputBits(z_bits.len()));
        }

        z_bits.sort_unstable_by(|(a, _), (b, _)| b.cmp(a));
        log::debug!(
            "Output bits: {}.",
            z_bits
                .iter()
                .map(|(_, bit)| if **bit { '1' } else { '0' })
                .collect::<String>()
        );

        Ok(z_bits
            .into_iter()
            .fold(0, |n, (_, bit)| (n << 1) | u64::from(*bit)))
    }

    /// Gate outputs that break the shape of a ripple-carry adder, sorted by name.
    pub fn misplaced_outputs(&self) -> Vec<String> {
        let top_output = self
            .gates
            .iter()
            .map(|g| g.output.as_str())
            .filter(|w| is_output_wire(w))
            .max();
        let feeds = |wire: &str, op: Operation| {
            self.gates
                .iter()
                .any(|g| g.op == op && g.has_input(wire))
        };

        let mut misplaced = HashSet::new();
        for gate in &self.gates {
            let output = gate.output.as_str();
            let is_misplaced = match gate.op {
                Operation::Xor if gate.reads_inputs() => {
                    !gate.reads_first_bit() && !feeds(output, Operation::Xor)
                }
                Operation::Xor => !is_output_wire(output),
                Operation::And if is_output_wire(output) => true,
                Operation::And => !gate.reads_first_bit() && !feeds(output, Operation::Or),
                Operation::Or => is_output_wire(output) && Some(output) != top_output,
            };

            if is_misplaced {
                log::debug!("Gate {:?} has misplaced output.", gate);
                misplaced.insert(output.to_string());
            }
        }

        let mut misplaced = misplaced.into_iter().collect::<Vec<_>>();
        misplaced.sort_unstable();
        misplaced
    }
}

pub fn parse_circuit(text: &str) -> Result<Circuit, Error> {
    let text = text.replace("\r\n", "\n");
    let (wires_text, gates_text) = text.split_once("\n\n").ok_or(Error::NoGates)?;
    let init_wires = wires_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            let (name, value) = l
                .split_once(':')
                .ok_or_else(|| Error::InvalidWireText(l.to_string()))?;
            match value.trim() {
                "0" => Ok((name.trim().to_string(), false)),
                "1" => Ok((name.trim().to_string(), true)),
                _ => Err(Error::InvalidWireText(l.to_string())),
            }
        })
        .collect::<Result<HashMap<_, _>, _>>()?;
    let gates = gates_text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(Gate::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Circuit { init_wires, gates })
}

pub fn read_circuit<P: AsRef<Path>>(path: P) -> Result<Circuit> {
    let text = common::read_text(&path)?;
    parse_circuit(&text).with_context(|| {
        format!(
            "Failed to parse circuit in given file({}).",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_output() {
        let circuit = parse_circuit(include_str!("../example.txt")).unwrap();
        assert_eq!(circuit.output().unwrap(), 4);
    }

    #[test]
    fn looping_gates() {
        let circuit = parse_circuit("x00: 1\n\nx00 AND b -> a\nx00 OR a -> b\n").unwrap();
        assert!(matches!(circuit.output(), Err(Error::UnresolvedWires(2))));
    }

    /// Ripple-carry adder over `bit_n` bits, carries named `cNN`.
    fn adder(bit_n: usize, swaps: &[(&str, &str)]) -> String {
        let mut gates = vec![
            ("x00".to_string(), "XOR", "y00".to_string(), "z00".to_string()),
            ("x00".to_string(), "AND", "y00".to_string(), "c00".to_string()),
        ];
        for i in 1..bit_n {
            let carry_in = format!("c{:02}", i - 1);
            let carry_out = if i + 1 == bit_n {
                format!("z{:02}", bit_n)
            } else {
                format!("c{:02}", i)
            };
            gates.extend([
                (format!("x{:02}", i), "XOR", format!("y{:02}", i), format!("s{:02}", i)),
                (format!("x{:02}", i), "AND", format!("y{:02}", i), format!("a{:02}", i)),
                (format!("s{:02}", i), "XOR", carry_in.clone(), format!("z{:02}", i)),
                (carry_in, "AND", format!("s{:02}", i), format!("b{:02}", i)),
                (format!("a{:02}", i), "OR", format!("b{:02}", i), carry_out),
            ]);
        }
        for (l, r) in swaps {
            for gate in gates.iter_mut() {
                if gate.3 == *l {
                    gate.3 = r.to_string();
                } else if gate.3 == *r {
                    gate.3 = l.to_string();
                }
            }
        }

        let mut text = String::new();
        for i in 0..bit_n {
            text.push_str(&format!("x{:02}: 1\ny{:02}: 0\n", i, i));
        }
        text.push('\n');
        for (a, op, b, out) in gates {
            text.push_str(&format!("{} {} {} -> {}\n", a, op, b, out));
        }

        text
    }

    #[test]
    fn intact_adder_adds() {
        let circuit = parse_circuit(&adder(6, &[])).unwrap();
        assert_eq!(circuit.output().unwrap(), 0b111111);
        assert!(circuit.misplaced_outputs().is_empty());
    }

    #[test]
    fn swapped_adder_outputs() {
        let swaps = [("z02", "c02"), ("s03", "a03"), ("z05", "b05"), ("z06", "a06")];
        let circuit = parse_circuit(&adder(8, &swaps)).unwrap();
        assert_eq!(
            circuit.misplaced_outputs().join(","),
            "a03,a06,b05,c02,s03,z02,z05,z06"
        );
    }

    #[test]
    fn example_adder_outputs() {
        let circuit = parse_circuit(include_str!("../example2.txt")).unwrap();
        assert_eq!(circuit.misplaced_outputs().len(), SWAPPED_OUTPUT_N);
    }
}
