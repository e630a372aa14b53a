use anyhow::{Context, Result};
use clap::Parser;
use day13::{CLIArgs, PRIZE_OFFSET};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let machines = day13::read_machines(&input_path).with_context(|| {
        format!(
            "Failed to read claw machines from given file({}).",
            input_path.display()
        )
    })?;

    let mut tokens = 0;
    for (ind, machine) in machines.iter().enumerate() {
        let far_machine = machine.with_prize_offset(PRIZE_OFFSET);
        if let Some((a_n, b_n)) = far_machine.presses(None) {
            log::debug!("Machine #{}: press A {} times, B {} times.", ind + 1, a_n, b_n);
        }
        tokens += far_machine.min_tokens(None).unwrap_or(0);
    }
    println!(
        "The fewest tokens to win all possible prizes after conversion is {}.",
        tokens
    );

    Ok(())
}
