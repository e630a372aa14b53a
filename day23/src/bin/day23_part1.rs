use anyhow::{Context, Result};
use clap::Parser;
use day23::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.input.init_logger()?;
    let input_path = args.input.path();
    let network = day23::read_network(&input_path).with_context(|| {
        format!(
            "Failed to read network map from given file({}).",
            input_path.display()
        )
    })?;

    let triangles = network.triangles();
    log::info!(
        "Found {} sets of three connected computers among {}.",
        triangles.len(),
        network.computer_n()
    );
    let chief_n = triangles
        .iter()
        .filter(|names| names.iter().any(|n| n.starts_with('t')))
        .count();
    println!(
        "There are {} sets of three connected computers containing one name starting with t.",
        chief_n
    );

    Ok(())
}
