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

    let clique = network.max_clique();
    println!("The password to get into the LAN party is {}.", clique.join(","));

    Ok(())
}
