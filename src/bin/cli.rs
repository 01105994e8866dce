// src/bin/cli.rs
use clap::Parser;
use top_raves::cli::{self, Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = cli::run(Args::parse()) {
        let code = e.exit_code();
        eprintln!("Error: {:?}", color_eyre::Report::new(e));
        std::process::exit(code);
    }
    Ok(())
}
