//! xrd-convert
//!
//! Converts one REST/JSON payload to SOAP/XML, or one SOAP/XML payload to
//! REST/JSON.

use clap::Parser;
use xrd_cli::{CliConfig, init_logging, read_input, run};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    init_logging(&config.log_level);

    let input = read_input(config.input.as_deref())?;
    let output = run(&config, &input)?;
    println!("{}", output);

    Ok(())
}
