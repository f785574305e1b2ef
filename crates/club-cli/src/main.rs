use clap::Parser;
use tracing_subscriber::EnvFilter;

use club_cli::{Cli, input};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Diagnostics go to stderr; stdout carries the report protocol.
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = run(&cli) {
        // Fatal input errors print the offending raw line and nothing else.
        println!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let day = input::parse_log(&cli.input)?;
    let report = club_core::replay(day.config, &day.events);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
