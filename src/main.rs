use std::process;

use clap::Parser;
use monkey::cli::{run, Cli};

fn main() {
    // RUST_LOG filters; quiet unless asked
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{}", error);
        process::exit(1);
    }
}
