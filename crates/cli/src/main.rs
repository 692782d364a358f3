//! Orchid storefront CLI

use std::{io, process};

use clap::Parser;

use crate::cli::Cli;

mod cli;
mod config;
mod context;
mod observability;
mod shutdown;

#[tokio::main]
#[expect(
    clippy::print_stderr,
    reason = "errors are reported on stderr when logging may not be initialised"
)]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run(&mut io::stdout()).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
