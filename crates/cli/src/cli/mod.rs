use std::io;

use clap::{Parser, Subcommand};

use crate::config::Config;

mod catalog;
mod checkout;
mod login;
mod logout;
mod whoami;

#[derive(Debug, Parser)]
#[command(name = "orchid", about = "Orchid storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the courses on offer
    Catalog,

    /// Sign in and remember the identity in the session file
    Login(login::LoginArgs),

    /// Forget the signed-in identity
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Put courses in a cart and buy them
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) async fn run(self, out: &mut impl io::Write) -> Result<(), String> {
        match self.command {
            Commands::Catalog => catalog::run(&self.config, out),
            Commands::Login(args) => login::run(&self.config, args, out).await,
            Commands::Logout => logout::run(&self.config, out).await,
            Commands::Whoami => whoami::run(&self.config, out).await,
            Commands::Checkout(args) => checkout::run(&self.config, &args, out).await,
        }
    }
}

fn output_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}
