use std::io;

use clap::Args;
use orchid::{
    auth::LoginForm,
    checkout::AuthCompletion,
    navigation::{DASHBOARD_PATH, LOGIN_PATH},
};

use crate::{cli::output_error, config::Config, context};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email address
    #[arg(long, env = "ORCHID_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "ORCHID_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(
    config: &Config,
    args: LoginArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut storefront = context::default_storefront(config, LOGIN_PATH);

    storefront
        .start()
        .await
        .map_err(|error| format!("failed to restore session: {error}"))?;

    let form = LoginForm::new(args.email, args.password);

    let completion = storefront
        .sign_in(&form)
        .await
        .map_err(|error| error.to_string())?;

    if let Some(identity) = storefront.identity() {
        writeln!(out, "Signed in as {} <{}>", identity.name, identity.email)
            .map_err(output_error)?;
    }

    if completion == AuthCompletion::Dashboard {
        writeln!(out, "Now at {DASHBOARD_PATH}").map_err(output_error)?;
    }

    Ok(())
}
