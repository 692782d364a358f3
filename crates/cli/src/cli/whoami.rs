use std::io;

use orchid::navigation::HOME_PATH;

use crate::{cli::output_error, config::Config, context};

pub(crate) async fn run(config: &Config, out: &mut impl io::Write) -> Result<(), String> {
    let mut storefront = context::default_storefront(config, HOME_PATH);

    storefront
        .start()
        .await
        .map_err(|error| format!("failed to restore session: {error}"))?;

    match storefront.identity() {
        Some(identity) => writeln!(
            out,
            "{} <{}> [{}]",
            identity.name,
            identity.email,
            identity.initials()
        ),
        None => writeln!(out, "Not signed in"),
    }
    .map_err(output_error)
}
