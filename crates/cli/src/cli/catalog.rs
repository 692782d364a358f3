use std::io;

use orchid::receipt::write_catalog;

use crate::{config::Config, context};

pub(crate) fn run(config: &Config, out: &mut impl io::Write) -> Result<(), String> {
    let catalog = context::catalog(config)?;

    write_catalog(out, &catalog).map_err(|error| format!("failed to write catalog: {error}"))
}
