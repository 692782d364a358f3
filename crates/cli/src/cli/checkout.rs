use std::{io, time::Instant};

use clap::Args;
use humanize_duration::{Truncate, prelude::DurationExt};
use orchid::{
    auth::LoginForm,
    catalog::CourseId,
    checkout::{AuthCompletion, CheckoutAttempt, SimulatedGateway},
    navigation::{COURSES_PATH, Navigator},
    receipt::{write_cart, write_learning},
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{
    cli::output_error,
    config::Config,
    context::{self, CliStorefront},
    shutdown,
};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Course id to buy; repeat for more courses
    #[arg(long = "course", required = true, num_args = 1..)]
    courses: Vec<u32>,

    /// Email used if checkout needs a sign-in
    #[arg(long, env = "ORCHID_EMAIL")]
    email: Option<String>,

    /// Password used if checkout needs a sign-in
    #[arg(long, env = "ORCHID_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Make the simulated backend decline with this reason
    #[arg(long)]
    decline: Option<String>,
}

pub(crate) async fn run(
    config: &Config,
    args: &CheckoutArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let catalog = context::catalog(config)?;
    let processing_delay = config.timing.processing_delay();

    let gateway = match &args.decline {
        Some(reason) => SimulatedGateway::declining(processing_delay, reason.clone()),
        None => SimulatedGateway::new(processing_delay),
    };

    let mut storefront = context::storefront(config, gateway, COURSES_PATH);

    storefront
        .start()
        .await
        .map_err(|error| format!("failed to restore session: {error}"))?;

    for id in &args.courses {
        let course = catalog
            .get(CourseId(*id))
            .ok_or_else(|| format!("unknown course id: {id}"))?;

        if !storefront.add_to_cart(course.clone()) {
            warn!(course_id = id, "course listed twice, keeping one seat");
        }
    }

    storefront.set_cart_open(true);

    write_cart(&mut *out, storefront.cart())
        .map_err(|error| format!("failed to write cart: {error}"))?;

    let attempt = storefront
        .attempt_checkout()
        .map_err(|error| format!("checkout refused: {error}"))?;

    report_state(out, &storefront)?;

    if attempt == CheckoutAttempt::RedirectedToLogin {
        sign_in_for_checkout(&mut storefront, args, out).await?;

        storefront
            .attempt_checkout()
            .map_err(|error| format!("checkout refused: {error}"))?;

        report_state(out, &storefront)?;
    }

    let cancel = CancellationToken::new();
    let listener = tokio::spawn(shutdown::listen(cancel.clone()));
    let started = Instant::now();

    let result = storefront.process_checkout(&cancel).await;

    listener.abort();

    let confirmation = result.map_err(|error| format!("checkout failed: {error}"))?;
    let elapsed = started.elapsed();

    writeln!(
        out,
        "Purchase confirmed at {} ({})",
        confirmation.confirmed_at,
        elapsed.human(Truncate::Nano)
    )
    .map_err(output_error)?;

    report_state(out, &storefront)?;

    storefront
        .finish_after_delay()
        .await
        .map_err(|error| format!("failed to finish checkout: {error}"))?;

    report_state(out, &storefront)?;

    writeln!(out, "Now at {}", storefront.navigator().current_path()).map_err(output_error)?;

    let history = storefront.cart().history();

    write_learning(&mut *out, history.iter(), history.stats())
        .map_err(|error| format!("failed to write learning history: {error}"))
}

async fn sign_in_for_checkout(
    storefront: &mut CliStorefront,
    args: &CheckoutArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let (Some(email), Some(password)) = (&args.email, &args.password) else {
        return Err(
            "checkout needs a signed-in user: run `orchid login` or pass --email and --password"
                .to_string(),
        );
    };

    writeln!(
        out,
        "Redirected to {} to sign in",
        storefront.navigator().current_path()
    )
    .map_err(output_error)?;

    let completion = storefront
        .sign_in(&LoginForm::new(email.clone(), password.clone()))
        .await
        .map_err(|error| error.to_string())?;

    if let AuthCompletion::CartRestored { restored, path } = completion {
        writeln!(out, "Restored {restored} cart item(s), back at {path}").map_err(output_error)?;
    }

    Ok(())
}

fn report_state(out: &mut impl io::Write, storefront: &CliStorefront) -> Result<(), String> {
    writeln!(out, "Checkout: {}", storefront.checkout_state()).map_err(output_error)
}
