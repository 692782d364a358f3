//! Command context

use orchid::{
    auth::DemoAccount,
    catalog::{
        Catalog,
        fixtures::{demo_catalog, load_catalog_file},
    },
    checkout::SimulatedGateway,
    navigation::MemoryNavigator,
    session::FileSessionStore,
    storefront::Storefront,
};

use crate::config::Config;

/// Storefront backed by the session file.
pub(crate) type CliStorefront = Storefront<FileSessionStore, SimulatedGateway>;

/// Load the configured catalog, or the bundled demo one.
pub(crate) fn catalog(config: &Config) -> Result<Catalog, String> {
    match &config.catalog {
        Some(path) => load_catalog_file(path)
            .map_err(|error| format!("failed to load catalog {}: {error}", path.display())),
        None => demo_catalog().map_err(|error| format!("failed to load demo catalog: {error}")),
    }
}

/// Storefront starting at `path`, answering purchases with `gateway`.
pub(crate) fn storefront(config: &Config, gateway: SimulatedGateway, path: &str) -> CliStorefront {
    Storefront::new(
        FileSessionStore::new(&config.session.session_file),
        gateway,
        MemoryNavigator::new(path),
        DemoAccount::default(),
        config.timing.storefront(),
    )
}

/// Storefront starting at `path` with the configured simulated backend.
pub(crate) fn default_storefront(config: &Config, path: &str) -> CliStorefront {
    storefront(
        config,
        SimulatedGateway::new(config.timing.processing_delay()),
        path,
    )
}
