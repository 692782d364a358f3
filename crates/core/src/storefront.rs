//! Storefront
//!
//! One visitor's session: auth, cart, checkout and navigation, constructed
//! together and driven through a single value.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    auth::{AuthService, AuthStatus, DemoAccount, Identity, LoginError, LoginForm},
    cart::CartStore,
    catalog::Course,
    checkout::{
        AuthCompletion, CheckoutAttempt, CheckoutCoordinator, CheckoutError, CheckoutRejection,
        CheckoutState, DEFAULT_CONFIRMATION_DELAY, PurchaseConfirmation, PurchaseGateway,
    },
    navigation::{
        LOGIN_PATH, MemoryNavigator, NavLink, Navigator, RouteDecision, guard_route, header_links,
    },
    session::SessionStore,
};

/// Default wait before the stored session is restored.
pub const DEFAULT_RESTORE_DELAY: Duration = Duration::from_millis(500);

/// Default wait between submitting the login form and checking it.
pub const DEFAULT_SIGN_IN_LATENCY: Duration = Duration::from_secs(1);

/// Timings of the simulated parts of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Wait before restoring the stored session.
    pub restore_delay: Duration,

    /// Wait before checking submitted credentials.
    pub sign_in_latency: Duration,

    /// How long the purchase success message stays up.
    pub confirmation_delay: Duration,
}

impl StorefrontConfig {
    /// No simulated waits at all.
    pub fn immediate() -> Self {
        Self {
            restore_delay: Duration::ZERO,
            sign_in_latency: Duration::ZERO,
            confirmation_delay: Duration::ZERO,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            restore_delay: DEFAULT_RESTORE_DELAY,
            sign_in_latency: DEFAULT_SIGN_IN_LATENCY,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
        }
    }
}

/// Storefront errors.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Checkout was turned away.
    #[error(transparent)]
    Rejected(#[from] CheckoutRejection),

    /// Checkout step failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Sign-in failed.
    #[error(transparent)]
    Login(#[from] LoginError),
}

/// Outcome of arriving at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// The page is shown.
    Rendered,

    /// Auth is still loading; the page waits.
    Deferred,

    /// Anonymous visitor sent to login.
    RedirectedToLogin,

    /// Login visited while signed in; auth completion ran.
    Completed(AuthCompletion),
}

/// Outcome of a full checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Anonymous; sent to login with the cart attached.
    RedirectedToLogin,

    /// Purchase confirmed and acknowledged.
    Purchased(PurchaseConfirmation),
}

/// A visitor's storefront session.
#[derive(Debug)]
pub struct Storefront<S, G, N = MemoryNavigator> {
    auth: AuthService<S>,
    cart: CartStore,
    checkout: CheckoutCoordinator,
    navigator: N,
    gateway: G,
    account: DemoAccount,
    config: StorefrontConfig,
}

impl<S, G, N> Storefront<S, G, N>
where
    S: SessionStore,
    G: PurchaseGateway,
    N: Navigator,
{
    /// Assemble a storefront. Auth starts loading until [`Storefront::start`].
    pub fn new(
        store: S,
        gateway: G,
        navigator: N,
        account: DemoAccount,
        config: StorefrontConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(store),
            cart: CartStore::new(),
            checkout: CheckoutCoordinator::new(),
            navigator,
            gateway,
            account,
            config,
        }
    }

    /// Restore the stored session, then re-check the current route, which may
    /// have been deferred while loading.
    ///
    /// # Errors
    ///
    /// See [`Storefront::visit`].
    pub async fn start(&mut self) -> Result<Visit, StorefrontError> {
        tokio::time::sleep(self.config.restore_delay).await;

        self.auth.restore().await;

        let path = self.navigator.current_path().to_string();

        self.visit(&path)
    }

    /// Arrive at `path`, applying the route guard.
    ///
    /// # Errors
    ///
    /// Only fails if auth completion at the login destination fails.
    pub fn visit(&mut self, path: &str) -> Result<Visit, StorefrontError> {
        match guard_route(path, self.auth.status()) {
            RouteDecision::Defer => {
                self.go_to(path);

                Ok(Visit::Deferred)
            }
            RouteDecision::RedirectToLogin(handoff) => {
                info!(to = path, "protected route needs sign-in");

                self.navigator.navigate_to(LOGIN_PATH, Some(handoff));

                Ok(Visit::RedirectedToLogin)
            }
            RouteDecision::Render => {
                self.go_to(path);

                if path == LOGIN_PATH && self.auth.is_authenticated() {
                    return Ok(Visit::Completed(self.complete_authentication()?));
                }

                Ok(Visit::Rendered)
            }
        }
    }

    /// Submit the login form and, once signed in, run auth completion.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Login`] with a user-facing message when the
    /// form is invalid, the credentials are wrong or storage fails.
    pub async fn sign_in(&mut self, form: &LoginForm) -> Result<AuthCompletion, StorefrontError> {
        self.auth
            .sign_in(form, &self.account, self.config.sign_in_latency)
            .await?;

        Ok(self.complete_authentication()?)
    }

    /// Sign out. The cart is left alone.
    pub async fn logout(&mut self) {
        self.auth.logout().await;
    }

    /// Put one seat of `course` in the cart.
    pub fn add_to_cart(&mut self, course: Course) -> bool {
        self.cart.add_item(course)
    }

    /// Show or hide the cart.
    pub fn set_cart_open(&mut self, open: bool) {
        self.cart.set_open(open);
    }

    /// Click the checkout control.
    ///
    /// # Errors
    ///
    /// See [`CheckoutCoordinator::attempt`].
    pub fn attempt_checkout(&mut self) -> Result<CheckoutAttempt, CheckoutRejection> {
        self.checkout
            .attempt(self.auth.status(), &mut self.cart, &mut self.navigator)
    }

    /// Submit the purchase that [`Storefront::attempt_checkout`] started.
    ///
    /// # Errors
    ///
    /// See [`CheckoutCoordinator::process`].
    pub async fn process_checkout(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<PurchaseConfirmation, CheckoutError> {
        self.checkout
            .process(self.auth.status(), &mut self.cart, &self.gateway, cancel)
            .await
    }

    /// Dismiss the success message now.
    ///
    /// # Errors
    ///
    /// See [`CheckoutCoordinator::acknowledge`].
    pub fn acknowledge_purchase(&mut self) -> Result<(), CheckoutError> {
        self.checkout.acknowledge(&mut self.cart, &mut self.navigator)
    }

    /// Dismiss the success message after the configured delay.
    ///
    /// # Errors
    ///
    /// See [`CheckoutCoordinator::acknowledge_after`].
    pub async fn finish_after_delay(&mut self) -> Result<(), CheckoutError> {
        self.checkout
            .acknowledge_after(
                self.config.confirmation_delay,
                &mut self.cart,
                &mut self.navigator,
            )
            .await
    }

    /// Attempt, process and acknowledge a checkout in one go.
    ///
    /// # Errors
    ///
    /// Returns the rejection or failure of whichever step stopped the flow.
    pub async fn checkout(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        if self.attempt_checkout()? == CheckoutAttempt::RedirectedToLogin {
            return Ok(CheckoutOutcome::RedirectedToLogin);
        }

        let confirmation = self.process_checkout(cancel).await?;

        self.finish_after_delay().await?;

        Ok(CheckoutOutcome::Purchased(confirmation))
    }

    /// Cart badge count.
    pub fn badge_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Header links for the current auth state.
    pub fn header_links(&self) -> Vec<NavLink> {
        header_links(self.auth.status())
    }

    /// Auth state.
    pub fn auth_status(&self) -> &AuthStatus {
        self.auth.status()
    }

    /// Signed-in identity.
    pub fn identity(&self) -> Option<&Identity> {
        self.auth.identity()
    }

    /// Cart and purchase history.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart access, e.g. for quantity edits.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Checkout state.
    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Whether the checkout control is enabled.
    pub fn can_checkout(&self) -> bool {
        self.checkout.can_checkout(self.auth.status(), &self.cart)
    }

    /// Navigation.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Session storage behind auth.
    pub fn store(&self) -> &S {
        self.auth.store()
    }

    fn go_to(&mut self, path: &str) {
        if self.navigator.current_path() == path {
            debug!(path, "already here");
        } else {
            self.navigator.navigate_to(path, None);
        }
    }

    fn complete_authentication(&mut self) -> Result<AuthCompletion, CheckoutError> {
        self.checkout
            .complete_authentication(self.auth.status(), &mut self.cart, &mut self.navigator)
    }
}
