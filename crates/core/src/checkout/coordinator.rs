//! Checkout coordinator.
//!
//! Drives `Idle → AwaitingAuth → Processing → Purchased → Idle`. Collaborators
//! are passed into each step, so the coordinator only owns the state itself.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    auth::AuthStatus,
    cart::{CartStore, LineItem},
    checkout::{
        AuthCompletion, CheckoutAttempt, CheckoutError, CheckoutRejection, CheckoutState,
        PendingCheckoutHandoff, PurchaseConfirmation, PurchaseGateway, PurchaseRequest,
    },
    navigation::{DASHBOARD_PATH, LOGIN_PATH, MY_LEARNING_PATH, Navigator},
};

/// Default time the success message stays up before the flow resets.
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// The checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutCoordinator {
    state: CheckoutState,
}

impl CheckoutCoordinator {
    /// Start idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Whether the checkout control should be enabled.
    pub fn can_checkout(&self, auth: &AuthStatus, cart: &CartStore) -> bool {
        matches!(
            self.state,
            CheckoutState::Idle | CheckoutState::AwaitingAuth
        ) && !cart.is_empty()
            && !matches!(auth, AuthStatus::Loading)
    }

    /// Handle a click on the checkout control.
    ///
    /// Signed-in users move straight to [`CheckoutState::Processing`]. Anonymous
    /// users have the cart closed and are sent to login with a
    /// [`PendingCheckoutHandoff`] holding the current path and cart lines; the cart
    /// itself is left as it is.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutRejection`] and leaves every collaborator untouched when
    /// the cart is empty, auth is still loading, or a purchase is already in flight.
    pub fn attempt<N>(
        &mut self,
        auth: &AuthStatus,
        cart: &mut CartStore,
        navigator: &mut N,
    ) -> Result<CheckoutAttempt, CheckoutRejection>
    where
        N: Navigator + ?Sized,
    {
        match self.state {
            CheckoutState::Processing => return Err(CheckoutRejection::AlreadyProcessing),
            CheckoutState::Purchased => return Err(CheckoutRejection::AwaitingAcknowledgement),
            CheckoutState::Idle | CheckoutState::AwaitingAuth => {}
        }

        if cart.is_empty() {
            return Err(CheckoutRejection::EmptyCart);
        }

        match auth {
            AuthStatus::Loading => Err(CheckoutRejection::AuthLoading),
            AuthStatus::Authenticated(_) => {
                self.transition(CheckoutState::Processing);

                Ok(CheckoutAttempt::Processing)
            }
            AuthStatus::Anonymous => {
                cart.set_open(false);

                let handoff = PendingCheckoutHandoff::new(navigator.current_path(), cart.snapshot());

                info!(
                    from = %handoff.from.pathname,
                    items = handoff.cart_items.len(),
                    "checkout needs sign-in, redirecting to login"
                );

                navigator.navigate_to(LOGIN_PATH, Some(handoff));

                self.transition(CheckoutState::AwaitingAuth);

                Ok(CheckoutAttempt::RedirectedToLogin)
            }
        }
    }

    /// Run at the login destination once the user is signed in.
    ///
    /// Consumes the handoff attached to the current navigation entry. Each saved
    /// course is re-added as a single seat first, then the user is returned to the handoff's origin, and only
    /// then is the cart opened.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotAuthenticated`] unless `auth` is signed in; the
    /// handoff is left unread in that case.
    pub fn complete_authentication<N>(
        &mut self,
        auth: &AuthStatus,
        cart: &mut CartStore,
        navigator: &mut N,
    ) -> Result<AuthCompletion, CheckoutError>
    where
        N: Navigator + ?Sized,
    {
        if !matches!(auth, AuthStatus::Authenticated(_)) {
            return Err(CheckoutError::NotAuthenticated);
        }

        let completion = match navigator.take_state() {
            Some(handoff) if handoff.has_cart_items() => {
                let restored = handoff.cart_items.len();

                for line in handoff.cart_items {
                    cart.add_item(line.course);
                }

                navigator.replace(&handoff.from.pathname);
                cart.set_open(true);

                info!(restored, to = %handoff.from.pathname, "restored cart after sign-in");

                AuthCompletion::CartRestored {
                    restored,
                    path: handoff.from.pathname,
                }
            }
            Some(handoff) => {
                navigator.replace(&handoff.from.pathname);

                AuthCompletion::Returned {
                    path: handoff.from.pathname,
                }
            }
            None => {
                navigator.replace(DASHBOARD_PATH);

                AuthCompletion::Dashboard
            }
        };

        if self.state == CheckoutState::AwaitingAuth {
            self.transition(CheckoutState::Idle);
        }

        Ok(completion)
    }

    /// Submit the cart to `gateway` and record the purchase when it is confirmed.
    ///
    /// On any failure the coordinator returns to [`CheckoutState::Idle`] with the
    /// cart untouched, so the user can simply try again.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidState`]: not in [`CheckoutState::Processing`].
    /// - [`CheckoutError::NotAuthenticated`]: no buyer identity.
    /// - [`CheckoutError::Price`]: the cart total overflowed.
    /// - [`CheckoutError::Gateway`]: the backend refused the purchase.
    /// - [`CheckoutError::Cancelled`]: `cancel` fired before the backend answered.
    pub async fn process<G>(
        &mut self,
        auth: &AuthStatus,
        cart: &mut CartStore,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<PurchaseConfirmation, CheckoutError>
    where
        G: PurchaseGateway + ?Sized,
    {
        self.expect_state(CheckoutState::Processing)?;

        match submit(auth, cart, gateway, cancel).await {
            Ok((confirmation, items)) => {
                cart.complete_purchase(&items, confirmation.confirmed_at);

                info!(items = items.len(), "purchase confirmed");

                self.transition(CheckoutState::Purchased);

                Ok(confirmation)
            }
            Err(error) => {
                warn!(%error, "checkout failed, cart preserved");

                self.transition(CheckoutState::Idle);

                Err(error)
            }
        }
    }

    /// Dismiss the success message: empty and close the cart and go to the
    /// learning history.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] unless in [`CheckoutState::Purchased`].
    pub fn acknowledge<N>(
        &mut self,
        cart: &mut CartStore,
        navigator: &mut N,
    ) -> Result<(), CheckoutError>
    where
        N: Navigator + ?Sized,
    {
        self.expect_state(CheckoutState::Purchased)?;

        cart.clear();
        cart.set_open(false);
        navigator.navigate_to(MY_LEARNING_PATH, None);

        self.transition(CheckoutState::Idle);

        Ok(())
    }

    /// Leave the success message up for `delay`, then [`CheckoutCoordinator::acknowledge`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] unless in [`CheckoutState::Purchased`].
    pub async fn acknowledge_after<N>(
        &mut self,
        delay: Duration,
        cart: &mut CartStore,
        navigator: &mut N,
    ) -> Result<(), CheckoutError>
    where
        N: Navigator + ?Sized,
    {
        self.expect_state(CheckoutState::Purchased)?;

        tokio::time::sleep(delay).await;

        self.acknowledge(cart, navigator)
    }

    fn expect_state(&self, expected: CheckoutState) -> Result<(), CheckoutError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    fn transition(&mut self, to: CheckoutState) {
        info!(from = %self.state, %to, "checkout transition");

        self.state = to;
    }
}

async fn submit<G>(
    auth: &AuthStatus,
    cart: &CartStore,
    gateway: &G,
    cancel: &CancellationToken,
) -> Result<(PurchaseConfirmation, Vec<LineItem>), CheckoutError>
where
    G: PurchaseGateway + ?Sized,
{
    let buyer = auth
        .identity()
        .ok_or(CheckoutError::NotAuthenticated)?
        .clone();

    let request = PurchaseRequest {
        buyer,
        total: cart.total_price()?,
        items: cart.snapshot(),
    };

    let result = tokio::select! {
        () = cancel.cancelled() => return Err(CheckoutError::Cancelled),
        result = gateway.submit(&request) => result,
    };

    let confirmation = result.map_err(CheckoutError::Gateway)?;

    Ok((confirmation, request.items))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::time::Instant;

    use crate::{
        auth::Identity,
        catalog::{Course, CourseId, PriceError},
        checkout::{GatewayError, MockPurchaseGateway, SimulatedGateway},
        learning::CourseStatus,
        navigation::{COURSES_PATH, MemoryNavigator},
    };

    use super::*;

    fn course(id: u32, price: &str) -> Result<Course, PriceError> {
        Ok(Course {
            id: CourseId(id),
            title: format!("Course {id}"),
            level: "Intermediate".to_string(),
            duration: "4 hours".to_string(),
            price: price.parse()?,
            category: None,
        })
    }

    fn signed_in() -> AuthStatus {
        AuthStatus::Authenticated(Identity::from_email("sam@example.com"))
    }

    fn cart_with(ids: &[u32]) -> Result<CartStore, PriceError> {
        let mut cart = CartStore::new();

        for id in ids {
            cart.add_item(course(*id, "$20.00")?);
        }

        cart.set_open(true);

        Ok(cart)
    }

    #[test]
    fn empty_cart_is_rejected_whether_signed_in_or_not() {
        for auth in [signed_in(), AuthStatus::Anonymous] {
            let mut coordinator = CheckoutCoordinator::new();
            let mut cart = CartStore::new();
            let mut navigator = MemoryNavigator::new(COURSES_PATH);

            let result = coordinator.attempt(&auth, &mut cart, &mut navigator);

            assert_eq!(result, Err(CheckoutRejection::EmptyCart));
            assert_eq!(coordinator.state(), CheckoutState::Idle);
            assert_eq!(navigator.current_path(), COURSES_PATH);
        }
    }

    #[test]
    fn loading_auth_is_rejected() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        let result = coordinator.attempt(&AuthStatus::Loading, &mut cart, &mut navigator);

        assert_eq!(result, Err(CheckoutRejection::AuthLoading));
        assert_eq!(coordinator.state(), CheckoutState::Idle);
        assert!(!coordinator.can_checkout(&AuthStatus::Loading, &cart));

        Ok(())
    }

    #[test]
    fn signed_in_attempt_enters_processing() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        let attempt = coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(attempt, CheckoutAttempt::Processing);
        assert_eq!(coordinator.state(), CheckoutState::Processing);
        assert!(cart.is_open());

        Ok(())
    }

    #[test]
    fn second_attempt_while_processing_is_ignored() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;

        let again = coordinator.attempt(&signed_in(), &mut cart, &mut navigator);

        assert_eq!(again, Err(CheckoutRejection::AlreadyProcessing));
        assert_eq!(coordinator.state(), CheckoutState::Processing);
        assert!(!coordinator.can_checkout(&signed_in(), &cart));

        Ok(())
    }

    #[test]
    fn anonymous_attempt_redirects_with_snapshot() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let before = cart.snapshot();

        let attempt = coordinator.attempt(&AuthStatus::Anonymous, &mut cart, &mut navigator)?;

        assert_eq!(attempt, CheckoutAttempt::RedirectedToLogin);
        assert_eq!(coordinator.state(), CheckoutState::AwaitingAuth);
        assert!(!cart.is_open());
        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(navigator.current_path(), LOGIN_PATH);

        let handoff = navigator.take_state().ok_or("no handoff attached")?;

        assert_eq!(handoff.from.pathname, COURSES_PATH);
        assert_eq!(handoff.cart_items, before);

        Ok(())
    }

    #[test]
    fn completion_restores_cart_then_returns_and_opens() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut source_cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        coordinator.attempt(&AuthStatus::Anonymous, &mut source_cart, &mut navigator)?;

        let mut cart = CartStore::new();

        let completion =
            coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(
            completion,
            AuthCompletion::CartRestored {
                restored: 2,
                path: COURSES_PATH.to_string(),
            }
        );

        let ids: Vec<CourseId> = cart.items().iter().map(LineItem::id).collect();

        assert_eq!(ids, vec![CourseId(1), CourseId(2)]);
        assert_eq!(navigator.current_path(), COURSES_PATH);
        assert!(cart.is_open());
        assert_eq!(coordinator.state(), CheckoutState::Idle);

        Ok(())
    }

    #[test]
    fn restoring_into_a_cart_that_already_has_the_items_is_idempotent() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        coordinator.attempt(&AuthStatus::Anonymous, &mut cart, &mut navigator)?;
        coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_item_count(), 2);

        Ok(())
    }

    #[test]
    fn restored_lines_start_at_one_seat() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        cart.set_quantity(CourseId(1), 3);
        coordinator.attempt(&AuthStatus::Anonymous, &mut cart, &mut navigator)?;

        let mut restored = CartStore::new();

        coordinator.complete_authentication(&signed_in(), &mut restored, &mut navigator)?;

        assert_eq!(restored.items().first().map(|line| line.quantity), Some(1));
        assert_eq!(restored.total_item_count(), 1);

        Ok(())
    }

    #[test]
    fn handoff_is_consumed_once() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        coordinator.attempt(&AuthStatus::Anonymous, &mut cart, &mut navigator)?;
        coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        let second =
            coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(second, AuthCompletion::Dashboard);

        Ok(())
    }

    #[test]
    fn completion_without_handoff_goes_to_dashboard() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = CartStore::new();
        let mut navigator = MemoryNavigator::new(LOGIN_PATH);

        let completion =
            coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(completion, AuthCompletion::Dashboard);
        assert_eq!(navigator.current_path(), DASHBOARD_PATH);
        assert!(!cart.is_open());

        Ok(())
    }

    #[test]
    fn completion_with_empty_handoff_returns_without_opening_cart() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = CartStore::new();
        let mut navigator = MemoryNavigator::default();

        navigator.navigate_to(
            LOGIN_PATH,
            Some(PendingCheckoutHandoff::return_to(MY_LEARNING_PATH)),
        );

        let completion =
            coordinator.complete_authentication(&signed_in(), &mut cart, &mut navigator)?;

        assert_eq!(
            completion,
            AuthCompletion::Returned {
                path: MY_LEARNING_PATH.to_string()
            }
        );
        assert!(!cart.is_open());

        Ok(())
    }

    #[test]
    fn completion_requires_sign_in_and_keeps_handoff() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        coordinator.attempt(&AuthStatus::Anonymous, &mut cart, &mut navigator)?;

        let result =
            coordinator.complete_authentication(&AuthStatus::Anonymous, &mut cart, &mut navigator);

        assert!(matches!(result, Err(CheckoutError::NotAuthenticated)));
        assert!(navigator.current().has_state());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn processing_records_purchase_after_delay() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let started = Instant::now();

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;
        coordinator
            .process(&signed_in(), &mut cart, &gateway, &CancellationToken::new())
            .await?;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(coordinator.state(), CheckoutState::Purchased);
        assert_eq!(cart.history().len(), 2);
        assert_eq!(cart.len(), 2, "cart is only cleared on acknowledgement");
        assert!(
            cart.history()
                .iter()
                .all(|purchase| purchase.status == CourseStatus::NotStarted
                    && purchase.progress == 0),
            "purchases start untouched"
        );

        Ok(())
    }

    #[tokio::test]
    async fn process_outside_processing_state_is_refused() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let gateway = MockPurchaseGateway::new();

        let result = coordinator
            .process(&signed_in(), &mut cart, &gateway, &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::InvalidState {
                expected: CheckoutState::Processing,
                actual: CheckoutState::Idle,
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn gateway_failure_returns_to_idle_with_cart_intact() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let mut gateway = MockPurchaseGateway::new();

        gateway
            .expect_submit()
            .times(1)
            .returning(|_| Err(GatewayError::Unavailable));

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;

        let result = coordinator
            .process(&signed_in(), &mut cart, &gateway, &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Gateway(GatewayError::Unavailable))
        ));
        assert_eq!(coordinator.state(), CheckoutState::Idle);
        assert_eq!(cart.len(), 2);
        assert!(cart.history().is_empty());
        assert!(coordinator.can_checkout(&signed_in(), &cart));

        Ok(())
    }

    #[tokio::test]
    async fn gateway_receives_buyer_items_and_total() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1, 2])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let mut gateway = MockPurchaseGateway::new();

        cart.set_quantity(CourseId(2), 3);

        gateway
            .expect_submit()
            .withf(|request| {
                request.buyer.email == "sam@example.com"
                    && request.items.len() == 2
                    && request.total.to_minor_units() == 80_00
            })
            .times(1)
            .returning(|_| {
                Ok(PurchaseConfirmation {
                    confirmed_at: jiff::Timestamp::UNIX_EPOCH,
                })
            });

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;
        coordinator
            .process(&signed_in(), &mut cart, &gateway, &CancellationToken::new())
            .await?;

        let purchase = cart.history().iter().next().ok_or("no purchase recorded")?;

        assert_eq!(purchase.purchase_date, jiff::Timestamp::UNIX_EPOCH);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_abandons_purchase_and_keeps_cart() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let gateway = SimulatedGateway::new(Duration::from_secs(60));
        let cancel = CancellationToken::new();

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;

        let trigger = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result = coordinator
            .process(&signed_in(), &mut cart, &gateway, &cancel)
            .await;

        assert!(matches!(result, Err(CheckoutError::Cancelled)));
        assert_eq!(coordinator.state(), CheckoutState::Idle);
        assert_eq!(cart.len(), 1);
        assert!(cart.history().is_empty());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn acknowledge_after_delay_clears_and_navigates() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);
        let gateway = SimulatedGateway::new(Duration::from_secs(2));

        coordinator.attempt(&signed_in(), &mut cart, &mut navigator)?;
        coordinator
            .process(&signed_in(), &mut cart, &gateway, &CancellationToken::new())
            .await?;

        let started = Instant::now();

        coordinator
            .acknowledge_after(DEFAULT_CONFIRMATION_DELAY, &mut cart, &mut navigator)
            .await?;

        assert!(started.elapsed() >= DEFAULT_CONFIRMATION_DELAY);
        assert_eq!(coordinator.state(), CheckoutState::Idle);
        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert_eq!(navigator.current_path(), MY_LEARNING_PATH);
        assert_eq!(cart.history().len(), 1);

        Ok(())
    }

    #[test]
    fn acknowledge_outside_purchased_is_refused() -> TestResult {
        let mut coordinator = CheckoutCoordinator::new();
        let mut cart = cart_with(&[1])?;
        let mut navigator = MemoryNavigator::new(COURSES_PATH);

        let result = coordinator.acknowledge(&mut cart, &mut navigator);

        assert!(matches!(
            result,
            Err(CheckoutError::InvalidState {
                expected: CheckoutState::Purchased,
                ..
            })
        ));
        assert_eq!(cart.len(), 1);

        Ok(())
    }
}
