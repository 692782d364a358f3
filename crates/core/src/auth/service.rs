//! Auth service.

use std::time::Duration;

use tracing::{info, warn};

use crate::{
    auth::{AuthServiceError, AuthStatus, DemoAccount, Identity, LoginError, LoginForm},
    session::SessionStore,
};

/// Session key holding the JSON-serialised [`Identity`].
pub const SESSION_KEY: &str = "orchid_user";

/// Owns the current identity and mirrors it into session storage.
#[derive(Debug)]
pub struct AuthService<S> {
    store: S,
    status: AuthStatus,
}

impl<S: SessionStore> AuthService<S> {
    /// Create the service in the [`AuthStatus::Loading`] state. Call
    /// [`AuthService::restore`] before trusting [`AuthService::is_authenticated`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            status: AuthStatus::Loading,
        }
    }

    /// Restore the identity saved in session storage.
    ///
    /// Unreadable or malformed data is discarded and the service becomes anonymous.
    pub async fn restore(&mut self) -> &AuthStatus {
        let status = match self.store.get(SESSION_KEY).await {
            Ok(None) => AuthStatus::Anonymous,
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    info!(email = %identity.email, "restored session identity");

                    AuthStatus::Authenticated(identity)
                }
                Err(error) => {
                    warn!(%error, "discarding malformed session identity");
                    self.discard_stored_identity().await;

                    AuthStatus::Anonymous
                }
            },
            Err(error) => {
                warn!(%error, "session storage unreadable, starting anonymous");
                self.discard_stored_identity().await;

                AuthStatus::Anonymous
            }
        };

        self.status = status;

        &self.status
    }

    /// Sign in, adopting `identity` when given or deriving one from `email`.
    ///
    /// The password is not checked here; [`AuthService::sign_in`] does that.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity cannot be serialised or stored. The current
    /// status is left untouched in that case.
    pub async fn login(
        &mut self,
        email: &str,
        _password: &str,
        identity: Option<Identity>,
    ) -> Result<Identity, AuthServiceError> {
        let identity = identity.unwrap_or_else(|| Identity::from_email(email));

        let serialized = serde_json::to_string(&identity).map_err(AuthServiceError::Serialize)?;

        self.store.set(SESSION_KEY, &serialized).await?;

        info!(email = %identity.email, "signed in");

        self.status = AuthStatus::Authenticated(identity.clone());

        Ok(identity)
    }

    /// Validate the login form, wait out `latency`, check it against `account` and
    /// sign in as that account.
    ///
    /// # Errors
    ///
    /// - [`LoginError::Validation`]: the form is incomplete or malformed.
    /// - [`LoginError::InvalidCredentials`]: the form does not match `account`.
    /// - [`LoginError::Auth`]: the identity could not be stored.
    pub async fn sign_in(
        &mut self,
        form: &LoginForm,
        account: &DemoAccount,
        latency: Duration,
    ) -> Result<Identity, LoginError> {
        form.validate()?;

        tokio::time::sleep(latency).await;

        if !account.matches(form) {
            warn!(email = %form.email, "rejected sign-in");

            return Err(LoginError::InvalidCredentials);
        }

        let identity = self
            .login(&form.email, form.password(), Some(account.identity().clone()))
            .await?;

        Ok(identity)
    }

    /// Forget the current identity. Safe to call when already signed out.
    pub async fn logout(&mut self) {
        self.status = AuthStatus::Anonymous;

        self.discard_stored_identity().await;

        info!("signed out");
    }

    /// Current authentication state.
    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    /// Whether the stored session has not been restored yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Loading)
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated(_))
    }

    /// The current identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        self.status.identity()
    }

    /// Underlying session storage.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn discard_stored_identity(&self) {
        if let Err(error) = self.store.remove(SESSION_KEY).await {
            warn!(%error, "failed to clear session identity");
        }
    }
}
