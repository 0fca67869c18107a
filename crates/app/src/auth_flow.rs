//! Login, signup, and logout flows.
//!
//! Every failure path here ends in a user notification; errors never
//! propagate past the flow. The session is only ever populated through
//! `set_session`, so a failed login can never leave a partial session
//! behind.

use std::sync::Arc;

use stockdeck_client::auth::{LoginRequest, RegisterRequest};
use stockdeck_client::ApiClient;
use stockdeck_notify::NotificationHub;
use stockdeck_store::{PendingSignup, SessionStore};

/// Orchestrates authentication against the backend and the session
/// store.
pub struct AuthFlow {
    client: ApiClient,
    session: Arc<SessionStore>,
    hub: Arc<NotificationHub>,
}

impl AuthFlow {
    pub fn new(client: ApiClient, session: Arc<SessionStore>, hub: Arc<NotificationHub>) -> Self {
        Self {
            client,
            session,
            hub,
        }
    }

    /// Sign in. Returns true when a session was established.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        // Client-side validation: no network call for an empty form.
        if email.trim().is_empty() || password.is_empty() {
            self.hub.error("Email and password are required");
            return false;
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = match self.client.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                // Authorization failures included: the session is not
                // created on any error path.
                self.hub.error(e.user_message());
                return false;
            }
        };

        if let Err(e) = self
            .session
            .set_session(&response.token, &response.roles, &response.user)
        {
            tracing::error!(error = %e, "Failed to persist session after login");
            self.hub.error("Could not save your session. Please try again.");
            return false;
        }

        tracing::info!(user_id = response.user.id, "Signed in");
        self.hub
            .success(format!("Welcome back, {}", response.user.first_name));
        true
    }

    /// Register a new account. On success the signup data is stashed so
    /// the login screen can pre-fill, and the user is sent there.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> bool {
        if email.trim().is_empty()
            || password.is_empty()
            || first_name.trim().is_empty()
            || last_name.trim().is_empty()
        {
            self.hub.error("All fields are required");
            return false;
        }

        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        };

        match self.client.register(&request).await {
            Ok(user) => {
                let pending = PendingSignup {
                    email: user.email.clone(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                };
                if let Err(e) = self.session.stash_pending_signup(&pending) {
                    // Pre-fill is a convenience; losing it is not a failure.
                    tracing::warn!(error = %e, "Failed to stash signup data");
                }
                self.hub.success("Account created. Please sign in.");
                true
            }
            Err(e) => {
                self.hub.error(e.user_message());
                false
            }
        }
    }

    /// Sign out: clear the session and the cookie mirror. Idempotent.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear_session() {
            tracing::error!(error = %e, "Failed to clear session on logout");
        }
        self.hub.info("Signed out");
    }
}
