//! Route guard runtimes.
//!
//! The pure decision tables live in `stockdeck_core::routes`; this
//! module applies them against live session state. The edge check runs
//! per navigation against the cookie mirror only; the layout check runs
//! after the durable store is readable, with a short hydration delay
//! before the first evaluation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use stockdeck_core::routes::{
    edge_decision, layout_decision, EdgeDecision, GuardedSubtree, LayoutDecision, LOGIN_PATH,
};
use stockdeck_store::session::COOKIE_TOKEN;
use stockdeck_store::SessionStore;

/// States of the layout guard. `Checking` is what a subtree renders as
/// a placeholder until the check resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized,
    /// Redirect to the given path; render a neutral placeholder until
    /// the navigation happens.
    Denied { redirect_to: &'static str },
}

/// Run the edge-phase check for a navigation to `path`.
///
/// Reads only the cookie mirror; the durable store is off limits in
/// this phase and the token is never decoded.
pub fn edge_check(session: &SessionStore, path: &str) -> EdgeDecision {
    let cookie_token = session.cookies().get(COOKIE_TOKEN);
    edge_decision(path, cookie_token.as_deref())
}

/// Client-phase guard for a protected subtree.
pub struct LayoutGuard {
    session: Arc<SessionStore>,
    hydration_delay: Duration,
}

impl LayoutGuard {
    pub fn new(session: Arc<SessionStore>, hydration_delay: Duration) -> Self {
        Self {
            session,
            hydration_delay,
        }
    }

    /// Resolve the guard for `subtree`: wait out the hydration window,
    /// then evaluate the session. The delay never skips the check.
    ///
    /// Fails closed: any panic while reading session state resolves to
    /// a redirect to the login page.
    pub async fn check(&self, subtree: GuardedSubtree) -> GuardState {
        if !self.hydration_delay.is_zero() {
            tokio::time::sleep(self.hydration_delay).await;
        }
        self.evaluate(subtree)
    }

    /// Synchronous evaluation against current session state.
    pub fn evaluate(&self, subtree: GuardedSubtree) -> GuardState {
        let session = self.session.clone();
        let decision = catch_unwind(AssertUnwindSafe(move || {
            let authenticated = session.is_authenticated();
            let roles = session.get_roles();
            layout_decision(subtree, authenticated, &roles)
        }));

        match decision {
            Ok(LayoutDecision::Authorized) => GuardState::Authorized,
            Ok(LayoutDecision::Redirect(path)) => GuardState::Denied { redirect_to: path },
            Err(_) => {
                tracing::error!("Session state unreadable during guard check; denying");
                GuardState::Denied {
                    redirect_to: LOGIN_PATH,
                }
            }
        }
    }
}
