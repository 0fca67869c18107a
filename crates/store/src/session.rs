//! The session store and authorization gate.
//!
//! [`SessionStore`] is the sole owner of session state. It writes the
//! durable store and the cookie mirror together through one
//! `set_session`/`clear_session` pair so no call site can ever update
//! one without the other (the duplicated-write bug class this design
//! exists to prevent).
//!
//! Error policy on reads: malformed persisted data degrades to "no
//! session" / "no roles" rather than surfacing an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockdeck_core::roles::has_admin;
use stockdeck_core::user::UserProfile;

use crate::cookies::CookieJar;
use crate::kv::{KeyValueStore, StoreError};

/// Durable store key holding the opaque bearer token.
pub const KEY_TOKEN: &str = "token";
/// Durable store key holding the JSON array of role strings.
pub const KEY_USER_ROLES: &str = "userRoles";
/// Durable store key holding the JSON user profile record.
pub const KEY_USER_DATA: &str = "userData";
/// Durable store key bridging signup data to the login screen.
pub const KEY_TEMP_USER_DATA: &str = "tempUserData";

/// Cookie mirror key for the token.
pub const COOKIE_TOKEN: &str = "token";
/// Cookie mirror key for the role list.
pub const COOKIE_USER_ROLES: &str = "userRoles";

/// Transient record bridging a successful signup to the login screen,
/// so the form can be pre-filled. Consumed (removed) on first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSignup {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Client-held proof of authentication: opaque token, cached roles and
/// profile, mirrored into the cookie jar for the edge guard.
#[derive(Clone)]
pub struct SessionStore {
    durable: Arc<dyn KeyValueStore>,
    cookies: CookieJar,
}

impl SessionStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, cookies: CookieJar) -> Self {
        Self { durable, cookies }
    }

    /// The cookie mirror, for the edge guard (which must not read the
    /// durable store).
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Populate the session from a successful authentication response.
    ///
    /// All fields are written in one call, to both stores. If a write
    /// fails partway the session is cleared again so consumers never
    /// observe a half-populated session.
    pub fn set_session(
        &self,
        token: &str,
        roles: &[String],
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        let result = self.write_session(token, roles, profile);
        if result.is_err() {
            if let Err(e) = self.clear_session() {
                tracing::error!(error = %e, "Failed to roll back partial session write");
            }
        }
        result
    }

    fn write_session(
        &self,
        token: &str,
        roles: &[String],
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        let roles_json = serde_json::to_string(roles)?;
        let profile_json = serde_json::to_string(profile)?;

        self.durable.set(KEY_TOKEN, token)?;
        self.durable.set(KEY_USER_ROLES, &roles_json)?;
        self.durable.set(KEY_USER_DATA, &profile_json)?;

        self.cookies.set(COOKIE_TOKEN, token)?;
        self.cookies.set(COOKIE_USER_ROLES, &roles_json)?;

        tracing::debug!(user_id = profile.id, "Session populated");
        Ok(())
    }

    /// Destroy the session: token, roles, profile, and the cookie
    /// mirror. Idempotent -- clearing an empty session is a no-op.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.durable.remove(KEY_TOKEN)?;
        self.durable.remove(KEY_USER_ROLES)?;
        self.durable.remove(KEY_USER_DATA)?;

        self.cookies.remove(COOKIE_TOKEN)?;
        self.cookies.remove(COOKIE_USER_ROLES)?;

        tracing::debug!("Session cleared");
        Ok(())
    }

    /// The bearer token, if a session exists. An empty stored token
    /// counts as absent.
    pub fn get_token(&self) -> Option<String> {
        self.durable.get(KEY_TOKEN).filter(|t| !t.is_empty())
    }

    /// Cached role strings. Empty when unauthenticated or when the
    /// stored list is malformed -- stale roles without a token are
    /// never surfaced.
    pub fn get_roles(&self) -> Vec<String> {
        if self.get_token().is_none() {
            return Vec::new();
        }
        let raw = match self.durable.get(KEY_USER_ROLES) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed stored roles; treating as none");
                Vec::new()
            }
        }
    }

    /// Cached user profile. `None` when unauthenticated or malformed.
    pub fn get_user_profile(&self) -> Option<UserProfile> {
        self.get_token()?;
        let raw = self.durable.get(KEY_USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed stored user profile; treating as absent");
                None
            }
        }
    }

    /// Authorization gate: true iff a non-empty token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Authorization gate: true iff the cached roles contain `ADMIN`.
    pub fn is_admin(&self) -> bool {
        has_admin(&self.get_roles())
    }

    /// Stash signup data for the login screen to pre-fill.
    pub fn stash_pending_signup(&self, pending: &PendingSignup) -> Result<(), StoreError> {
        let json = serde_json::to_string(pending)?;
        self.durable.set(KEY_TEMP_USER_DATA, &json)
    }

    /// Take (and remove) any stashed signup data. Malformed data is
    /// discarded silently apart from a diagnostic.
    pub fn take_pending_signup(&self) -> Result<Option<PendingSignup>, StoreError> {
        let raw = match self.durable.get(KEY_TEMP_USER_DATA) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        self.durable.remove(KEY_TEMP_USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(pending) => Ok(Some(pending)),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed pending signup data; discarding");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;

    fn store() -> SessionStore {
        let durable: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cookie_backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        SessionStore::new(durable, CookieJar::new(cookie_backend))
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn set_session_populates_both_stores() {
        let s = store();
        s.set_session("tok-1", &["ADMIN".to_string()], &profile())
            .unwrap();

        assert_eq!(s.get_token().as_deref(), Some("tok-1"));
        assert_eq!(s.get_roles(), vec!["ADMIN".to_string()]);
        assert_eq!(s.get_user_profile().unwrap().email, "ada@example.com");
        // Cookie mirror is written in the same call.
        assert_eq!(s.cookies().get(COOKIE_TOKEN).as_deref(), Some("tok-1"));
        assert!(s.cookies().get(COOKIE_USER_ROLES).is_some());
    }

    #[test]
    fn clear_session_empties_everything_including_cookies() {
        let s = store();
        s.set_session("tok-1", &["USER".to_string()], &profile())
            .unwrap();
        s.clear_session().unwrap();

        assert_eq!(s.get_token(), None);
        assert!(s.get_roles().is_empty());
        assert_eq!(s.get_user_profile(), None);
        assert_eq!(s.cookies().get(COOKIE_TOKEN), None);
        assert_eq!(s.cookies().get(COOKIE_USER_ROLES), None);
    }

    #[test]
    fn clear_session_is_idempotent() {
        let s = store();
        s.clear_session().unwrap();
        s.clear_session().unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn stale_roles_without_token_are_ignored() {
        let s = store();
        s.set_session("tok-1", &["ADMIN".to_string()], &profile())
            .unwrap();
        // Simulate divergent storage: token gone, roles left behind.
        s.durable.remove(KEY_TOKEN).unwrap();

        assert!(!s.is_authenticated());
        assert!(s.get_roles().is_empty());
        assert_eq!(s.get_user_profile(), None);
        assert!(!s.is_admin());
    }

    #[test]
    fn malformed_roles_degrade_to_empty() {
        let s = store();
        s.durable.set(KEY_TOKEN, "tok-1").unwrap();
        s.durable.set(KEY_USER_ROLES, "{corrupt").unwrap();

        assert!(s.is_authenticated());
        assert!(s.get_roles().is_empty());
        assert!(!s.is_admin());
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        let s = store();
        s.durable.set(KEY_TOKEN, "").unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn is_admin_reflects_role_membership_regardless_of_order() {
        let s = store();
        s.set_session(
            "tok-1",
            &["USER".to_string(), "ADMIN".to_string()],
            &profile(),
        )
        .unwrap();
        assert!(s.is_admin());

        s.set_session("tok-2", &["USER".to_string()], &profile())
            .unwrap();
        assert!(!s.is_admin());
    }

    #[test]
    fn pending_signup_round_trip_consumes_the_stash() {
        let s = store();
        let pending = PendingSignup {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        s.stash_pending_signup(&pending).unwrap();

        assert_eq!(s.take_pending_signup().unwrap(), Some(pending));
        // Second take finds nothing.
        assert_eq!(s.take_pending_signup().unwrap(), None);
    }
}
