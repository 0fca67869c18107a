//! Integration tests for the on-disk session store.
//!
//! Exercises the full durable-store + cookie-mirror pairing through
//! `FileStore`, including reload-after-restart and corruption recovery.

use std::sync::Arc;

use chrono::Utc;
use stockdeck_core::user::UserProfile;
use stockdeck_store::{CookieJar, FileStore, KeyValueStore, SessionStore};

fn profile() -> UserProfile {
    UserProfile {
        id: 42,
        email: "grace@example.com".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        created_at: Utc::now(),
    }
}

/// A session written before "restart" is fully readable after reopening
/// both backing files, and clearing afterwards empties both.
#[test]
fn session_survives_restart_and_clears_completely() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    let cookie_path = dir.path().join("cookies.json");

    {
        let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&state_path));
        let cookies = CookieJar::new(Arc::new(FileStore::open(&cookie_path)));
        let session = SessionStore::new(durable, cookies);
        session
            .set_session("persisted-token", &["ADMIN".to_string()], &profile())
            .unwrap();
    }

    // Reopen from disk, as a fresh process would.
    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&state_path));
    let cookies = CookieJar::new(Arc::new(FileStore::open(&cookie_path)));
    let session = SessionStore::new(durable, cookies);

    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert_eq!(session.get_token().as_deref(), Some("persisted-token"));
    assert_eq!(session.get_user_profile().unwrap().id, 42);
    assert_eq!(
        session.cookies().get("token").as_deref(),
        Some("persisted-token")
    );

    session.clear_session().unwrap();
    assert!(!session.is_authenticated());
    assert!(session.get_roles().is_empty());
    assert_eq!(session.cookies().get("token"), None);
}

/// A corrupt state file must degrade to "no session", never crash, and
/// the store must accept a fresh session afterwards.
#[test]
fn corrupt_state_file_degrades_to_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(&state_path, "\0\0 definitely not json").unwrap();

    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&state_path));
    let cookies = CookieJar::new(Arc::new(FileStore::open(dir.path().join("cookies.json"))));
    let session = SessionStore::new(durable, cookies);

    assert!(!session.is_authenticated());
    assert!(session.get_roles().is_empty());
    assert_eq!(session.get_user_profile(), None);

    session
        .set_session("recovered", &["USER".to_string()], &profile())
        .unwrap();
    assert!(session.is_authenticated());
    assert!(!session.is_admin());
}
