//! User profile snapshot cached in the session store.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Public profile of the signed-in user, as returned by the
/// authentication endpoints and cached client-side for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
}

impl UserProfile {
    /// Display name in "First Last" form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
