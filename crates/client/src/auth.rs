//! Authentication endpoints: login and register.

use serde::{Deserialize, Deserializer, Serialize};
use stockdeck_core::user::UserProfile;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Successful authentication response.
///
/// The backend serves `roles` either as a single string or as an array;
/// both normalize to a `Vec<String>` here so the session store only
/// ever sees a list.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(deserialize_with = "string_or_seq")]
    pub roles: Vec<String>,
    pub user: UserProfile,
}

/// Accept `"ADMIN"` and `["ADMIN"]` interchangeably on the wire.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => vec![role],
        OneOrMany::Many(roles) => roles,
    })
}

impl ApiClient {
    /// `POST /api/auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post_json("auth/login", request).await
    }

    /// `POST /api/auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<UserProfile> {
        self.post_json("auth/register", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "id": 1,
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "createdAt": "2026-01-15T09:30:00Z"
    }"#;

    #[test]
    fn roles_as_array_deserializes() {
        let json = format!(
            r#"{{"token":"tok","roles":["ADMIN","USER"],"user":{USER_JSON}}}"#
        );
        let parsed: AuthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.roles, vec!["ADMIN".to_string(), "USER".to_string()]);
    }

    #[test]
    fn roles_as_single_string_normalizes_to_vec() {
        let json = format!(r#"{{"token":"tok","roles":"ADMIN","user":{USER_JSON}}}"#);
        let parsed: AuthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.roles, vec!["ADMIN".to_string()]);
        assert_eq!(parsed.user.first_name, "Ada");
    }
}
