//! API error type and the backend-message translation layer.

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body, verbatim.
        message: String,
    },
}

/// Convenience alias for client call results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// True for 401/403-shaped rejections.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status == 401 || *status == 403)
    }

    /// The message to show the user: transport failures get a generic
    /// wording, backend rejections pass through the translation below.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Request(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Api { status, message } => translate_backend_message(*status, message),
        }
    }
}

/// Rewrite known raw backend messages into friendlier wording.
///
/// This is the only place in the codebase that depends on backend
/// message wording. The backend is external, so a structured error-code
/// contract is not available; keep every string match confined here.
pub fn translate_backend_message(status: u16, message: &str) -> String {
    let lower = message.to_lowercase();

    // Inventory capacity rejection: the backend phrases this in terms of
    // its internal totals; users get the dashboard wording instead.
    if status == 400 && lower.contains("capacity") && lower.contains("total quantity") {
        return "Inventory capacity cannot be lower than the total quantity of products it currently holds.".to_string();
    }

    message.to_string()
}
