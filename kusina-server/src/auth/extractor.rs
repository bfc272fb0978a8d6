//! Identity Extractor
//!
//! Custom extractor pulling the caller's identity from gateway-injected
//! headers. Requests without an identity are rejected before the handler
//! runs.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::utils::AppError;

pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity of the calling client
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let Some(email) = header(USER_EMAIL_HEADER) else {
            tracing::warn!(uri = %parts.uri, "Request without identity header");
            return Err(AppError::unauthorized());
        };

        Ok(CurrentUser {
            email,
            name: header(USER_NAME_HEADER).unwrap_or_else(|| "User".to_string()),
            role: header(USER_ROLE_HEADER).unwrap_or_else(|| "user".to_string()),
        })
    }
}
