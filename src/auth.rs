//! Session gateway: resolves the role of a connection from HTTP Basic credentials
//!
//! Admin access requires credentials matching `ADMIN_USERNAME` / `ADMIN_PASSWORD`.
//! Every failure path resolves to `participant`, so reading always works and
//! privileges are never granted by accident.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::convert::Infallible;
use std::sync::Arc;

use crate::state::AppState;
use crate::types::{Role, Session};

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Admin username (None = nobody can become admin)
    pub username: Option<String>,
    /// Admin password
    pub password: Option<String>,
}

impl AuthConfig {
    /// Admin credentials from `ADMIN_USERNAME` / `ADMIN_PASSWORD`.
    /// A half-configured pair disables admin access entirely.
    pub fn from_env() -> Self {
        match (credential_var("ADMIN_USERNAME"), credential_var("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => {
                tracing::info!(admin_user = %username, "Admin role enabled");
                Self::new(username, password)
            }
            (None, None) => {
                tracing::warn!("No admin credentials set, nobody can spin or reset");
                Self::disabled()
            }
            (username, _) => {
                tracing::warn!(
                    has_username = username.is_some(),
                    "Admin credentials incomplete, admin role disabled"
                );
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            username: None,
            password: None,
        }
    }

    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Check if admin access is possible at all
    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Validate credentials. Always false when disabled.
    pub fn validate(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => {
                // Both halves are always compared
                let user_ok = constant_time_eq(u.as_bytes(), username.as_bytes());
                let pass_ok = constant_time_eq(p.as_bytes(), password.as_bytes());
                user_ok & pass_ok
            }
            _ => false,
        }
    }
}

fn credential_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Compares every byte regardless of where the first mismatch is
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

/// Extract `(username, password)` from an `Authorization: Basic ...` header
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Map request credentials to a role, defaulting to participant
pub fn resolve_role(headers: &HeaderMap, config: &AuthConfig) -> Role {
    if !config.is_enabled() {
        return Role::Participant;
    }

    match basic_credentials(headers) {
        Some((username, password)) if config.validate(&username, &password) => Role::Admin,
        Some((username, _)) => {
            tracing::warn!("Rejected admin credentials for user {:?}", username);
            Role::Participant
        }
        None => Role::Participant,
    }
}

/// Per-request session for plain HTTP routes
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let role = resolve_role(&parts.headers, &state.auth);
        Ok(Session::new(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn basic_header(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode(format!("{}:{}", user, pass));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_auth_config_disabled_when_incomplete() {
        let config = AuthConfig::disabled();
        assert!(!config.is_enabled());
        assert!(!config.validate("any", "thing"));

        let config = AuthConfig {
            username: Some("user".to_string()),
            password: None,
        };
        assert!(!config.is_enabled());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_requires_both_credentials() {
        std::env::set_var("ADMIN_USERNAME", " admin ");
        std::env::remove_var("ADMIN_PASSWORD");
        assert!(!AuthConfig::from_env().is_enabled());

        std::env::set_var("ADMIN_PASSWORD", "secret");
        let config = AuthConfig::from_env();
        assert!(config.validate("admin", "secret"));

        std::env::set_var("ADMIN_PASSWORD", "   ");
        assert!(!AuthConfig::from_env().is_enabled());

        std::env::remove_var("ADMIN_USERNAME");
        std::env::remove_var("ADMIN_PASSWORD");
    }

    #[test]
    fn test_auth_config_enabled() {
        let config = AuthConfig::new("admin", "secret");
        assert!(config.is_enabled());
        assert!(config.validate("admin", "secret"));
        assert!(!config.validate("admin", "wrong"));
        assert!(!config.validate("wrong", "secret"));
        assert!(!config.validate("", ""));
    }

    #[test]
    fn test_resolve_role_with_valid_credentials() {
        let config = AuthConfig::new("admin", "secret");
        assert_eq!(
            resolve_role(&basic_header("admin", "secret"), &config),
            Role::Admin
        );
    }

    #[test]
    fn test_resolve_role_defaults_to_participant() {
        let config = AuthConfig::new("admin", "secret");

        assert_eq!(resolve_role(&HeaderMap::new(), &config), Role::Participant);
        assert_eq!(
            resolve_role(&basic_header("admin", "nope"), &config),
            Role::Participant
        );

        let mut garbage = HeaderMap::new();
        garbage.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic !!!not-base64!!!"),
        );
        assert_eq!(resolve_role(&garbage, &config), Role::Participant);

        let mut bearer = HeaderMap::new();
        bearer.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(resolve_role(&bearer, &config), Role::Participant);
    }

    #[test]
    fn test_resolve_role_when_auth_disabled() {
        let config = AuthConfig::disabled();
        assert_eq!(
            resolve_role(&basic_header("admin", "secret"), &config),
            Role::Participant
        );
    }

    #[test]
    fn test_basic_credentials_password_may_contain_colon() {
        let (user, pass) = basic_credentials(&basic_header("admin", "se:cret")).unwrap();
        assert_eq!(user, "admin");
        assert_eq!(pass, "se:cret");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
