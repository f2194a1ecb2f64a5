use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::model::user::User;

/// Authenticated identity: the bearer token handed out at login and the
/// profile of the user it belongs to, once known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Valid,
    Expired,
    Malformed,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    /// Decodes the payload segment of the JWT without verifying it; the
    /// backend remains the authority on signatures.
    pub fn claims(&self) -> Option<TokenClaims> {
        let mut parts = self.token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// `now` is a unix timestamp in seconds.
    pub fn token_state(&self, now: i64) -> TokenState {
        match self.claims() {
            None => TokenState::Malformed,
            Some(TokenClaims { exp: Some(exp), .. }) if exp <= now => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }
}
