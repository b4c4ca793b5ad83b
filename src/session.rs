// src/session.rs
//! Authenticated session: the access token issued at login and what the
//! client can read from it without contacting the server

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::types::user::{AuthResponse, User};

#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: Option<String>,
    email: Option<String>,
    exp: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: Option<User>,
    subject: Option<String>,
    email: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();
        let claims = read_claims(&access_token);

        Self {
            subject: claims.as_ref().and_then(|c| c.sub.clone()),
            email: claims.as_ref().and_then(|c| c.email.clone()),
            expires_at: claims
                .as_ref()
                .and_then(|c| c.exp)
                .and_then(|exp| Utc.timestamp_opt(exp, 0).single()),
            access_token,
            user: None,
        }
    }

    pub fn from_auth(auth: AuthResponse) -> Self {
        let mut session = Self::new(auth.access_token);
        session.user = auth.user;
        session
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Tokens without a readable `exp` claim are treated as not expired;
    /// the server stays the authority and answers 401 when they are.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .or(self.subject.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.email.as_str())
            .or(self.email.as_deref())
    }
}

/// Decode the JWT payload without verifying its signature. The client has
/// no key material; it only needs the claims for display and expiry hints.
fn read_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("Access token claims not readable: {}", e);
            None
        }
    }
}
