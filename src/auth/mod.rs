//! Admin session authentication.
//!
//! Sessions are stateless: a token is `"<issued_ms>.<hmac>"`, signed with a
//! server-held secret and carried in an HTTP-only cookie. There is no
//! server-side session table and no revocation list; logout only clears the
//! client cookie, and a leaked token stays valid until its 24h window ends.
//! Constant-time comparison is used for both the password check and the MAC
//! check to mitigate timing attacks.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::AppState;

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "skeramos_session";

/// Session lifetime. The token TTL and the cookie max-age must agree.
pub const SESSION_TTL_HOURS: i64 = 24;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies signed, time-limited session tokens.
pub struct SessionCodec {
    secret: String,
}

impl SessionCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Produce a token bound to the current instant.
    pub fn issue(&self) -> String {
        let timestamp = Utc::now().timestamp_millis().to_string();
        let mac = self.sign(&timestamp);
        format!("{}.{}", timestamp, mac)
    }

    /// Check a token: two dot-separated parts, a matching MAC, and an age
    /// under the TTL. Malformed input returns false, never panics.
    pub fn verify(&self, token: &str) -> bool {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 2 {
            return false;
        }
        let Ok(timestamp) = parts[0].parse::<i64>() else {
            return false;
        };
        if !constant_time_compare(parts[1], &self.sign(parts[0])) {
            return false;
        }
        Utc::now().timestamp_millis() - timestamp < SESSION_TTL_HOURS * 3_600_000
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::hours(SESSION_TTL_HOURS))
        .build()
}

/// Build the expired cookie that clears the session on logout.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Extractor proving the request carries a valid session cookie.
///
/// Mutating and admin-only handlers take this as an argument; requests
/// without a verifiable token are rejected with the 401 error envelope.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(SESSION_COOKIE) {
            Some(cookie) if state.sessions.verify(cookie.value()) => Ok(AdminSession),
            _ => Err(AppError::Unauthorized(
                "Missing or invalid session token".to_string(),
            )),
        }
    }
}
