//! Admin authentication endpoints.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use super::ApiResponse;
use crate::auth::{constant_time_compare, removal_cookie, session_cookie, SESSION_COOKIE};
use crate::errors::AppError;
use crate::models::{LoginRequest, SessionStatus};
use crate::AppState;

/// POST /api/auth/login - Exchange the admin password for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    if !constant_time_compare(&request.password, &state.config.admin_password) {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.sessions.issue();
    let jar = jar.add(session_cookie(token, state.config.secure_cookies));
    Ok((jar, ApiResponse::ok()))
}

/// POST /api/auth/logout - Clear the session cookie.
///
/// The token itself stays valid until its window ends; there is no
/// server-side revocation.
pub async fn logout(jar: CookieJar) -> (CookieJar, ApiResponse<()>) {
    (jar.remove(removal_cookie()), ApiResponse::ok())
}

/// GET /api/auth/session - Report whether the request carries a valid
/// session, so the admin panel can decide between login form and editor.
pub async fn session_status(State(state): State<AppState>, jar: CookieJar) -> Json<SessionStatus> {
    let authenticated = jar
        .get(SESSION_COOKIE)
        .map(|cookie| state.sessions.verify(cookie.value()))
        .unwrap_or(false);

    Json(SessionStatus {
        success: true,
        authenticated,
    })
}
