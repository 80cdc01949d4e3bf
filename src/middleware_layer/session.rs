use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::time::Duration;
use uuid::Uuid;

use crate::{models::session::SessionToken, state::AppState};

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionId";

/// Builds the session cookie for a token.
fn build_session_cookie(token: SessionToken, max_age_days: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());

    let is_production = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);
    if is_production {
        cookie.set_secure(true);
    }
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_days * 86400));
    cookie.set_path("/");

    cookie
}

/// Extracts the session token from the request cookies.
///
/// A malformed cookie value is treated as absent.
fn extract_session_token(cookies: &Cookies) -> Option<SessionToken> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .map(SessionToken)
}

/// A middleware that resolves the caller's session token.
///
/// Reuses the `sessionId` cookie when present; otherwise generates a
/// fresh token and adds the cookie to the outbound response. The
/// resolved token is inserted into request extensions. Always succeeds.
pub async fn resolve_session(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_session_token(&cookies) {
        Some(token) => token,
        None => {
            let token = SessionToken::generate();
            cookies.add(build_session_cookie(
                token,
                state.config.session_duration_days,
            ));
            tracing::debug!("🔑 Issued new session token: {}", token);
            token
        }
    };

    request.extensions_mut().insert(token);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_covers_whole_path_for_seven_days() {
        let token = SessionToken::generate();
        let cookie = build_session_cookie(token, 7);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), token.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(7 * 86400)));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
