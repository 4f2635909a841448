use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use contracts::system::access::session::CookieSessionStore;
use contracts::system::access::{Decision, SessionStore};

use super::AccessState;

/// Шлюз доступа перед SPA.
///
/// Один раз читает cookies сессии, проверяет политику и либо пропускает
/// запрос дальше без изменений, либо отвечает `303 See Other` с адресом
/// перенаправления. Cookies здесь никогда не пишутся.
pub async fn access_gate(
    State(state): State<AccessState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = cookie_header(req.headers());
    let session = CookieSessionStore::new(&cookies).snapshot();

    match state.gate.evaluate(req.uri().path(), &session) {
        Decision::Allow => next.run(req).await,
        Decision::Redirect { to, reason } => {
            tracing::debug!(
                path = req.uri().path(),
                role = ?session.role(),
                ?reason,
                "navigation redirected to {}",
                to
            );
            Redirect::to(&to).into_response()
        }
    }
}

/// Клиенты HTTP/2 могут разбивать cookies на несколько заголовков.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_header_joins_values() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("token=abc"));
        headers.append(header::COOKIE, HeaderValue::from_static("role=SALES_REP"));
        assert_eq!(cookie_header(&headers), "token=abc; role=SALES_REP");
        assert_eq!(cookie_header(&HeaderMap::new()), "");
    }
}
