use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет в лог:
/// - Длительность (ms)
/// - Статус код
/// - Метод и путь
/// - Location, если ответ — редирект
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed().as_millis();
    match response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
    {
        Some(location) => tracing::info!(
            "{:>5}ms | {} {:>6} {} -> {}",
            elapsed,
            status.as_u16(),
            method,
            path,
            location
        ),
        None => tracing::info!("{:>5}ms | {} {:>6} {}", elapsed, status.as_u16(), method, path),
    }

    response
}
