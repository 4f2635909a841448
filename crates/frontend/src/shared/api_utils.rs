//! Утилиты для обращения к API
//!
//! Серверов два: шлюз, отдавший эту страницу (тот же origin), и внешний
//! REST API на порту 3000 того же хоста.

/// Базовый URL для запросов к REST API
///
/// Строится из текущего window.location, порт API всегда 3000.
///
/// # Returns
/// - URL вида "http://localhost:3000" или "https://example.com:3000"
/// - Пустая строка, если window недоступен
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL REST API для указанного пути
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
