use contracts::system::access::{PolicyConfig, SessionSettings};
use contracts::system::auth::{LoginData, LoginRequest, LoginResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Вход по email и паролю через REST API
pub async fn login(email: String, password: String) -> Result<LoginData, String> {
    let request = LoginRequest { email, password };

    let response = Request::post(&api_url("/auth/login"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map(|body| body.data)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Policy enforced by the gateway that served this page
pub async fn fetch_policy() -> Result<PolicyConfig, String> {
    let response = Request::get("/api/access/policy")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Policy request failed: {}", response.status()));
    }

    response
        .json::<PolicyConfig>()
        .await
        .map_err(|e| format!("Failed to parse policy: {}", e))
}

/// Срок жизни cookie сессии, настроенный на шлюзе
pub async fn fetch_session_settings() -> Result<SessionSettings, String> {
    let response = Request::get("/api/access/session")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session settings request failed: {}", response.status()));
    }

    response
        .json::<SessionSettings>()
        .await
        .map_err(|e| format!("Failed to parse session settings: {}", e))
}
