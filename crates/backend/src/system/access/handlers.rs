use axum::{extract::State, Json};
use contracts::system::access::{NavEntry, PolicyConfig, SessionSettings};

use super::AccessState;

/// Политика, которую применяет шлюз: клиент проверяет по той же таблице
pub async fn policy(State(state): State<AccessState>) -> Json<PolicyConfig> {
    Json(state.gate.policy().config().clone())
}

/// Все страницы каталога с вычисленной видимостью
pub async fn navigation(State(state): State<AccessState>) -> Json<Vec<NavEntry>> {
    Json(state.projector.entries())
}

/// Срок жизни cookie, с которым клиент записывает сессию
pub async fn session(State(state): State<AccessState>) -> Json<SessionSettings> {
    Json(state.session)
}
