use contracts::system::access::{Role, Session, SessionSettings};
use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Session,
    /// Срок жизни cookie, опубликованный шлюзом
    pub settings: SessionSettings,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }
}

/// Провайдер контекста авторизации
///
/// Сессия читается из cookies один раз при монтировании. Здесь она не
/// обновляется и не чинится: истёкшая или неполная сессия читается как анонимная.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState {
        session: storage::current_session(),
        settings: SessionSettings::default(),
    });

    provide_context(auth_state);

    children()
}

/// Хук для доступа к состоянию авторизации
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// Хелпер: вход, сохранение обоих полей сессии, возврат роли
pub async fn do_login(
    auth_state: RwSignal<AuthState>,
    email: String,
    password: String,
) -> Result<Role, String> {
    let data = api::login(email, password).await?;

    let settings = auth_state.with_untracked(|state| state.settings);
    storage::save_session(&data.token, data.role, &settings);
    auth_state.update(|state| state.session = Session::authenticated(data.token, data.role));

    log::info!("Signed in as {}", data.role);
    Ok(data.role)
}

/// Хелпер: выход
pub fn do_logout(auth_state: RwSignal<AuthState>) {
    storage::clear_session();
    auth_state.update(|state| state.session = Session::Anonymous);
    log::info!("Signed out");
}
