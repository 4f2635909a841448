//! Хранение сессии в cookies браузера.
//!
//! Шлюз читает те же две cookie при каждой полной загрузке страницы,
//! поэтому обе стороны видят одну и ту же сессию.

use contracts::system::access::session::{
    expired_cookie, session_cookie, CookieSessionStore, ROLE_KEY, TOKEN_KEY,
};
use contracts::system::access::{Role, Session, SessionSettings, SessionStore};
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

fn get_document() -> Option<HtmlDocument> {
    window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn read_cookies() -> String {
    get_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

fn write_cookie(value: &str) {
    if let Some(doc) = get_document() {
        if doc.set_cookie(value).is_err() {
            log::warn!("Failed to write cookie");
        }
    }
}

/// `document.cookie` как хранилище сессии
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn token(&self) -> Option<String> {
        CookieSessionStore::new(&read_cookies()).token()
    }

    fn role(&self) -> Option<String> {
        CookieSessionStore::new(&read_cookies()).role()
    }

    fn snapshot(&self) -> Session {
        let cookies = read_cookies();
        CookieSessionStore::new(&cookies).snapshot()
    }
}

/// Однократно прочитать текущую сессию
pub fn current_session() -> Session {
    BrowserSessionStore.snapshot()
}

/// Сохранить оба поля сессии вместе
pub fn save_session(token: &str, role: Role, settings: &SessionSettings) {
    write_cookie(&session_cookie(TOKEN_KEY, token, settings));
    write_cookie(&session_cookie(ROLE_KEY, role.code(), settings));
}

/// Удалить оба поля сессии вместе
pub fn clear_session() {
    write_cookie(&expired_cookie(TOKEN_KEY));
    write_cookie(&expired_cookie(ROLE_KEY));
}
