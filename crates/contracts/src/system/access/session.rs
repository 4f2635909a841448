use serde::{Deserialize, Serialize};

use super::role::Role;

/// Cookie с непрозрачным bearer-токеном
pub const TOKEN_KEY: &str = "token";
/// Cookie с кодом роли
pub const ROLE_KEY: &str = "role";
/// Срок жизни cookie сессии в днях, если не настроен иначе
pub const SESSION_MAX_AGE_DAYS: u32 = 30;

/// Срок жизни cookie сессии. Настраивается на шлюзе и публикуется клиенту,
/// который и записывает cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_max_age_days() -> u32 {
    SESSION_MAX_AGE_DAYS
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_age_days: SESSION_MAX_AGE_DAYS,
        }
    }
}

impl SessionSettings {
    pub fn max_age_secs(&self) -> u64 {
        u64::from(self.max_age_days) * 24 * 60 * 60
    }
}

/// Snapshot of the current actor, read once per navigation.
///
/// There is no partially trusted state: a token without a parsable role, or a
/// role without a token, is `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, role: Role },
}

impl Session {
    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Session::Authenticated {
            token: token.into(),
            role,
        }
    }

    /// Build a session from raw stored fields. Empty values count as absent.
    pub fn from_parts(token: Option<&str>, role: Option<&str>) -> Self {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let role = role.and_then(Role::from_code);
        match (token, role) {
            (Some(token), Some(role)) => Session::authenticated(token, role),
            _ => Session::Anonymous,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => Some(*role),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Read access to wherever the session fields are persisted.
///
/// The gate only ever reads through this trait. Writing the fields is the job
/// of the login and logout flows, which must set or clear both together.
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn role(&self) -> Option<String>;

    fn snapshot(&self) -> Session {
        Session::from_parts(self.token().as_deref(), self.role().as_deref())
    }
}

/// Хранилище в памяти: для тестов и для кода, у которого оба поля уже есть.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(token: &str, role: Role) -> Self {
        let mut store = Self::new();
        store.login(token, role);
        store
    }

    pub fn login(&mut self, token: &str, role: Role) {
        self.token = Some(token.to_string());
        self.role = Some(role.code().to_string());
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.role = None;
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn role(&self) -> Option<String> {
        self.role.clone()
    }
}

/// Session store over a `Cookie` header value (`a=1; b=2`).
///
/// `document.cookie` uses the same format, so the browser side reads through
/// this type as well.
#[derive(Debug, Clone, Copy)]
pub struct CookieSessionStore<'a> {
    header: &'a str,
}

impl<'a> CookieSessionStore<'a> {
    pub fn new(header: &'a str) -> Self {
        Self { header }
    }
}

impl SessionStore for CookieSessionStore<'_> {
    fn token(&self) -> Option<String> {
        cookie_value(self.header, TOKEN_KEY)
    }

    fn role(&self) -> Option<String> {
        cookie_value(self.header, ROLE_KEY)
    }
}

/// Найти cookie по имени и декодировать значение.
/// При повторе имени берётся первое вхождение.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            let value = value.trim();
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

/// Значение `Set-Cookie` для одного поля сессии с настроенным сроком жизни.
pub fn session_cookie(name: &str, value: &str, settings: &SessionSettings) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        urlencoding::encode(value),
        settings.max_age_secs()
    )
}

/// Значение `Set-Cookie`, удаляющее одно поле сессии.
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_required() {
        assert_eq!(Session::from_parts(None, None), Session::Anonymous);
        assert_eq!(Session::from_parts(Some("t"), None), Session::Anonymous);
        assert_eq!(Session::from_parts(None, Some("SALES_REP")), Session::Anonymous);
        assert_eq!(
            Session::from_parts(Some("t"), Some("SALES_REP")),
            Session::authenticated("t", Role::SalesRep)
        );
    }

    #[test]
    fn test_empty_or_unknown_fields_are_absent() {
        assert_eq!(Session::from_parts(Some(""), Some("SALES_REP")), Session::Anonymous);
        assert_eq!(Session::from_parts(Some("   "), Some("SALES_REP")), Session::Anonymous);
        assert_eq!(Session::from_parts(Some("t"), Some("")), Session::Anonymous);
        assert_eq!(Session::from_parts(Some("t"), Some("ADMIN")), Session::Anonymous);
    }

    #[test]
    fn test_memory_store_login_logout() {
        let mut store = MemorySessionStore::signed_in("abc", Role::WarehouseManager);
        assert_eq!(store.snapshot().role(), Some(Role::WarehouseManager));
        assert_eq!(store.snapshot().token(), Some("abc"));

        store.logout();
        assert_eq!(store.snapshot(), Session::Anonymous);
    }

    #[test]
    fn test_cookie_store_reads_header() {
        let store = CookieSessionStore::new("theme=dark; token=eyJ.a.b; role=PRODUCTION_MANAGER");
        assert_eq!(
            store.snapshot(),
            Session::authenticated("eyJ.a.b", Role::ProductionManager)
        );
    }

    #[test]
    fn test_cookie_store_partial_header_is_anonymous() {
        let store = CookieSessionStore::new("token=abc");
        assert_eq!(store.snapshot(), Session::Anonymous);
        let store = CookieSessionStore::new("role=SALES_REP");
        assert_eq!(store.snapshot(), Session::Anonymous);
        let store = CookieSessionStore::new("");
        assert_eq!(store.snapshot(), Session::Anonymous);
    }

    #[test]
    fn test_cookie_value_decodes_and_ignores_lookalikes() {
        let header = "xtoken=nope; token=a%20b; role=%22SALES_REP%22";
        assert_eq!(cookie_value(header, "token"), Some("a b".to_string()));
        assert_eq!(cookie_value(header, "role"), Some("\"SALES_REP\"".to_string()));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_session_cookie_lifetime() {
        let cookie = session_cookie(ROLE_KEY, "SALES_REP", &SessionSettings::default());
        assert_eq!(cookie, "role=SALES_REP; Path=/; Max-Age=2592000; SameSite=Lax");
        assert!(expired_cookie(TOKEN_KEY).contains("Max-Age=0"));

        let short = SessionSettings { max_age_days: 1 };
        assert_eq!(
            session_cookie(TOKEN_KEY, "abc", &short),
            "token=abc; Path=/; Max-Age=86400; SameSite=Lax"
        );
    }

    #[test]
    fn test_session_settings_json_default() {
        let settings: SessionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SessionSettings::default());
        assert_eq!(settings.max_age_days, 30);
    }
}
