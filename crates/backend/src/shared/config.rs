use anyhow::Context;
use contracts::system::access::{PolicyConfig, RoutePolicy, SessionSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Срок жизни cookie сессии, передаётся фронтенду
    #[serde(default)]
    pub session: SessionSettings,
    /// Если задано, заменяет встроенную политику маршрутов
    #[serde(default)]
    pub access: Option<PolicyConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Собранный фронтенд (index.html + wasm-бандл)
    pub static_dir: String,
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8080
static_dir = "dist"

[session]
max_age_days = 30
"#;

/// Загрузка конфигурации из config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (для production)
/// 2. Иначе встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("cannot read {}", config_path.display()))?;
                return parse_config(&contents)
                    .with_context(|| format!("invalid {}", config_path.display()));
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Build and validate the route policy.
///
/// A misconfigured policy is returned as an error so startup aborts before
/// the listener is bound.
pub fn build_policy(config: &Config) -> anyhow::Result<RoutePolicy> {
    match &config.access {
        Some(access) => RoutePolicy::from_config(access.clone())
            .context("[access] policy in config.toml is misconfigured"),
        None => {
            tracing::info!("No [access] section, using the standard route policy");
            Ok(RoutePolicy::standard())
        }
    }
}

/// Настройки сессии для фронтенда. Нулевой срок жизни отклоняется при
/// старте: иначе каждый вход истекал бы сразу.
pub fn session_settings(config: &Config) -> anyhow::Result<SessionSettings> {
    anyhow::ensure!(
        config.session.max_age_days > 0,
        "[session] max_age_days must be at least 1"
    );
    Ok(config.session)
}

/// Каталог статических файлов из конфигурации
/// Относительные пути разрешаются от каталога исполняемого файла
pub fn get_static_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.server.static_dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    PathBuf::from(&config.server.static_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::access::{PolicyError, Role};

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, "dist");
        assert!(config.access.is_none());

        let policy = build_policy(&config).unwrap();
        assert_eq!(policy, RoutePolicy::standard());
        assert_eq!(session_settings(&config).unwrap(), SessionSettings::default());
    }

    #[test]
    fn test_session_section() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "dist"

            [session]
            max_age_days = 1
            "#,
        )
        .unwrap();
        assert_eq!(session_settings(&config).unwrap().max_age_days, 1);

        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "dist"
            "#,
        )
        .unwrap();
        assert_eq!(session_settings(&config).unwrap().max_age_days, 30);

        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "dist"

            [session]
            max_age_days = 0
            "#,
        )
        .unwrap();
        assert!(session_settings(&config).is_err());
    }

    #[test]
    fn test_example_config_matches_standard_policy() {
        let config = parse_config(include_str!("../../config.example.toml")).unwrap();
        let policy = build_policy(&config).unwrap();
        assert_eq!(policy.config(), RoutePolicy::standard().config());
    }

    #[test]
    fn test_access_section_overrides_policy() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "/srv/dashboard"

            [access]
            login_path = "/signin"

            [[access.rules]]
            prefix = "/production"
            roles = ["PRODUCTION_MANAGER"]

            [[access.rules]]
            prefix = "/stock"
            roles = ["WAREHOUSE_MANAGER", "PRODUCTION_MANAGER"]

            [[access.landings]]
            role = "PRODUCTION_MANAGER"
            path = "/production/dashboard"

            [[access.landings]]
            role = "WAREHOUSE_MANAGER"
            path = "/stock"

            [[access.landings]]
            role = "SALES_REP"
            path = "/orders/view"
            "#,
        )
        .unwrap();

        assert_eq!(get_static_dir(&config), PathBuf::from("/srv/dashboard"));
        let policy = build_policy(&config).unwrap();
        assert_eq!(policy.login_path(), "/signin");
        assert_eq!(policy.public_root(), "/");
        assert_eq!(policy.landing(Role::WarehouseManager), "/stock");
        assert_eq!(policy.matchers(), vec!["/signin", "/production", "/stock"]);
    }

    #[test]
    fn test_misconfigured_policy_aborts() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "dist"

            [[access.rules]]
            prefix = "/production"
            roles = ["PRODUCTION_MANAGER"]

            [[access.rules]]
            prefix = "/production/shared"
            roles = ["SALES_REP"]

            [[access.landings]]
            role = "PRODUCTION_MANAGER"
            path = "/production/dashboard"

            [[access.landings]]
            role = "WAREHOUSE_MANAGER"
            path = "/"

            [[access.landings]]
            role = "SALES_REP"
            path = "/"
            "#,
        )
        .unwrap();

        let err = build_policy(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolicyError>(),
            Some(&PolicyError::ConflictingRules {
                outer: "/production".into(),
                inner: "/production/shared".into(),
            })
        );
    }

    #[test]
    fn test_unknown_role_in_config_is_a_parse_error() {
        let result = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            static_dir = "dist"

            [[access.rules]]
            prefix = "/admin"
            roles = ["ADMIN"]

            [[access.landings]]
            role = "SALES_REP"
            path = "/"
            "#,
        );
        assert!(result.is_err());
    }
}
