//! Route policy: which roles may reach which path prefixes, and where each
//! role lands.
//!
//! `PolicyConfig` is the serializable form (TOML on the gateway, JSON on the
//! wire). `RoutePolicy` is the validated form the gate evaluates against. The
//! only way to get a `RoutePolicy` from outside input is
//! [`RoutePolicy::from_config`], which rejects every misconfiguration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::error::PolicyError;
use super::path::{is_under, normalize, validate_in_app};
use super::role::Role;

pub const PUBLIC_ROOT: &str = "/";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub prefix: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_public_root")]
    pub public_root: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    pub rules: Vec<RuleConfig>,
    pub landings: Vec<LandingConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingConfig {
    pub role: Role,
    pub path: String,
}

fn default_public_root() -> String {
    PUBLIC_ROOT.to_string()
}

fn default_login_path() -> String {
    LOGIN_PATH.to_string()
}

impl Default for PolicyConfig {
    /// Своя закрытая область для каждой роли.
    fn default() -> Self {
        let area = |role: Role, prefix: &str| {
            (
                RuleConfig {
                    prefix: prefix.to_string(),
                    roles: vec![role],
                },
                LandingConfig {
                    role,
                    path: format!("{}/dashboard", prefix),
                },
            )
        };
        let (rules, landings) = [
            area(Role::WarehouseManager, "/warehouse"),
            area(Role::SalesRep, "/sales"),
            area(Role::ProductionManager, "/production"),
        ]
        .into_iter()
        .unzip();

        Self {
            public_root: default_public_root(),
            login_path: default_login_path(),
            rules,
            landings,
        }
    }
}

/// Защищённый префикс и роли, которым он доступен.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    prefix: String,
    roles: BTreeSet<Role>,
}

impl RouteRule {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn matches(&self, path: &str) -> bool {
        is_under(path, &self.prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    public_root: String,
    login_path: String,
    /// Ordered longest prefix first, so the first match is the most specific.
    rules: Vec<RouteRule>,
    landings: BTreeMap<Role, String>,
    source: PolicyConfig,
}

impl RoutePolicy {
    /// Встроенная политика (области склада, продаж и производства).
    pub fn standard() -> Self {
        Self::assemble(PolicyConfig::default())
    }

    pub fn from_config(config: PolicyConfig) -> Result<Self, PolicyError> {
        validate_paths(&config)?;
        let policy = Self::assemble(config);
        policy.validate_rules()?;
        policy.validate_landings()?;
        Ok(policy)
    }

    fn assemble(config: PolicyConfig) -> Self {
        let mut rules: Vec<RouteRule> = config
            .rules
            .iter()
            .map(|rule| RouteRule {
                prefix: rule.prefix.clone(),
                roles: rule.roles.iter().copied().collect(),
            })
            .collect();
        // Stable sort keeps declaration order among equal lengths.
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Self {
            public_root: config.public_root.clone(),
            login_path: config.login_path.clone(),
            rules,
            landings: config
                .landings
                .iter()
                .map(|landing| (landing.role, landing.path.clone()))
                .collect(),
            source: config,
        }
    }

    fn validate_rules(&self) -> Result<(), PolicyError> {
        for rule in &self.rules {
            if rule.roles.is_empty() {
                return Err(PolicyError::EmptyRoleSet {
                    prefix: rule.prefix.clone(),
                });
            }
            let reserved = is_under(&self.public_root, &rule.prefix)
                || is_under(&self.login_path, &rule.prefix)
                || is_under(&rule.prefix, &self.login_path);
            if reserved {
                return Err(PolicyError::ReservedPrefix {
                    prefix: rule.prefix.clone(),
                });
            }
        }

        for (i, inner) in self.rules.iter().enumerate() {
            for outer in &self.rules[i + 1..] {
                if inner.prefix == outer.prefix {
                    return Err(PolicyError::DuplicatePrefix {
                        prefix: inner.prefix.clone(),
                    });
                }
                // Longest-first order: an overlap always has `inner` under `outer`.
                if is_under(&inner.prefix, &outer.prefix)
                    && inner.roles.is_disjoint(&outer.roles)
                {
                    return Err(PolicyError::ConflictingRules {
                        outer: outer.prefix.clone(),
                        inner: inner.prefix.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_landings(&self) -> Result<(), PolicyError> {
        let mut seen = BTreeSet::new();
        for landing in &self.source.landings {
            if !seen.insert(landing.role) {
                return Err(PolicyError::DuplicateLanding { role: landing.role });
            }
        }
        for role in Role::all() {
            let path = self
                .landings
                .get(&role)
                .ok_or(PolicyError::MissingLanding { role })?;
            let reachable = *path != self.login_path
                && self.rule_for(path).map_or(true, |rule| rule.allows(role));
            if !reachable {
                return Err(PolicyError::LandingNotAllowed {
                    role,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Сериализуемая форма, из которой построена политика.
    pub fn config(&self) -> &PolicyConfig {
        &self.source
    }

    pub fn public_root(&self) -> &str {
        &self.public_root
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn is_login(&self, path: &str) -> bool {
        normalize(path) == self.login_path
    }

    /// Landing path for a role. Total for a validated policy.
    pub fn landing(&self, role: Role) -> &str {
        self.landings
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.public_root)
    }

    /// Самое специфичное правило для `path`, если есть.
    pub fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize(path);
        self.rules.iter().find(|rule| rule.matches(&path))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Paths the gate intercepts: the login path and every protected prefix,
    /// in declaration order.
    pub fn matchers(&self) -> Vec<&str> {
        std::iter::once(self.login_path.as_str())
            .chain(self.source.rules.iter().map(|rule| rule.prefix.as_str()))
            .collect()
    }

    /// True when the gate intercepts `path` at all.
    pub fn intercepts(&self, path: &str) -> bool {
        self.is_login(path) || self.rule_for(path).is_some()
    }
}

fn validate_paths(config: &PolicyConfig) -> Result<(), PolicyError> {
    validate_in_app(&config.public_root)?;
    validate_in_app(&config.login_path)?;
    if config.public_root == config.login_path {
        return Err(PolicyError::LoginIsRoot {
            path: config.login_path.clone(),
        });
    }
    for rule in &config.rules {
        validate_in_app(&rule.prefix)?;
    }
    for landing in &config.landings {
        validate_in_app(&landing.path)?;
    }
    Ok(())
}
