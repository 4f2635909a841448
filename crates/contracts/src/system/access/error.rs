use thiserror::Error;

use super::role::Role;

/// Policy misconfiguration. Always detected while the policy is loaded,
/// never at request time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("path `{path}` is not an in-app path")]
    InvalidPath { path: String },

    #[error("rule `{prefix}` allows no roles")]
    EmptyRoleSet { prefix: String },

    #[error("prefix `{prefix}` is declared more than once")]
    DuplicatePrefix { prefix: String },

    #[error("rules `{outer}` and `{inner}` overlap but share no role")]
    ConflictingRules { outer: String, inner: String },

    #[error("prefix `{prefix}` would cover the public root or the login path")]
    ReservedPrefix { prefix: String },

    #[error("public root and login path must differ (both `{path}`)")]
    LoginIsRoot { path: String },

    #[error("role {role} has more than one landing path")]
    DuplicateLanding { role: Role },

    #[error("role {role} has no landing path")]
    MissingLanding { role: Role },

    #[error("landing path `{path}` is not reachable by role {role}")]
    LandingNotAllowed { role: Role, path: String },
}
