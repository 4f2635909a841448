//! Access gate: decides, per navigation, whether to let the request through
//! or where to send the actor instead.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::path::normalize;
use super::policy::RoutePolicy;
use super::role::Role;
use super::session::{Session, SessionStore};

/// Why a navigation was redirected. Does not affect the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No session, or only half of one.
    Unauthenticated,
    /// Valid session, wrong role for the path.
    Unauthorized,
    /// Signed-in actor asked for the login page.
    AlreadyAuthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect { to: String, reason: DenyReason },
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Redirect { to, .. } => Some(to),
        }
    }
}

/// Cheap to clone; the policy is shared.
#[derive(Debug, Clone)]
pub struct AccessGate {
    policy: Arc<RoutePolicy>,
}

impl AccessGate {
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn from_shared(policy: Arc<RoutePolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Read the store once and decide.
    pub fn check(&self, path: &str, store: &impl SessionStore) -> Decision {
        self.evaluate(path, &store.snapshot())
    }

    pub fn evaluate(&self, path: &str, session: &Session) -> Decision {
        self.decide(path, session.role())
    }

    /// Decision for an actor known only by role (`None` = anonymous).
    pub fn decide(&self, path: &str, actor: Option<Role>) -> Decision {
        let policy = &*self.policy;
        let path = normalize(path);

        if policy.is_login(&path) {
            return match actor {
                Some(role) => redirect(policy.landing(role), DenyReason::AlreadyAuthenticated),
                None => Decision::Allow,
            };
        }

        let Some(rule) = policy.rule_for(&path) else {
            return Decision::Allow;
        };

        match actor {
            None => redirect(policy.public_root(), DenyReason::Unauthenticated),
            Some(role) if rule.allows(role) => Decision::Allow,
            Some(role) => redirect(policy.landing(role), DenyReason::Unauthorized),
        }
    }

    /// Where an actor goes by default: landing for a role, public root otherwise.
    pub fn home_for(&self, actor: Option<Role>) -> &str {
        match actor {
            Some(role) => self.policy.landing(role),
            None => self.policy.public_root(),
        }
    }
}

fn redirect(to: &str, reason: DenyReason) -> Decision {
    Decision::Redirect {
        to: to.to_string(),
        reason,
    }
}
