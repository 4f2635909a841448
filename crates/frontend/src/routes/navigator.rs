//! Client-side navigation.
//!
//! In-app links never reach the gateway, so the same gate runs here before a
//! page is shown: the session cookies are read once, the decision is taken,
//! and only then does the URL (and with it the rendered page) change.

use contracts::system::access::path::normalize;
use contracts::system::access::{AccessGate, Decision, RoutePolicy};
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::system::auth::context::AuthState;
use crate::system::auth::storage;

#[derive(Clone, Copy)]
pub struct Navigator {
    /// Path of the page currently shown; always one the gate allowed.
    pub path: RwSignal<String>,
    pub gate: RwSignal<AccessGate>,
    auth_state: RwSignal<AuthState>,
}

impl Navigator {
    pub fn new(auth_state: RwSignal<AuthState>) -> Self {
        Self {
            path: RwSignal::new(current_location()),
            gate: RwSignal::new(AccessGate::new(RoutePolicy::standard())),
            auth_state,
        }
    }

    /// Swap in the policy published by the gateway and re-check the current
    /// page against it.
    pub fn install_policy(&self, policy: RoutePolicy) {
        self.gate.set(AccessGate::new(policy));
        self.refresh();
    }

    /// Повторная проверка текущего адреса (первая загрузка, назад/вперёд).
    pub fn refresh(&self) {
        self.go(&current_location(), false);
    }

    /// Переход по внутреннему пути через шлюз доступа.
    pub fn navigate(&self, path: &str) {
        self.go(path, true);
    }

    fn go(&self, path: &str, push: bool) {
        let session = storage::current_session();
        if self.auth_state.with_untracked(|state| state.session != session) {
            self.auth_state.update(|state| state.session = session.clone());
        }

        let target = match self.gate.with_untracked(|gate| gate.evaluate(path, &session)) {
            Decision::Allow => normalize(path),
            Decision::Redirect { to, reason } => {
                log::debug!("Navigation to {} redirected to {} ({:?})", path, to, reason);
                to
            }
        };

        if current_location() != target {
            set_location(&target, push);
        }
        if self.path.get_untracked() != target {
            self.path.set(target);
        }
    }
}

pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().expect("Navigator not found in component tree")
}

fn current_location() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn set_location(path: &str, push: bool) {
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if result.is_err() {
        log::warn!("Failed to update history for {}", path);
    }
}
