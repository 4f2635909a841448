pub mod handlers;
pub mod middleware;

use contracts::system::access::{AccessGate, NavigationProjector, RoutePolicy, SessionSettings};

/// Общее для всех запросов; создаётся один раз при старте из проверенной политики.
#[derive(Clone)]
pub struct AccessState {
    pub gate: AccessGate,
    pub projector: NavigationProjector,
    pub session: SessionSettings,
}

impl AccessState {
    pub fn new(policy: RoutePolicy, session: SessionSettings) -> Self {
        let gate = AccessGate::new(policy);
        let projector = NavigationProjector::new(gate.clone());
        Self {
            gate,
            projector,
            session,
        }
    }
}
