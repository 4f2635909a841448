//! Role-based route access: one policy table, read by the request-time gate
//! and by the navigation menu.

pub mod error;
pub mod gate;
pub mod navigation;
pub mod path;
pub mod policy;
pub mod role;
pub mod session;

pub use error::PolicyError;
pub use gate::{AccessGate, Decision, DenyReason};
pub use navigation::{NavEntry, NavSection, NavigationProjector, Visibility};
pub use policy::{PolicyConfig, RoutePolicy};
pub use role::Role;
pub use session::{Session, SessionSettings, SessionStore};
