use serde::{Deserialize, Serialize};
use std::fmt;

/// Роли пользователей дашборда
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    ProductionManager,
    SalesRep,
    WarehouseManager,
}

impl Role {
    /// Код роли, как он хранится в cookie и приходит от API
    pub fn code(&self) -> &'static str {
        match self {
            Role::ProductionManager => "PRODUCTION_MANAGER",
            Role::SalesRep => "SALES_REP",
            Role::WarehouseManager => "WAREHOUSE_MANAGER",
        }
    }

    /// Человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::ProductionManager => "Production Manager",
            Role::SalesRep => "Sales Representative",
            Role::WarehouseManager => "Warehouse Manager",
        }
    }

    pub fn all() -> Vec<Role> {
        vec![Role::ProductionManager, Role::SalesRep, Role::WarehouseManager]
    }

    /// Parse a stored role value.
    ///
    /// Surrounding whitespace and one pair of JSON quotes are ignored, so a
    /// value written with `JSON.stringify` still parses. Anything else that is
    /// not an exact code yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let code = code
            .strip_prefix('"')
            .and_then(|c| c.strip_suffix('"'))
            .unwrap_or(code);
        match code {
            "PRODUCTION_MANAGER" => Some(Role::ProductionManager),
            "SALES_REP" => Some(Role::SalesRep),
            "WAREHOUSE_MANAGER" => Some(Role::WarehouseManager),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
