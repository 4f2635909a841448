//! Navigation projector.
//!
//! The page catalog lists the dashboard's pages without any role data.
//! Visibility is always obtained by asking the gate, so the menu can only
//! show links the gate will let through.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::gate::AccessGate;
use super::role::Role;

/// Страница дашборда
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub section: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

const fn page(section: &'static str, label: &'static str, path: &'static str) -> Page {
    Page {
        section,
        label,
        path,
    }
}

pub const PAGES: &[Page] = &[
    page("Overview", "Dashboard", "/dashboard"),
    page("Overview", "Products", "/products/view"),
    page("Overview", "New Product", "/products/new"),
    page("Overview", "Orders", "/orders/view"),
    page("Overview", "Deliveries", "/deliveries"),
    page("Production", "Production Dashboard", "/production/dashboard"),
    page("Production", "Production Summary", "/production/production-dashboard"),
    page("Production", "New Production", "/production/new"),
    page("Production", "Production Records", "/production/view"),
    page("Production", "Distribute", "/production/distribute"),
    page("Sales", "Sales Dashboard", "/sales/dashboard"),
    page("Sales", "New Order", "/sales/orders/new"),
    page("Sales", "Sales Orders", "/sales/orders/view"),
    page("Warehouse", "Warehouse Dashboard", "/warehouse/dashboard"),
    page("Warehouse", "New Warehouse", "/warehouse/new"),
    page("Warehouse", "Warehouses", "/warehouse/view"),
    page("Warehouse", "Warehouse Products", "/warehouse/products/view"),
];

/// Поиск страницы каталога по пути
pub fn find_page(path: &str) -> Option<&'static Page> {
    PAGES.iter().find(|page| page.path == path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Reachable by everyone, signed in or not.
    All,
    Roles(BTreeSet<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub section: String,
    pub label: String,
    pub path: String,
    pub visibility: Visibility,
}

impl NavEntry {
    pub fn is_visible_to(&self, actor: Option<Role>) -> bool {
        match (&self.visibility, actor) {
            (Visibility::All, _) => true,
            (Visibility::Roles(roles), Some(role)) => roles.contains(&role),
            (Visibility::Roles(_), None) => false,
        }
    }
}

/// Раздел меню с видимыми пунктами в порядке каталога
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub entries: Vec<NavEntry>,
}

#[derive(Debug, Clone)]
pub struct NavigationProjector {
    gate: AccessGate,
    pages: Vec<Page>,
}

impl NavigationProjector {
    pub fn new(gate: AccessGate) -> Self {
        Self::with_pages(gate, PAGES.to_vec())
    }

    pub fn with_pages(gate: AccessGate, pages: Vec<Page>) -> Self {
        Self { gate, pages }
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Все страницы каталога с вычисленной видимостью.
    pub fn entries(&self) -> Vec<NavEntry> {
        self.pages.iter().map(|page| self.entry(page)).collect()
    }

    fn entry(&self, page: &Page) -> NavEntry {
        NavEntry {
            section: page.section.to_string(),
            label: page.label.to_string(),
            path: page.path.to_string(),
            visibility: self.visibility_of(page.path),
        }
    }

    fn visibility_of(&self, path: &str) -> Visibility {
        let roles: BTreeSet<Role> = Role::all()
            .into_iter()
            .filter(|role| self.gate.decide(path, Some(*role)).is_allow())
            .collect();
        let everyone = roles.len() == Role::all().len() && self.gate.decide(path, None).is_allow();
        if everyone {
            Visibility::All
        } else {
            Visibility::Roles(roles)
        }
    }

    /// Entries the actor may follow, in catalog order.
    pub fn visible_for(&self, actor: Option<Role>) -> Vec<NavEntry> {
        self.pages
            .iter()
            .filter(|page| self.gate.decide(page.path, actor).is_allow())
            .map(|page| self.entry(page))
            .collect()
    }

    /// Видимые пункты по разделам; пустые разделы отбрасываются.
    pub fn sections_for(&self, actor: Option<Role>) -> Vec<NavSection> {
        let mut sections: Vec<NavSection> = Vec::new();
        for entry in self.visible_for(actor) {
            match sections.last_mut() {
                Some(section) if section.title == entry.section => section.entries.push(entry),
                _ => sections.push(NavSection {
                    title: entry.section.clone(),
                    entries: vec![entry],
                }),
            }
        }
        sections
    }

    pub fn home_for(&self, actor: Option<Role>) -> String {
        self.gate.home_for(actor).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::access::policy::{PolicyConfig, RoutePolicy, RuleConfig};
    use crate::system::access::session::Session;

    fn projector() -> NavigationProjector {
        NavigationProjector::new(AccessGate::new(RoutePolicy::standard()))
    }

    fn actors() -> Vec<Option<Role>> {
        std::iter::once(None)
            .chain(Role::all().into_iter().map(Some))
            .collect()
    }

    fn session_for(actor: Option<Role>) -> Session {
        actor
            .map(|role| Session::authenticated("token", role))
            .unwrap_or_default()
    }

    #[test]
    fn test_visible_set_matches_gate_exactly() {
        let projector = projector();
        for actor in actors() {
            let visible: Vec<String> = projector
                .visible_for(actor)
                .into_iter()
                .map(|entry| entry.path)
                .collect();
            let allowed: Vec<String> = projector
                .entries()
                .into_iter()
                .filter(|entry| {
                    projector
                        .gate()
                        .evaluate(&entry.path, &session_for(actor))
                        .is_allow()
                })
                .map(|entry| entry.path)
                .collect();
            assert_eq!(visible, allowed, "{actor:?}");
        }
    }

    #[test]
    fn test_entry_visibility_agrees_with_gate() {
        let projector = projector();
        for entry in projector.entries() {
            for actor in actors() {
                assert_eq!(
                    entry.is_visible_to(actor),
                    projector
                        .gate()
                        .evaluate(&entry.path, &session_for(actor))
                        .is_allow(),
                    "{} for {actor:?}",
                    entry.path
                );
            }
        }
    }

    #[test]
    fn test_sales_rep_menu() {
        let sections = projector().sections_for(Some(Role::SalesRep));
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview", "Sales"]);
        let sales: Vec<&str> = sections[1].entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            sales,
            vec!["/sales/dashboard", "/sales/orders/new", "/sales/orders/view"]
        );
    }

    #[test]
    fn test_production_manager_menu() {
        let sections = projector().sections_for(Some(Role::ProductionManager));
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview", "Production"]);
        let production: Vec<&str> = sections[1].entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            production,
            vec![
                "/production/dashboard",
                "/production/production-dashboard",
                "/production/new",
                "/production/view",
                "/production/distribute",
            ]
        );
    }

    #[test]
    fn test_anonymous_sees_only_public_pages() {
        let visible = projector().visible_for(None);
        assert!(!visible.is_empty());
        assert!(visible
            .iter()
            .all(|entry| entry.visibility == Visibility::All));
    }

    #[test]
    fn test_visibility_follows_policy_changes() {
        let mut config = PolicyConfig::default();
        config.rules.push(RuleConfig {
            prefix: "/deliveries".into(),
            roles: vec![Role::WarehouseManager, Role::SalesRep],
        });
        let projector =
            NavigationProjector::new(AccessGate::new(RoutePolicy::from_config(config).unwrap()));

        let deliveries = projector
            .entries()
            .into_iter()
            .find(|entry| entry.path == "/deliveries")
            .unwrap();
        assert_eq!(
            deliveries.visibility,
            Visibility::Roles([Role::SalesRep, Role::WarehouseManager].into())
        );
        assert!(!deliveries.is_visible_to(Some(Role::ProductionManager)));
    }

    #[test]
    fn test_every_landing_is_in_catalog() {
        let projector = projector();
        for role in Role::all() {
            let home = projector.home_for(Some(role));
            assert!(find_page(&home).is_some(), "{home}");
        }
        assert_eq!(projector.home_for(None), "/");
    }
}
