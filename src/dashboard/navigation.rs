//! Sidebar navigation

use serde::Serialize;
use std::str::FromStr;

/// Heading shown above the menu
pub const DASHBOARD_TITLE: &str = "Dashboard!";

/// A destination reachable from the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Inbox,
    Connection,
    Calendar,
    Pose,
    Challenges,
    Analytics,
    Workout,
    Profile,
    /// Reached through the call-to-action button below the menu
    Special,
}

impl Tab {
    /// Tabs listed in the menu, top to bottom
    pub fn menu() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::Inbox,
            Tab::Connection,
            Tab::Calendar,
            Tab::Pose,
            Tab::Challenges,
            Tab::Analytics,
            Tab::Workout,
            Tab::Profile,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Inbox => "inbox",
            Tab::Connection => "connection",
            Tab::Calendar => "calendar",
            Tab::Pose => "pose",
            Tab::Challenges => "challenges",
            Tab::Analytics => "analytics",
            Tab::Workout => "workout",
            Tab::Profile => "profile",
            Tab::Special => "special",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Inbox => "Inbox",
            Tab::Connection => "Connection",
            Tab::Calendar => "Event Calendar",
            Tab::Pose => "Pose Correction",
            Tab::Challenges => "Challenges",
            Tab::Analytics => "Analytics",
            Tab::Workout => "Workout Library",
            Tab::Profile => "Profile",
            Tab::Special => "Special Button",
        }
    }

    /// Badge text next to the label, if any
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Tab::Inbox => Some("New"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Tab id that matches no known tab
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tab: {0}")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::menu()
            .iter()
            .chain(std::iter::once(&Tab::Special))
            .find(|tab| tab.id() == s)
            .copied()
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// One rendered menu row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub active: bool,
}

/// Sidebar selection state
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    active: Tab,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        if tab != self.active {
            tracing::debug!(from = %self.active, to = %tab, "Switching tab");
        }
        self.active = tab;
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        Tab::menu()
            .iter()
            .map(|tab| MenuItem {
                id: tab.id(),
                label: tab.label(),
                badge: tab.badge(),
                active: *tab == self.active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_is_home() {
        let sidebar = Sidebar::new();
        assert_eq!(sidebar.active(), Tab::Home);

        let items = sidebar.menu_items();
        assert_eq!(items.len(), 9);
        assert!(items[0].active);
        assert_eq!(items.iter().filter(|i| i.active).count(), 1);
    }

    #[test]
    fn test_select_tab() {
        let mut sidebar = Sidebar::new();
        sidebar.select(Tab::Calendar);

        let active: Vec<&str> = sidebar
            .menu_items()
            .into_iter()
            .filter(|i| i.active)
            .map(|i| i.label)
            .collect();
        assert_eq!(active, vec!["Event Calendar"]);
    }

    #[test]
    fn test_special_tab_not_in_menu() {
        let mut sidebar = Sidebar::new();
        sidebar.select(Tab::Special);

        assert_eq!(sidebar.active(), Tab::Special);
        assert!(sidebar.menu_items().iter().all(|i| !i.active));
    }

    #[test]
    fn test_only_inbox_has_badge() {
        let badged: Vec<Tab> = Tab::menu()
            .iter()
            .copied()
            .filter(|t| t.badge().is_some())
            .collect();
        assert_eq!(badged, vec![Tab::Inbox]);
        assert_eq!(Tab::Inbox.badge(), Some("New"));
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!("pose".parse::<Tab>(), Ok(Tab::Pose));
        assert_eq!("special".parse::<Tab>(), Ok(Tab::Special));
        assert_eq!("Pose".parse::<Tab>(), Err(UnknownTab("Pose".to_string())));

        for tab in Tab::menu() {
            assert_eq!(tab.id().parse::<Tab>(), Ok(*tab));
        }
    }
}
