use std::collections::HashMap;

use crate::{
    models::menu::{Menu, MenuItem},
    routes::{Route, UrlGenerator},
};

pub const ADMIN_SIDEBAR: &str = "admin_sidebar";

/// Navigation-state service: which menu item a page highlights.
///
/// Returns a snapshot for the current request, so concurrent pages never
/// see each other's active item.
pub trait Navigation: Send + Sync {
    fn activate(&self, menu: &str, item: &str) -> Option<Menu>;
}

/// Static menu definitions of the admin panel.
pub struct AdminMenus {
    menus: HashMap<String, Menu>,
}

impl AdminMenus {
    pub fn new(urls: &UrlGenerator) -> Self {
        let sidebar = Menu {
            name: ADMIN_SIDEBAR.into(),
            items: vec![MenuItem {
                key: "user-manager".into(),
                label: "User Manager".into(),
                url: "#".into(),
                active: false,
                children: vec![MenuItem {
                    key: "user-manager.manage-group".into(),
                    label: "Manage Groups".into(),
                    url: urls.to(Route::GroupIndex, None),
                    active: false,
                    children: Vec::new(),
                }],
            }],
        };
        Self::from_menus(vec![sidebar])
    }

    pub fn from_menus(menus: Vec<Menu>) -> Self {
        Self {
            menus: menus.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }
}

impl Navigation for AdminMenus {
    fn activate(&self, menu: &str, item: &str) -> Option<Menu> {
        let mut snapshot = self.menus.get(menu)?.clone();
        if !snapshot.set_active(item) {
            tracing::warn!("menu {menu} has no item {item}");
        }
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_does_not_leak_between_requests() {
        let menus = AdminMenus::new(&UrlGenerator::new("/admin/usermanager"));
        let first = menus.activate(ADMIN_SIDEBAR, "user-manager.manage-group").unwrap();
        assert_eq!(first.active_key(), Some("user-manager.manage-group"));
        assert_eq!(first.items[0].children[0].url, "/admin/usermanager/group");

        let second = menus.activate(ADMIN_SIDEBAR, "user-manager").unwrap();
        assert_eq!(second.active_key(), Some("user-manager"));
        assert_eq!(first.active_key(), Some("user-manager.manage-group"));
    }

    #[test]
    fn unknown_menu_is_none() {
        let menus = AdminMenus::new(&UrlGenerator::new(""));
        assert!(menus.activate("footer", "anything").is_none());
    }
}
