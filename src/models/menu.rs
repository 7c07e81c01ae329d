use serde::{Deserialize, Serialize};

/// A navigation menu as rendered for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub url: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl Menu {
    /// Mark `key` active (and its ancestors), clearing every other item.
    /// Returns false when no item carries that key.
    pub fn set_active(&mut self, key: &str) -> bool {
        let mut found = false;
        for item in &mut self.items {
            found |= item.set_active(key);
        }
        found
    }

    pub fn active_key(&self) -> Option<&str> {
        fn deepest(items: &[MenuItem]) -> Option<&str> {
            let item = items.iter().find(|i| i.active)?;
            deepest(&item.children).or(Some(item.key.as_str()))
        }
        deepest(&self.items)
    }
}

impl MenuItem {
    fn set_active(&mut self, key: &str) -> bool {
        let mut in_subtree = false;
        for child in &mut self.children {
            in_subtree |= child.set_active(key);
        }
        self.active = in_subtree || self.key == key;
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, children: Vec<MenuItem>) -> MenuItem {
        MenuItem {
            key: key.into(),
            label: key.into(),
            url: format!("/{key}"),
            active: false,
            children,
        }
    }

    #[test]
    fn activating_a_child_marks_its_parent() {
        let mut menu = Menu {
            name: "admin_sidebar".into(),
            items: vec![
                item("dashboard", vec![]),
                item("user-manager", vec![item("user-manager.manage-group", vec![])]),
            ],
        };
        assert!(menu.set_active("user-manager.manage-group"));
        assert!(!menu.items[0].active);
        assert!(menu.items[1].active);
        assert_eq!(menu.active_key(), Some("user-manager.manage-group"));
    }

    #[test]
    fn unknown_key_clears_everything() {
        let mut menu = Menu {
            name: "admin_sidebar".into(),
            items: vec![item("dashboard", vec![])],
        };
        menu.set_active("dashboard");
        assert!(!menu.set_active("missing"));
        assert_eq!(menu.active_key(), None);
    }
}
