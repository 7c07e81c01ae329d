use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
}

/// Permissions keyed by category, categories in lexical order.
pub type PermissionsByCategory = BTreeMap<String, Vec<Permission>>;

/// Bucket permissions by category, keeping their relative order.
pub fn group_by_category(permissions: Vec<Permission>) -> PermissionsByCategory {
    let mut grouped = PermissionsByCategory::new();
    for permission in permissions {
        grouped
            .entry(permission.category.clone())
            .or_default()
            .push(permission);
    }
    grouped
}
