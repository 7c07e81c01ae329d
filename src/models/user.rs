use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access right listed alongside every specific admin right.
pub const ADMIN: &str = "admin";

/// The user resolved for the current request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Effective rights: granted directly plus inherited from groups.
    pub permissions: BTreeSet<String>,
}

impl User {
    /// True when the user holds at least one of `rights`.
    pub fn has_any_access(&self, rights: &[&str]) -> bool {
        rights.iter().any(|r| self.permissions.contains(*r))
    }
}
