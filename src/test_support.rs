//! In-memory collaborators for controller and route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    controllers::groups::GroupController,
    error::RepositoryError,
    models::{
        auth::Session,
        datatable::{DatatablePage, DatatableQuery},
        group::{Group, GroupColumn, GroupForm},
        permission::{group_by_category, Permission, PermissionsByCategory},
        user::User,
    },
    routes::UrlGenerator,
    services::{
        events::BroadcastEventSink,
        groups::GroupRepository,
        menu::AdminMenus,
        permissions::PermissionRepository,
        users::UserRepository,
        view::HtmlShellRenderer,
    },
    AppState,
};

pub const PREFIX: &str = "/admin/usermanager";

pub fn group(name: &str, description: Option<&str>) -> Group {
    let now = Utc::now();
    Group {
        id: Uuid::new_v4(),
        name: name.into(),
        description: description.map(Into::into),
        created_at: now,
        updated_at: now,
    }
}

pub fn user(rights: &[&str]) -> User {
    User {
        id: Uuid::new_v4(),
        email: "admin@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        permissions: rights.iter().map(|r| r.to_string()).collect(),
    }
}

type ErrorFactory = Box<dyn Fn() -> RepositoryError + Send + Sync>;

#[derive(Default)]
pub struct MemoryGroups {
    rows: Mutex<Vec<Group>>,
    created: Mutex<Vec<GroupForm>>,
    updated: Mutex<Vec<(Uuid, GroupForm)>>,
    last_query: Mutex<Option<DatatableQuery<GroupColumn>>>,
    lookups: Mutex<usize>,
    write_error: Mutex<Option<ErrorFactory>>,
}

impl MemoryGroups {
    pub fn insert(&self, group: Group) {
        self.rows.lock().unwrap().push(group);
    }

    pub fn created(&self) -> Vec<GroupForm> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(Uuid, GroupForm)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<DatatableQuery<GroupColumn>> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    pub fn fail_writes_with(&self, make: impl Fn() -> RepositoryError + Send + Sync + 'static) {
        *self.write_error.lock().unwrap() = Some(Box::new(make));
    }

    fn injected_error(&self) -> Option<RepositoryError> {
        self.write_error.lock().unwrap().as_ref().map(|make| make())
    }

    fn not_found(id: Uuid) -> RepositoryError {
        RepositoryError::NotFound {
            entity: "Group",
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl GroupRepository for MemoryGroups {
    /// Rows are returned in insertion order; the query is only recorded.
    async fn datatable(
        &self,
        query: &DatatableQuery<GroupColumn>,
    ) -> Result<DatatablePage<Group>, RepositoryError> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        let rows = self.rows.lock().unwrap().clone();
        Ok(DatatablePage {
            records_total: rows.len() as i64,
            records_filtered: rows.len() as i64,
            rows,
        })
    }

    async fn create(&self, form: &GroupForm) -> Result<Group, RepositoryError> {
        if let Some(e) = self.injected_error() {
            return Err(e);
        }
        self.created.lock().unwrap().push(form.clone());
        let created = group(form.name.as_deref().unwrap_or_default(), form.description.as_deref());
        self.insert(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, form: &GroupForm) -> Result<Group, RepositoryError> {
        if let Some(e) = self.injected_error() {
            return Err(e);
        }
        self.updated.lock().unwrap().push((id, form.clone()));
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|g| g.id == id).ok_or_else(|| Self::not_found(id))?;
        if let Some(name) = &form.name {
            row.name = name.clone();
        }
        if let Some(description) = &form.description {
            row.description = Some(description.clone());
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        if let Some(e) = self.injected_error() {
            return Err(e);
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|g| g.id != id);
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Group, RepositoryError> {
        *self.lookups.lock().unwrap() += 1;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }
}

/// Returns the configured user for every session.
#[derive(Default)]
pub struct FixedUsers {
    current: Mutex<Option<User>>,
}

impl FixedUsers {
    pub fn set_current(&self, user: Option<User>) {
        *self.current.lock().unwrap() = user;
    }
}

#[async_trait]
impl UserRepository for FixedUsers {
    async fn get_current_user(&self, _session: &Session) -> Result<Option<User>, RepositoryError> {
        Ok(self.current.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct StaticPermissions {
    failure: Mutex<Option<RepositoryError>>,
}

impl StaticPermissions {
    /// The next call fails with `error`.
    pub fn fail_with(&self, error: RepositoryError) {
        *self.failure.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl PermissionRepository for StaticPermissions {
    async fn group_by_category(&self) -> Result<PermissionsByCategory, RepositoryError> {
        if let Some(e) = self.failure.lock().unwrap().take() {
            return Err(e);
        }
        let permission = |name: &str, category: &str| Permission {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            description: None,
        };
        Ok(group_by_category(vec![
            permission("usermanager.group.edit", "usermanager"),
            permission("usermanager.group.delete", "usermanager"),
            permission("admin", "general"),
        ]))
    }
}

pub struct Fixture {
    pub groups: Arc<MemoryGroups>,
    pub users: Arc<FixedUsers>,
    pub permissions: Arc<StaticPermissions>,
    pub events: Arc<BroadcastEventSink>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(MemoryGroups::default()),
            users: Arc::new(FixedUsers::default()),
            permissions: Arc::new(StaticPermissions::default()),
            events: Arc::new(BroadcastEventSink::new()),
        }
    }

    pub fn controller(&self) -> GroupController {
        let urls = UrlGenerator::new(PREFIX);
        GroupController::new(
            self.groups.clone(),
            self.users.clone(),
            self.permissions.clone(),
            self.events.clone(),
            Arc::new(AdminMenus::new(&urls)),
            urls,
        )
    }

    pub fn state(&self) -> AppState {
        AppState {
            controller: Arc::new(self.controller()),
            views: Arc::new(HtmlShellRenderer::new("Usermanager")),
        }
    }
}
