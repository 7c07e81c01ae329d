use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::RepositoryError,
    models::{
        auth::Session,
        datatable::{DatatableRequest, DatatableResponse},
        group::{Group, GroupColumn, GroupForm},
        user::{User, ADMIN},
        view::View,
    },
    routes::{Route, UrlGenerator},
    services::{
        events::{AdminEvent, EventSink},
        groups::GroupRepository,
        menu::{Navigation, ADMIN_SIDEBAR},
        metrics,
        permissions::PermissionRepository,
        users::UserRepository,
        view::escape_html,
    },
};

pub const INDEX_TEMPLATE: &str = "@usermanager/group/index";
pub const MANAGE_GROUP_ITEM: &str = "user-manager.manage-group";
pub const EDIT_RIGHT: &str = "usermanager.group.edit";
pub const DELETE_RIGHT: &str = "usermanager.group.delete";

const PAGE_TITLE: &str = "Manage Groups";
const GROUP_COLUMNS: [GroupColumn; 3] = [GroupColumn::Name, GroupColumn::Description, GroupColumn::Id];

/// Result of a create, update or delete submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Success {
        message: &'static str,
    },
    Failure {
        summary: &'static str,
        message: String,
        code: i64,
    },
}

/// Result of fetching a group for its edit form.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Group(Group),
    /// The form data is only served to asynchronous requests.
    UnsupportedRequestMode,
}

#[derive(Debug, Clone, Copy)]
enum WriteAction {
    Create,
    Update,
    Delete,
}

impl WriteAction {
    fn as_str(self) -> &'static str {
        match self {
            WriteAction::Create => "create",
            WriteAction::Update => "update",
            WriteAction::Delete => "delete",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            WriteAction::Create => "Group has been created",
            WriteAction::Update => "Group has been updated",
            WriteAction::Delete => "Group has been deleted",
        }
    }

    fn failure_summary(self) -> &'static str {
        match self {
            WriteAction::Create => "Error occured while creating group",
            WriteAction::Update => "Error occured while updating group",
            WriteAction::Delete => "Error occured while deleting group",
        }
    }
}

/// Group management pages of the admin panel.
///
/// Holds no per-request state; every collaborator is injected.
pub struct GroupController {
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    permissions: Arc<dyn PermissionRepository>,
    events: Arc<dyn EventSink>,
    navigation: Arc<dyn Navigation>,
    urls: UrlGenerator,
}

impl GroupController {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        permissions: Arc<dyn PermissionRepository>,
        events: Arc<dyn EventSink>,
        navigation: Arc<dyn Navigation>,
        urls: UrlGenerator,
    ) -> Self {
        Self {
            groups,
            users,
            permissions,
            events,
            navigation,
            urls,
        }
    }

    /// Listing page. Lookup failures propagate to the caller.
    pub async fn index(&self, session: &Session) -> Result<View, RepositoryError> {
        self.events.notify(&AdminEvent::DashboardInit);
        let sidebar = self.navigation.activate(ADMIN_SIDEBAR, MANAGE_GROUP_ITEM);

        let current_user = self.users.get_current_user(session).await?;
        let permissions = self.permissions.group_by_category().await?;

        Ok(View::make(INDEX_TEMPLATE)
            .with("title", PAGE_TITLE)
            .with("page_title", PAGE_TITLE)
            .with("current_user", current_user)
            .with("permissions", permissions)
            .with("sidebar", sidebar))
    }

    /// Data-table feed: `[name, description, actions]` per group, in the
    /// order the repository returns them.
    pub async fn datatable(
        &self,
        session: &Session,
        request: DatatableRequest,
    ) -> Result<DatatableResponse, RepositoryError> {
        let current_user = self.users.get_current_user(session).await?;
        let can_edit = has_any_access(current_user.as_ref(), &[ADMIN, EDIT_RIGHT]);
        let can_delete = has_any_access(current_user.as_ref(), &[ADMIN, DELETE_RIGHT]);

        let draw = request.draw();
        let query = request.into_query(&GROUP_COLUMNS, GroupColumn::Name);
        let page = self.groups.datatable(&query).await?;

        let data = page
            .rows
            .into_iter()
            .map(|group| {
                let edit = if can_edit {
                    self.edit_button(group.id)
                } else {
                    String::new()
                };
                let delete = if can_delete {
                    self.delete_button(group.id)
                } else {
                    String::new()
                };
                vec![
                    group.name,
                    group.description.unwrap_or_default(),
                    edit + &delete,
                ]
            })
            .collect();

        Ok(DatatableResponse {
            draw,
            records_total: page.records_total,
            records_filtered: page.records_filtered,
            data,
        })
    }

    pub async fn store(&self, payload: &Map<String, Value>) -> WriteOutcome {
        let form = GroupForm::from_payload(payload);
        let result = self.groups.create(&form).await.map(|group| {
            info!(group_id = %group.id, "group created: {}", group.name);
        });
        finish(WriteAction::Create, result)
    }

    pub async fn edit(&self, id: Uuid, ajax: bool) -> Result<EditOutcome, RepositoryError> {
        if !ajax {
            return Ok(EditOutcome::UnsupportedRequestMode);
        }
        self.groups.find_by_id(id).await.map(EditOutcome::Group)
    }

    pub async fn update(&self, id: Uuid, payload: &Map<String, Value>) -> WriteOutcome {
        let form = GroupForm::from_payload(payload);
        let result = self.groups.update(id, &form).await.map(|group| {
            info!(group_id = %group.id, "group updated: {}", group.name);
        });
        finish(WriteAction::Update, result)
    }

    pub async fn delete(&self, id: Uuid) -> WriteOutcome {
        let result = self.groups.delete(id).await.map(|()| {
            info!(group_id = %id, "group deleted");
        });
        finish(WriteAction::Delete, result)
    }

    fn edit_button(&self, id: Uuid) -> String {
        format!(
            r#"<button href="{}" class="btn btn-xs btn-primary btn-edit" style="margin-right: 5px">edit</button>"#,
            escape_html(&self.urls.to(Route::GroupEdit, Some(id)))
        )
    }

    fn delete_button(&self, id: Uuid) -> String {
        format!(
            r#"<button href="{}" class="btn btn-xs btn-danger btn-delete" style="margin-right: 5px">delete</button>"#,
            escape_html(&self.urls.to(Route::GroupDelete, Some(id)))
        )
    }
}

fn has_any_access(user: Option<&User>, rights: &[&str]) -> bool {
    user.is_some_and(|u| u.has_any_access(rights))
}

fn finish(action: WriteAction, result: Result<(), RepositoryError>) -> WriteOutcome {
    match result {
        Ok(()) => {
            metrics::record_group_write(action.as_str(), true);
            WriteOutcome::Success {
                message: action.success_message(),
            }
        }
        Err(e) => {
            metrics::record_group_write(action.as_str(), false);
            warn!(action = action.as_str(), code = e.code(), "group write failed: {e}");
            WriteOutcome::Failure {
                summary: action.failure_summary(),
                message: e.to_string(),
                code: e.code(),
            }
        }
    }
}
