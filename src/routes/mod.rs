pub mod groups;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::AppState;

/// Named routes of the group admin, relative to the admin prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GroupIndex,
    GroupDatatable,
    GroupStore,
    GroupEdit,
    GroupUpdate,
    GroupDelete,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::GroupIndex => "usermanager.group.index",
            Route::GroupDatatable => "usermanager.group.datatable",
            Route::GroupStore => "usermanager.group.store",
            Route::GroupEdit => "usermanager.group.edit",
            Route::GroupUpdate => "usermanager.group.update",
            Route::GroupDelete => "usermanager.group.delete",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::GroupIndex | Route::GroupStore => "/group",
            Route::GroupDatatable => "/group/datatable",
            Route::GroupEdit => "/group/{id}/edit",
            Route::GroupUpdate | Route::GroupDelete => "/group/{id}",
        }
    }
}

/// Builds absolute URLs for named routes.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    prefix: String,
}

impl UrlGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `id` fills the `{id}` segment; routes without one ignore it.
    pub fn to(&self, route: Route, id: Option<Uuid>) -> String {
        let path = match id {
            Some(id) => route.path().replace("{id}", &id.to_string()),
            None => route.path().to_string(),
        };
        format!("{}{}", self.prefix, path)
    }
}

/// Group admin routes mounted under `prefix`.
pub fn router(state: AppState, prefix: &str) -> Router {
    let routes = Router::new()
        .route(
            Route::GroupIndex.path(),
            get(groups::index).post(groups::store),
        )
        .route(Route::GroupDatatable.path(), get(groups::datatable))
        .route(Route::GroupEdit.path(), get(groups::edit))
        .route(
            Route::GroupUpdate.path(),
            put(groups::update)
                .patch(groups::update)
                .delete(groups::delete)
                .post(groups::override_method),
        )
        .with_state(state);

    if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    }
}
