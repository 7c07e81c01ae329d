pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use controllers::groups::GroupController;
use services::view::ViewRenderer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<GroupController>,
    pub views: Arc<dyn ViewRenderer>,
}
