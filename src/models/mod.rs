pub mod auth;
pub mod datatable;
pub mod group;
pub mod menu;
pub mod permission;
pub mod user;
pub mod view;
