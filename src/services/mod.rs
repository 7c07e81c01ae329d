pub mod events;
pub mod groups;
pub mod menu;
pub mod metrics;
pub mod permissions;
pub mod users;
pub mod view;
