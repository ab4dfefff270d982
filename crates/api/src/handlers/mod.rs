//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod floors;
pub mod requests;
pub mod rooms;
pub mod users;
