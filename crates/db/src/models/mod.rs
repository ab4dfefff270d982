//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches where applicable

pub mod floor;
pub mod request;
pub mod role;
pub mod room;
pub mod user;
