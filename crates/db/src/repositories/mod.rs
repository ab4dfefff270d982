//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Every method is a single statement and takes `impl PgExecutor<'_>` as
//! its first argument, so it runs equally against a pool or against a
//! transaction connection -- the workflow engine relies on the latter to
//! keep its check-then-act sequences atomic.

pub mod floor_repo;
pub mod request_repo;
pub mod role_repo;
pub mod room_repo;
pub mod user_repo;

pub use floor_repo::FloorRepo;
pub use request_repo::RequestRepo;
pub use role_repo::RoleRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
