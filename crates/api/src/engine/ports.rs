//! Storage ports consumed by the workflow engine.
//!
//! The engine never touches a pool or a connection directly; it speaks to
//! these traits. Production binds them to one Postgres transaction via
//! [`super::pg::PgUnitOfWork`], the engine tests bind them to an in-memory
//! store. Methods take `&mut self` because an implementation is a unit of
//! work, not a shared handle.

use async_trait::async_trait;

use domus_core::types::DbId;
use domus_db::models::floor::Floor;
use domus_db::models::request::{NewRoomRequest, Participant, RoomRequest};
use domus_db::models::room::Room;
use domus_db::models::user::User;

/// Lookup/update of single room records.
#[async_trait]
pub trait RoomDirectory {
    async fn get_room(&mut self, id: DbId) -> Result<Option<Room>, sqlx::Error>;

    /// Persist a room's occupant and status.
    async fn save_room(&mut self, room: &Room) -> Result<(), sqlx::Error>;
}

/// Lookup/update of single user records.
#[async_trait]
pub trait UserDirectory {
    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    /// Persist a user's current floor.
    async fn save_user(&mut self, user: &User) -> Result<(), sqlx::Error>;
}

/// Lookup of single floor records (manager resolution).
#[async_trait]
pub trait FloorDirectory {
    async fn get_floor(&mut self, id: DbId) -> Result<Option<Floor>, sqlx::Error>;
}

/// Persistence for request records.
#[async_trait]
pub trait RequestStore {
    async fn insert_request(&mut self, input: &NewRoomRequest)
        -> Result<RoomRequest, sqlx::Error>;

    async fn find_request(&mut self, id: DbId) -> Result<Option<RoomRequest>, sqlx::Error>;

    async fn update_request(&mut self, request: &RoomRequest) -> Result<(), sqlx::Error>;

    /// Whether an active (`PENDING`/`ACCEPTED`) request exists with the
    /// given user on the given side.
    async fn exists_active(
        &mut self,
        participant_id: DbId,
        side: Participant,
    ) -> Result<bool, sqlx::Error>;
}

/// Everything the engine needs from storage, in one bound.
pub trait EngineStore:
    RoomDirectory + UserDirectory + FloorDirectory + RequestStore + Send
{
}

impl<T: RoomDirectory + UserDirectory + FloorDirectory + RequestStore + Send> EngineStore for T {}
