//! Postgres binding of the engine ports.

use async_trait::async_trait;
use sqlx::PgConnection;

use domus_core::types::DbId;
use domus_db::models::floor::Floor;
use domus_db::models::request::{NewRoomRequest, Participant, RoomRequest};
use domus_db::models::room::Room;
use domus_db::models::user::User;
use domus_db::repositories::{FloorRepo, RequestRepo, RoomRepo, UserRepo};

use super::ports::{FloorDirectory, RequestStore, RoomDirectory, UserDirectory};

/// One unit of work over a single Postgres connection.
///
/// Handlers open a transaction, wrap its connection here, run one engine
/// operation, and commit. Every statement the engine issues -- existence
/// checks, room/user writes, the request row itself -- shares that
/// transaction, so a failure anywhere rolls back everything.
pub struct PgUnitOfWork<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgUnitOfWork<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RoomDirectory for PgUnitOfWork<'_> {
    async fn get_room(&mut self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        RoomRepo::find_by_id(&mut *self.conn, id).await
    }

    async fn save_room(&mut self, room: &Room) -> Result<(), sqlx::Error> {
        RoomRepo::set_occupancy(&mut *self.conn, room.id, room.occupant_id, &room.status)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgUnitOfWork<'_> {
    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(&mut *self.conn, id).await
    }

    async fn save_user(&mut self, user: &User) -> Result<(), sqlx::Error> {
        UserRepo::set_current_floor(&mut *self.conn, user.id, user.current_floor_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(())
    }
}

#[async_trait]
impl FloorDirectory for PgUnitOfWork<'_> {
    async fn get_floor(&mut self, id: DbId) -> Result<Option<Floor>, sqlx::Error> {
        FloorRepo::find_by_id(&mut *self.conn, id).await
    }
}

#[async_trait]
impl RequestStore for PgUnitOfWork<'_> {
    async fn insert_request(
        &mut self,
        input: &NewRoomRequest,
    ) -> Result<RoomRequest, sqlx::Error> {
        RequestRepo::insert(&mut *self.conn, input).await
    }

    async fn find_request(&mut self, id: DbId) -> Result<Option<RoomRequest>, sqlx::Error> {
        RequestRepo::find_by_id(&mut *self.conn, id).await
    }

    async fn update_request(&mut self, request: &RoomRequest) -> Result<(), sqlx::Error> {
        RequestRepo::update(&mut *self.conn, request)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(())
    }

    async fn exists_active(
        &mut self,
        participant_id: DbId,
        side: Participant,
    ) -> Result<bool, sqlx::Error> {
        RequestRepo::exists_active(&mut *self.conn, participant_id, side).await
    }
}
