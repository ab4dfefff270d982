//! In-memory binding of the engine ports for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use domus_core::request::RequestStatus;
use domus_core::types::DbId;
use domus_db::models::floor::Floor;
use domus_db::models::request::{NewRoomRequest, Participant, RoomRequest};
use domus_db::models::room::Room;
use domus_db::models::user::User;

use super::ports::{FloorDirectory, RequestStore, RoomDirectory, UserDirectory};

/// HashMap-backed store; inserts assign sequential request ids like the
/// database would.
#[derive(Default)]
pub struct MemStore {
    pub rooms: HashMap<DbId, Room>,
    pub users: HashMap<DbId, User>,
    pub floors: HashMap<DbId, Floor>,
    pub requests: HashMap<DbId, RoomRequest>,
    next_request_id: DbId,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, id: DbId) -> &mut Self {
        self.users.insert(id, test_user(id));
        self
    }

    pub fn add_floor(&mut self, id: DbId, level: i32, manager_id: Option<DbId>) -> &mut Self {
        self.floors.insert(id, test_floor(id, level, manager_id));
        self
    }

    pub fn add_room(
        &mut self,
        id: DbId,
        floor_id: DbId,
        occupant_id: Option<DbId>,
        status: &str,
    ) -> &mut Self {
        self.rooms
            .insert(id, test_room(id, floor_id, occupant_id, status));
        self
    }
}

pub fn test_user(id: DbId) -> User {
    let now = chrono::Utc::now();
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        password_hash: "$argon2id$test".to_string(),
        role_id: 3,
        is_active: true,
        current_floor_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_floor(id: DbId, level: i32, manager_id: Option<DbId>) -> Floor {
    let now = chrono::Utc::now();
    Floor {
        id,
        level,
        name: format!("Floor {level}"),
        manager_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_room(id: DbId, floor_id: DbId, occupant_id: Option<DbId>, status: &str) -> Room {
    let now = chrono::Utc::now();
    Room {
        id,
        floor_id,
        number: id as i32,
        status: status.to_string(),
        occupant_id,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl RoomDirectory for MemStore {
    async fn get_room(&mut self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        Ok(self.rooms.get(&id).cloned())
    }

    async fn save_room(&mut self, room: &Room) -> Result<(), sqlx::Error> {
        if !self.rooms.contains_key(&room.id) {
            return Err(sqlx::Error::RowNotFound);
        }
        self.rooms.insert(room.id, room.clone());
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemStore {
    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.get(&id).cloned())
    }

    async fn save_user(&mut self, user: &User) -> Result<(), sqlx::Error> {
        if !self.users.contains_key(&user.id) {
            return Err(sqlx::Error::RowNotFound);
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl FloorDirectory for MemStore {
    async fn get_floor(&mut self, id: DbId) -> Result<Option<Floor>, sqlx::Error> {
        Ok(self.floors.get(&id).cloned())
    }
}

#[async_trait]
impl RequestStore for MemStore {
    async fn insert_request(
        &mut self,
        input: &NewRoomRequest,
    ) -> Result<RoomRequest, sqlx::Error> {
        self.next_request_id += 1;
        let now = chrono::Utc::now();
        let request = RoomRequest {
            id: self.next_request_id,
            requester_id: input.requester_id,
            requester_room_id: input.requester_room_id,
            counterpart_id: input.counterpart_id,
            counterpart_room_id: input.counterpart_room_id,
            approver_id: None,
            status: RequestStatus::Pending.as_str().to_string(),
            closed_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_request(&mut self, id: DbId) -> Result<Option<RoomRequest>, sqlx::Error> {
        Ok(self.requests.get(&id).cloned())
    }

    async fn update_request(&mut self, request: &RoomRequest) -> Result<(), sqlx::Error> {
        if !self.requests.contains_key(&request.id) {
            return Err(sqlx::Error::RowNotFound);
        }
        let mut stored = request.clone();
        stored.updated_at = chrono::Utc::now();
        self.requests.insert(stored.id, stored);
        Ok(())
    }

    async fn exists_active(
        &mut self,
        participant_id: DbId,
        side: Participant,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.requests.values().any(|r| {
            let on_side = match side {
                Participant::Requester => r.requester_id == participant_id,
                Participant::Counterpart => r.counterpart_id == Some(participant_id),
            };
            on_side && matches!(r.status.as_str(), "PENDING" | "ACCEPTED")
        }))
    }
}
