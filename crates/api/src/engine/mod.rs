//! The floor-request workflow engine.
//!
//! Orchestrates request creation, transition authorization, and the
//! room-ownership transfer that fires on approval. All storage access goes
//! through the ports in [`ports`]; the caller supplies the actor explicitly,
//! so the engine reads no ambient identity. Each public operation expects to
//! run inside a single unit of work -- the HTTP handlers open a transaction,
//! wrap it in a [`pg::PgUnitOfWork`], and commit only on success.

pub mod pg;
pub mod ports;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod tests;

use domus_core::error::CoreError;
use domus_core::request::RequestStatus;
use domus_core::roles::{ROLE_ADMIN, ROLE_MANAGER};
use domus_core::room::{STATUS_AVAILABLE, STATUS_SOLD};
use domus_core::types::DbId;
use domus_core::workflow::{check_transition, ApproverPolicy, TransitionCtx};
use domus_db::models::request::{NewRoomRequest, Participant, RoomRequest};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use ports::{EngineStore, FloorDirectory, RoomDirectory, UserDirectory};

/// The caller of an engine operation: identity plus role name.
///
/// Always passed explicitly -- never read from thread-local or global state.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_manager(&self) -> bool {
        self.role == ROLE_MANAGER
    }
}

impl From<AuthUser> for Actor {
    fn from(user: AuthUser) -> Self {
        Actor {
            user_id: user.user_id,
            role: user.role,
        }
    }
}

/// Whether the actor manages the floor that contains `room_id`.
///
/// True only when the actor holds the manager role AND the room's floor
/// records the actor as its manager. A missing room or floor simply yields
/// `false` -- the caller decides whether that amounts to Forbidden.
pub async fn is_manager_of<S>(store: &mut S, actor: &Actor, room_id: DbId) -> AppResult<bool>
where
    S: RoomDirectory + FloorDirectory + Send,
{
    if !actor.is_manager() {
        return Ok(false);
    }
    let Some(room) = store.get_room(room_id).await? else {
        return Ok(false);
    };
    let Some(floor) = store.get_floor(room.floor_id).await? else {
        return Ok(false);
    };
    Ok(floor.manager_id == Some(actor.user_id))
}

/// Create a room request. Validation runs in a fixed order; nothing on
/// rooms or users is mutated here -- side effects happen only at approval.
///
/// # Errors
///
/// - `InvalidOperation` -- requester and counterpart are the same user.
/// - `Forbidden` -- caller is neither admin, nor the requester, nor the
///   manager of the target room's floor.
/// - `NotFound` -- a referenced room does not exist.
/// - `Conflict` -- room-ownership mismatch, target room not available, or
///   either participant already has an active request.
pub async fn create_request<S: EngineStore>(
    store: &mut S,
    actor: &Actor,
    input: &NewRoomRequest,
) -> AppResult<RoomRequest> {
    // Self-swap is meaningless regardless of who asks.
    if input.counterpart_id == Some(input.requester_id) {
        return Err(CoreError::InvalidOperation(
            "Requester and counterpart must be different users".into(),
        )
        .into());
    }

    // Admins and the requester themself may always file; a floor manager may
    // file on behalf of residents for rooms on their own floor.
    let permitted = actor.is_admin()
        || actor.user_id == input.requester_id
        || is_manager_of(store, actor, input.counterpart_room_id).await?;
    if !permitted {
        return Err(CoreError::Forbidden(
            "Not allowed to create a request for this user".into(),
        )
        .into());
    }

    // The requester's own room, when given, must really be theirs.
    if let Some(room_id) = input.requester_room_id {
        let room = store
            .get_room(room_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Room",
                id: room_id,
            })?;
        if room.occupant_id != Some(input.requester_id) {
            return Err(CoreError::Conflict(format!(
                "Room {room_id} is not occupied by user {}",
                input.requester_id
            ))
            .into());
        }
    }

    // The target room must exist and be consistent with the counterpart:
    // unowned rooms must be AVAILABLE, owned rooms must belong to the
    // counterpart.
    let target = store
        .get_room(input.counterpart_room_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Room",
            id: input.counterpart_room_id,
        })?;
    match input.counterpart_id {
        None => {
            if target.status != STATUS_AVAILABLE {
                return Err(CoreError::Conflict(format!(
                    "Room {} is not available",
                    target.id
                ))
                .into());
            }
        }
        Some(counterpart_id) => {
            if target.occupant_id != Some(counterpart_id) {
                return Err(CoreError::Conflict(format!(
                    "Room {} is not occupied by user {counterpart_id}",
                    target.id
                ))
                .into());
            }
        }
    }

    // One active request per participant, on either side.
    ensure_no_active_request(store, input.requester_id).await?;
    if let Some(counterpart_id) = input.counterpart_id {
        ensure_no_active_request(store, counterpart_id).await?;
    }

    let request = store.insert_request(input).await?;

    tracing::info!(
        request_id = request.id,
        requester_id = request.requester_id,
        counterpart_id = ?request.counterpart_id,
        counterpart_room_id = request.counterpart_room_id,
        "Room request created"
    );

    Ok(request)
}

/// Reject creation when the user appears on either side of any active
/// (`PENDING`/`ACCEPTED`) request.
async fn ensure_no_active_request<S: EngineStore>(store: &mut S, user_id: DbId) -> AppResult<()> {
    for side in [Participant::Requester, Participant::Counterpart] {
        if store.exists_active(user_id, side).await? {
            return Err(CoreError::Conflict(format!(
                "User {user_id} is already involved in an active request"
            ))
            .into());
        }
    }
    Ok(())
}

/// Move a request to `target`, enforcing the transition table and executing
/// the ownership transfer when the target is `APPROVED`.
///
/// The transfer runs *before* the request row is written, inside the same
/// unit of work: if moving a room fails, no status change is persisted.
pub async fn transition_request<S: EngineStore>(
    store: &mut S,
    actor: &Actor,
    request_id: DbId,
    target: RequestStatus,
    reason: Option<String>,
) -> AppResult<RoomRequest> {
    let request = store
        .find_request(request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "RoomRequest",
            id: request_id,
        })?;

    let current: RequestStatus = request.status.parse().map_err(|_| {
        CoreError::Internal(format!(
            "Request {request_id} has corrupt status '{}'",
            request.status
        ))
    })?;

    let ctx = transition_ctx(store, actor, &request).await?;
    let rule = check_transition(current, target, request.counterpart_id.is_some(), &ctx)?;

    if rule.transfers_ownership {
        // Requester's former room goes to the counterpart (vacated when
        // there is no counterpart); the target room goes to the requester.
        change_room_owner(store, request.requester_room_id, request.counterpart_id).await?;
        change_room_owner(store, Some(request.counterpart_room_id), Some(request.requester_id))
            .await?;
    }

    let mut updated = request;
    updated.status = target.as_str().to_string();
    if rule.records_reason {
        updated.closed_reason = reason;
    }
    match rule.approver {
        ApproverPolicy::OnlyIfAdmin => {
            if ctx.is_admin {
                updated.approver_id = Some(actor.user_id);
            }
        }
        ApproverPolicy::Actor => updated.approver_id = Some(actor.user_id),
    }

    store.update_request(&updated).await?;

    tracing::info!(
        request_id = updated.id,
        from = %current,
        to = %target,
        actor_id = actor.user_id,
        "Room request transitioned"
    );

    Ok(updated)
}

/// Compute the actor's relationship facts for the transition guards.
async fn transition_ctx<S: EngineStore>(
    store: &mut S,
    actor: &Actor,
    request: &RoomRequest,
) -> AppResult<TransitionCtx> {
    let (manages_requester_floor, manages_counterpart_floor) = if actor.is_manager() {
        let counterpart = is_manager_of(store, actor, request.counterpart_room_id).await?;
        let requester = match request.requester_room_id {
            Some(room_id) => is_manager_of(store, actor, room_id).await?,
            None => false,
        };
        (requester, counterpart)
    } else {
        (false, false)
    };

    Ok(TransitionCtx {
        is_admin: actor.is_admin(),
        is_requester: actor.user_id == request.requester_id,
        is_counterpart: request.counterpart_id == Some(actor.user_id),
        manages_requester_floor,
        manages_counterpart_floor,
    })
}

/// Hand a room to a new owner (or vacate it), keeping the room status and
/// the owner's current floor consistent.
///
/// A `None` room id is a structural no-op: a join request has no former
/// room to vacate. Claiming an `AVAILABLE` room marks it `SOLD`; removing
/// the occupant always resets it to `AVAILABLE`.
pub async fn change_room_owner<S>(
    store: &mut S,
    room_id: Option<DbId>,
    new_owner_id: Option<DbId>,
) -> AppResult<()>
where
    S: RoomDirectory + UserDirectory + Send,
{
    let Some(room_id) = room_id else {
        return Ok(());
    };

    let mut room = store
        .get_room(room_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        })?;

    if new_owner_id.is_none() {
        room.status = STATUS_AVAILABLE.to_string();
    } else if room.status == STATUS_AVAILABLE {
        room.status = STATUS_SOLD.to_string();
    }
    room.occupant_id = new_owner_id;
    store.save_room(&room).await?;

    if let Some(owner_id) = new_owner_id {
        let mut owner = store
            .get_user(owner_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: owner_id,
            })?;
        owner.current_floor_id = Some(room.floor_id);
        store.save_user(&owner).await?;
    }

    Ok(())
}
