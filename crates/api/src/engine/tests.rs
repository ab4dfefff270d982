//! Engine scenario tests over the in-memory store.
//!
//! Cast: user 1 is an admin, user 5 manages floor 10, users 2 and 3 are
//! residents. Room 100 (floor 11) belongs to user 2, room 200 (floor 10)
//! belongs to user 3, room 55 (floor 10) is empty and AVAILABLE.

use assert_matches::assert_matches;

use domus_core::error::CoreError;
use domus_core::request::RequestStatus;
use domus_core::room::{STATUS_AVAILABLE, STATUS_RESERVED, STATUS_SOLD};
use domus_db::models::request::NewRoomRequest;

use super::memory::MemStore;
use super::{change_room_owner, create_request, is_manager_of, transition_request, Actor};
use crate::error::AppError;

fn admin() -> Actor {
    Actor {
        user_id: 1,
        role: "admin".to_string(),
    }
}

fn resident(user_id: i64) -> Actor {
    Actor {
        user_id,
        role: "resident".to_string(),
    }
}

fn manager() -> Actor {
    Actor {
        user_id: 5,
        role: "manager".to_string(),
    }
}

fn store() -> MemStore {
    let mut store = MemStore::new();
    store
        .add_user(1)
        .add_user(2)
        .add_user(3)
        .add_user(5)
        .add_floor(10, 1, Some(5))
        .add_floor(11, 2, None)
        .add_room(100, 11, Some(2), STATUS_SOLD)
        .add_room(200, 10, Some(3), STATUS_SOLD)
        .add_room(55, 10, None, STATUS_AVAILABLE);
    store
}

fn swap_input() -> NewRoomRequest {
    NewRoomRequest {
        requester_id: 2,
        requester_room_id: Some(100),
        counterpart_id: Some(3),
        counterpart_room_id: 200,
    }
}

fn join_input() -> NewRoomRequest {
    NewRoomRequest {
        requester_id: 2,
        requester_room_id: None,
        counterpart_id: None,
        counterpart_room_id: 55,
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_join_request() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &join_input())
        .await
        .expect("join request should be created");

    assert_eq!(request.status, "PENDING");
    assert_eq!(request.requester_id, 2);
    assert_eq!(request.counterpart_id, None);
    assert_eq!(request.approver_id, None);
    // Creation has no side effects on the room.
    assert_eq!(store.rooms[&55].status, STATUS_AVAILABLE);
    assert_eq!(store.rooms[&55].occupant_id, None);
}

#[tokio::test]
async fn test_create_swap_request() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input())
        .await
        .expect("swap request should be created");
    assert_eq!(request.status, "PENDING");
    assert_eq!(request.counterpart_id, Some(3));
}

#[tokio::test]
async fn test_create_self_swap_rejected() {
    let mut store = store();
    let input = NewRoomRequest {
        counterpart_id: Some(2),
        ..swap_input()
    };
    let err = create_request(&mut store, &resident(2), &input).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidOperation(_)));
}

#[tokio::test]
async fn test_create_by_unrelated_user_forbidden() {
    let mut store = store();
    let err = create_request(&mut store, &resident(3), &join_input())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_by_target_floor_manager_allowed() {
    // Rooms 55 and 200 sit on floor 10, which user 5 manages.
    let mut store = store();
    assert!(create_request(&mut store, &manager(), &join_input()).await.is_ok());
}

#[tokio::test]
async fn test_create_by_manager_of_other_floor_forbidden() {
    // User 5 manages floor 10 but room 100 is on floor 11.
    let mut store = store();
    let input = NewRoomRequest {
        requester_id: 3,
        requester_room_id: Some(200),
        counterpart_id: Some(2),
        counterpart_room_id: 100,
    };
    let err = create_request(&mut store, &manager(), &input).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_requester_room_mismatch_conflicts() {
    let mut store = store();
    let input = NewRoomRequest {
        requester_room_id: Some(200), // room 200 belongs to user 3
        ..swap_input()
    };
    let err = create_request(&mut store, &resident(2), &input).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

#[tokio::test]
async fn test_create_missing_target_room_not_found() {
    let mut store = store();
    let input = NewRoomRequest {
        counterpart_room_id: 999,
        ..join_input()
    };
    let err = create_request(&mut store, &admin(), &input).await.unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::NotFound { entity: "Room", id: 999 })
    );
}

#[tokio::test]
async fn test_create_join_on_unavailable_room_conflicts() {
    let mut store = store();
    store.add_room(56, 10, None, STATUS_RESERVED);
    let input = NewRoomRequest {
        counterpart_room_id: 56,
        ..join_input()
    };
    let err = create_request(&mut store, &resident(2), &input).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

#[tokio::test]
async fn test_create_counterpart_room_owner_mismatch_conflicts() {
    let mut store = store();
    let input = NewRoomRequest {
        counterpart_id: Some(5), // room 200 is occupied by user 3, not 5
        ..swap_input()
    };
    let err = create_request(&mut store, &resident(2), &input).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

#[tokio::test]
async fn test_create_with_existing_active_request_conflicts() {
    let mut store = store();
    create_request(&mut store, &resident(2), &join_input())
        .await
        .expect("first request should be created");

    // Requester already active.
    let err = create_request(&mut store, &resident(2), &join_input())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

#[tokio::test]
async fn test_create_blocked_when_counterpart_is_active_elsewhere() {
    let mut store = store();
    // User 3 files a join request for room 55 and becomes active.
    let first = NewRoomRequest {
        requester_id: 3,
        requester_room_id: Some(200),
        counterpart_id: None,
        counterpart_room_id: 55,
    };
    create_request(&mut store, &resident(3), &first)
        .await
        .expect("first request should be created");

    // User 2 now tries to swap with user 3.
    let err = create_request(&mut store, &resident(2), &swap_input())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_accept_by_counterpart_leaves_approver_null() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let updated = transition_request(
        &mut store,
        &resident(3),
        request.id,
        RequestStatus::Accepted,
        None,
    )
    .await
    .expect("counterpart should be able to accept");

    assert_eq!(updated.status, "ACCEPTED");
    assert_eq!(updated.approver_id, None);
}

#[tokio::test]
async fn test_accept_by_admin_records_approver() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let updated = transition_request(&mut store, &admin(), request.id, RequestStatus::Accepted, None)
        .await
        .unwrap();
    assert_eq!(updated.approver_id, Some(1));
}

#[tokio::test]
async fn test_accept_by_requester_forbidden() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let err = transition_request(
        &mut store,
        &resident(2),
        request.id,
        RequestStatus::Accepted,
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[tokio::test]
async fn test_cancel_by_requester() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let updated = transition_request(
        &mut store,
        &resident(2),
        request.id,
        RequestStatus::Cancelled,
        None,
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "CANCELLED");
    assert_eq!(updated.approver_id, None);
}

#[tokio::test]
async fn test_decline_records_reason() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let updated = transition_request(
        &mut store,
        &resident(3),
        request.id,
        RequestStatus::Declined,
        Some("I like my room".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "DECLINED");
    assert_eq!(updated.closed_reason.as_deref(), Some("I like my room"));
    assert_eq!(updated.approver_id, None);
}

#[tokio::test]
async fn test_reject_by_floor_manager_from_accepted() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();
    transition_request(&mut store, &resident(3), request.id, RequestStatus::Accepted, None)
        .await
        .unwrap();

    let updated = transition_request(
        &mut store,
        &manager(),
        request.id,
        RequestStatus::Rejected,
        Some("Floor policy".to_string()),
    )
    .await
    .expect("manager of the target room's floor should be able to reject");

    assert_eq!(updated.status, "REJECTED");
    assert_eq!(updated.approver_id, Some(5));
    assert_eq!(updated.closed_reason.as_deref(), Some("Floor policy"));
}

#[tokio::test]
async fn test_no_op_transition_rejected() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let err = transition_request(&mut store, &admin(), request.id, RequestStatus::Pending, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidOperation(_)));
}

#[tokio::test]
async fn test_unknown_request_not_found() {
    let mut store = store();
    let err = transition_request(&mut store, &admin(), 404, RequestStatus::Accepted, None)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::NotFound { entity: "RoomRequest", .. })
    );
}

#[tokio::test]
async fn test_terminal_request_is_immutable() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();
    transition_request(
        &mut store,
        &resident(2),
        request.id,
        RequestStatus::Cancelled,
        None,
    )
    .await
    .unwrap();

    let err = transition_request(&mut store, &admin(), request.id, RequestStatus::Accepted, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidOperation(_)));
}

#[tokio::test]
async fn test_approve_swap_requires_accepted_first() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();

    let err = transition_request(&mut store, &admin(), request.id, RequestStatus::Approved, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidOperation(_)));
}

// ---------------------------------------------------------------------------
// Approval side effects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_approve_swap_transfers_both_rooms() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &swap_input()).await.unwrap();
    transition_request(&mut store, &resident(3), request.id, RequestStatus::Accepted, None)
        .await
        .unwrap();

    let updated = transition_request(&mut store, &admin(), request.id, RequestStatus::Approved, None)
        .await
        .expect("admin should approve an accepted swap");

    assert_eq!(updated.status, "APPROVED");
    assert_eq!(updated.approver_id, Some(1));

    // Rooms swap occupants.
    assert_eq!(store.rooms[&100].occupant_id, Some(3));
    assert_eq!(store.rooms[&200].occupant_id, Some(2));
    // Both rooms were already SOLD and stay so.
    assert_eq!(store.rooms[&100].status, STATUS_SOLD);
    assert_eq!(store.rooms[&200].status, STATUS_SOLD);
    // Each user now lives on their new room's floor.
    assert_eq!(store.users[&2].current_floor_id, Some(10));
    assert_eq!(store.users[&3].current_floor_id, Some(11));
}

#[tokio::test]
async fn test_approve_join_directly_from_pending() {
    let mut store = store();
    let request = create_request(&mut store, &resident(2), &join_input()).await.unwrap();

    let updated = transition_request(&mut store, &manager(), request.id, RequestStatus::Approved, None)
        .await
        .expect("join approval should not require ACCEPTED");

    assert_eq!(updated.status, "APPROVED");
    assert_eq!(updated.approver_id, Some(5));

    // The empty room is claimed and marked SOLD.
    assert_eq!(store.rooms[&55].occupant_id, Some(2));
    assert_eq!(store.rooms[&55].status, STATUS_SOLD);
    assert_eq!(store.users[&2].current_floor_id, Some(10));
}

#[tokio::test]
async fn test_approve_join_by_counterpart_floor_manager_only() {
    // Manager of floor 10 cannot approve a request targeting floor 11.
    let mut store = store();
    store.add_room(110, 11, None, STATUS_AVAILABLE);
    let input = NewRoomRequest {
        counterpart_room_id: 110,
        ..join_input()
    };
    let request = create_request(&mut store, &resident(2), &input).await.unwrap();

    let err = transition_request(&mut store, &manager(), request.id, RequestStatus::Approved, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

// ---------------------------------------------------------------------------
// change_room_owner
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_change_room_owner_null_room_is_noop() {
    let mut store = store();
    change_room_owner(&mut store, None, Some(2))
        .await
        .expect("null room id must be a structural no-op");
}

#[tokio::test]
async fn test_change_room_owner_vacate_resets_to_available() {
    let mut store = store();
    change_room_owner(&mut store, Some(200), None).await.unwrap();
    assert_eq!(store.rooms[&200].occupant_id, None);
    assert_eq!(store.rooms[&200].status, STATUS_AVAILABLE);
}

#[tokio::test]
async fn test_change_room_owner_missing_room_fails() {
    let mut store = store();
    let err = change_room_owner(&mut store, Some(999), Some(2)).await.unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::NotFound { entity: "Room", id: 999 })
    );
}

#[tokio::test]
async fn test_change_room_owner_missing_user_fails() {
    let mut store = store();
    let err = change_room_owner(&mut store, Some(55), Some(999)).await.unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::NotFound { entity: "User", id: 999 })
    );
}

// ---------------------------------------------------------------------------
// is_manager_of
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_is_manager_of_checks_role_and_assignment() {
    let mut store = store();

    // Manager of floor 10, room 200 is on floor 10.
    assert!(is_manager_of(&mut store, &manager(), 200).await.unwrap());
    // Room 100 is on floor 11, which has no manager.
    assert!(!is_manager_of(&mut store, &manager(), 100).await.unwrap());
    // An admin is not a floor manager; admin authority is separate.
    assert!(!is_manager_of(&mut store, &admin(), 200).await.unwrap());
    // A resident with the right id but wrong role.
    let impostor = Actor {
        user_id: 5,
        role: "resident".to_string(),
    };
    assert!(!is_manager_of(&mut store, &impostor, 200).await.unwrap());
    // A missing room resolves to false, not an error.
    assert!(!is_manager_of(&mut store, &manager(), 999).await.unwrap());
}
