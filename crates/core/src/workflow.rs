//! The room-request transition table.
//!
//! The legal transition set is data, not control flow: each target status
//! has exactly one [`TransitionRule`] carrying its authorization predicate,
//! its allowed source statuses, and the fields it writes. The engine
//! computes a [`TransitionCtx`] (who the actor is relative to the request)
//! and calls [`check_transition`]; persistence never enters this module.

use crate::error::CoreError;
use crate::request::RequestStatus;

/// Relationship facts about the actor attempting a transition.
///
/// Computed by the engine from the loaded request and the floor/room
/// directories, so the authorization predicates stay pure functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionCtx {
    /// Actor holds the admin role.
    pub is_admin: bool,
    /// Actor is the request's requester.
    pub is_requester: bool,
    /// Actor is the request's counterpart.
    pub is_counterpart: bool,
    /// Actor manages the floor of the requester's current room.
    pub manages_requester_floor: bool,
    /// Actor manages the floor of the counterpart (target) room.
    pub manages_counterpart_floor: bool,
}

impl TransitionCtx {
    const fn is_involved_floor_manager(&self) -> bool {
        self.manages_requester_floor || self.manages_counterpart_floor
    }
}

/// Who gets recorded in `approver_id` when a transition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproverPolicy {
    /// Record the actor only when they acted as an admin (the participant
    /// resolving their own request leaves `approver_id` null).
    OnlyIfAdmin,
    /// Always record the actor (authority decisions).
    Actor,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    /// Status this rule transitions into.
    pub target: RequestStatus,
    /// Source statuses the transition is legal from.
    pub allowed_from: &'static [RequestStatus],
    /// Authorization predicate over the actor's relationship facts.
    pub authorize: fn(&TransitionCtx) -> bool,
    /// Whether the transition stores `closed_reason`.
    pub records_reason: bool,
    /// How `approver_id` is assigned.
    pub approver: ApproverPolicy,
    /// Whether the transition executes the room-ownership transfer.
    pub transfers_ownership: bool,
}

fn admin_or_requester(ctx: &TransitionCtx) -> bool {
    ctx.is_admin || ctx.is_requester
}

fn admin_or_counterpart(ctx: &TransitionCtx) -> bool {
    ctx.is_admin || ctx.is_counterpart
}

fn admin_or_floor_manager(ctx: &TransitionCtx) -> bool {
    ctx.is_admin || ctx.is_involved_floor_manager()
}

/// The full legal transition set. `PENDING` is deliberately absent as a
/// target: no request ever transitions back into it.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        target: RequestStatus::Cancelled,
        allowed_from: &[RequestStatus::Pending],
        authorize: admin_or_requester,
        records_reason: false,
        approver: ApproverPolicy::OnlyIfAdmin,
        transfers_ownership: false,
    },
    TransitionRule {
        target: RequestStatus::Accepted,
        allowed_from: &[RequestStatus::Pending],
        authorize: admin_or_counterpart,
        records_reason: false,
        approver: ApproverPolicy::OnlyIfAdmin,
        transfers_ownership: false,
    },
    TransitionRule {
        target: RequestStatus::Declined,
        allowed_from: &[RequestStatus::Pending],
        authorize: admin_or_counterpart,
        records_reason: true,
        approver: ApproverPolicy::OnlyIfAdmin,
        transfers_ownership: false,
    },
    TransitionRule {
        target: RequestStatus::Rejected,
        allowed_from: &[RequestStatus::Pending, RequestStatus::Accepted],
        authorize: admin_or_floor_manager,
        records_reason: true,
        approver: ApproverPolicy::Actor,
        transfers_ownership: false,
    },
    TransitionRule {
        target: RequestStatus::Approved,
        allowed_from: &[RequestStatus::Accepted],
        authorize: admin_or_floor_manager,
        records_reason: false,
        approver: ApproverPolicy::Actor,
        transfers_ownership: true,
    },
];

/// Look up the rule for a target status, if one exists.
pub fn rule_for(target: RequestStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|rule| rule.target == target)
}

/// Validate a requested transition, returning its rule when legal.
///
/// Check order matches the update contract: no-op target first, then rule
/// existence, then actor authorization, then the state precondition.
///
/// `has_counterpart` carries the one intentional asymmetry in the table:
/// a join request (no counterpart) has nobody to accept it, so `APPROVED`
/// is additionally legal straight from `PENDING` for those requests.
///
/// # Errors
///
/// - [`CoreError::InvalidOperation`] for a no-op target, a target with no
///   rule (`PENDING`), or a source status outside `allowed_from`.
/// - [`CoreError::Forbidden`] when the actor fails the rule's predicate.
pub fn check_transition(
    current: RequestStatus,
    target: RequestStatus,
    has_counterpart: bool,
    ctx: &TransitionCtx,
) -> Result<&'static TransitionRule, CoreError> {
    if current == target {
        return Err(CoreError::InvalidOperation(format!(
            "Request is already {current}"
        )));
    }

    let rule = rule_for(target).ok_or_else(|| {
        CoreError::InvalidOperation(format!("Transition to {target} is not permitted"))
    })?;

    if !(rule.authorize)(ctx) {
        return Err(CoreError::Forbidden(format!(
            "Not allowed to move this request to {target}"
        )));
    }

    let from_allowed = rule.allowed_from.contains(&current)
        || (rule.target == RequestStatus::Approved
            && !has_counterpart
            && current == RequestStatus::Pending);

    if !from_allowed {
        return Err(CoreError::InvalidOperation(format!(
            "Cannot move a {current} request to {target}"
        )));
    }

    Ok(rule)
}
