//! Room status constants and validation helpers.
//!
//! Room statuses are stored as plain text; these constants are the single
//! source of truth for the accepted values, used by both the DB and API
//! layers.

/// The room has no occupant and can be claimed by a join request.
pub const STATUS_AVAILABLE: &str = "AVAILABLE";

/// The room is held back from requests (administrative hold).
pub const STATUS_RESERVED: &str = "RESERVED";

/// The room has an occupant.
pub const STATUS_SOLD: &str = "SOLD";

/// All valid room status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_AVAILABLE, STATUS_RESERVED, STATUS_SOLD];

/// Validate that a room status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid room status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}
