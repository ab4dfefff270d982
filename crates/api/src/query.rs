//! Shared query parameter types for API handlers.

use serde::Deserialize;

use domus_core::pagination::PageRequest;

/// Pagination + sort parameters (`?page=&size=&sort=<field>,<asc|desc>`).
///
/// Raw values are normalized through [`PageRequest::normalize`]; nothing is
/// rejected, only clamped or defaulted.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Normalize into a well-formed [`PageRequest`].
    pub fn normalize(&self) -> PageRequest {
        PageRequest::normalize(self.page, self.size, self.sort.as_deref())
    }
}

/// Query parameters for room listing (`?floor_id=`).
#[derive(Debug, Deserialize)]
pub struct RoomFilterParams {
    pub floor_id: Option<i64>,
}
