//! Pagination and sort normalization for list endpoints.
//!
//! The API accepts `?page=&size=&sort=<field>,<asc|desc>`. Everything is
//! normalized here before it reaches a repository: page clamped to >= 0,
//! size clamped to 1..=[`MAX_PAGE_SIZE`], sort parsed against a fixed
//! whitelist with unknown fields falling back to `id` ascending.

use serde::Serialize;

/// Upper bound on page size; larger values are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Default page size when none is supplied.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Sortable request fields. Each maps to exactly one database column, so a
/// sort string can never inject SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Status,
    Created,
    Updated,
}

impl SortField {
    /// The database column backing this field.
    pub const fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Status => "status",
            SortField::Created => "created_at",
            SortField::Updated => "updated_at",
        }
    }

    /// Parse an API field name; unknown names fall back to `id`.
    fn parse(s: &str) -> Self {
        match s {
            "status" => SortField::Status,
            "created" => SortField::Created,
            "updated" => SortField::Updated,
            _ => SortField::Id,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// A fully normalized page request, safe to hand to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub field: SortField,
    pub dir: SortDir,
}

impl PageRequest {
    /// Normalize raw query values into a well-formed page request.
    pub fn normalize(page: Option<i64>, size: Option<i64>, sort: Option<&str>) -> Self {
        let page = page.unwrap_or(0).max(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let (field, dir) = parse_sort(sort.unwrap_or_default());
        PageRequest {
            page,
            size,
            field,
            dir,
        }
    }

    /// `ORDER BY` fragment, built from whitelisted values only.
    pub fn order_by(&self) -> String {
        format!("{} {}", self.field.column(), self.dir.as_sql())
    }

    /// Row offset of the first element on this page.
    pub const fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/// Parse a `"<field>,<asc|desc>"` sort string.
///
/// Both parts are optional; anything unrecognized falls back to the
/// default of `id` ascending rather than failing the request.
fn parse_sort(sort: &str) -> (SortField, SortDir) {
    let mut parts = sort.split(',');
    let field = SortField::parse(parts.next().unwrap_or("").trim());
    let dir = match parts.next().map(str::trim) {
        Some(d) if d.eq_ignore_ascii_case("desc") => SortDir::Desc,
        _ => SortDir::Asc,
    };
    (field, dir)
}

/// Number of pages needed for `total` rows, floored at 1.
pub fn total_pages(total: i64, size: i64) -> i64 {
    if total <= 0 {
        return 1;
    }
    (total + size - 1) / size
}

/// The `{ content, page, size, totalElements, totalPages }` envelope
/// returned by paged list endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T: Serialize> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Page<T> {
    /// Assemble a page envelope from one fetched page and the total count.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Page {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_pages(total_elements, request.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::normalize(None, None, None);
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.field, SortField::Id);
        assert_eq!(req.dir, SortDir::Asc);
        assert_eq!(req.order_by(), "id ASC");
    }

    #[test]
    fn test_negative_page_clamped_to_zero() {
        let req = PageRequest::normalize(Some(-3), Some(10), None);
        assert_eq!(req.page, 0);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_size_clamped_to_bounds() {
        assert_eq!(PageRequest::normalize(None, Some(0), None).size, 1);
        assert_eq!(PageRequest::normalize(None, Some(-5), None).size, 1);
        assert_eq!(
            PageRequest::normalize(None, Some(10_000), None).size,
            MAX_PAGE_SIZE
        );
    }

    #[test]
    fn test_sort_parsing() {
        let req = PageRequest::normalize(None, None, Some("created,desc"));
        assert_eq!(req.field, SortField::Created);
        assert_eq!(req.dir, SortDir::Desc);
        assert_eq!(req.order_by(), "created_at DESC");
    }

    #[test]
    fn test_unknown_sort_field_falls_back_to_id() {
        let req = PageRequest::normalize(None, None, Some("password_hash,desc"));
        assert_eq!(req.field, SortField::Id);
        assert_eq!(req.dir, SortDir::Desc);
    }

    #[test]
    fn test_missing_direction_defaults_to_asc() {
        let req = PageRequest::normalize(None, None, Some("status"));
        assert_eq!(req.field, SortField::Status);
        assert_eq!(req.dir, SortDir::Asc);
    }

    #[test]
    fn test_garbage_sort_string_is_harmless() {
        let req = PageRequest::normalize(None, None, Some("id; DROP TABLE users,down"));
        assert_eq!(req.order_by(), "id ASC");
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::normalize(Some(3), Some(25), None);
        assert_eq!(req.offset(), 75);
    }

    #[test]
    fn test_total_pages_math() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(41, 20), 3);
    }

    #[test]
    fn test_page_envelope() {
        let req = PageRequest::normalize(Some(1), Some(2), None);
        let page = Page::new(vec![10_i64, 20], &req, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }
}
