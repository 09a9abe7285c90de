//! Page/limit parsing for list endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while reading pagination parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("The limit parameter must be lower than 100")]
    LimitTooHigh(u32),
    #[error("The {field} parameter must be a positive integer, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// A validated page request. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Creates a page request, rejecting limits above [`MAX_LIMIT`].
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidNumber {
                field: "page",
                value: page.to_string(),
            });
        }
        if limit == 0 {
            return Err(PaginationError::InvalidNumber {
                field: "limit",
                value: limit.to_string(),
            });
        }
        if limit > MAX_LIMIT {
            return Err(PaginationError::LimitTooHigh(limit));
        }
        Ok(Self { page, limit })
    }

    /// Parses raw query string values, applying defaults for absent or empty ones.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = parse_param("page", page, DEFAULT_PAGE)?;
        let limit = parse_param("limit", limit, DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Slices an already ordered collection.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let Ok(offset) = usize::try_from(self.offset()) else {
            return Vec::new();
        };
        items
            .iter()
            .skip(offset)
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}

fn parse_param(field: &'static str, raw: Option<&str>, default: u32) -> Result<u32, PaginationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<u64>().map_or_else(
            |_| {
                Err(PaginationError::InvalidNumber {
                    field,
                    value: value.to_string(),
                })
            },
            // Anything past u32 is far above MAX_LIMIT anyway
            |n| Ok(u32::try_from(n).unwrap_or(u32::MAX)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::from_query(None, None).unwrap();
        assert_eq!(pagination, Pagination { page: 1, limit: 10 });
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let pagination = Pagination::from_query(Some(""), Some(" ")).unwrap();
        assert_eq!(pagination, Pagination::default());
    }

    #[test]
    fn test_limit_100_is_allowed() {
        assert!(Pagination::from_query(Some("1"), Some("100")).is_ok());
    }

    #[test]
    fn test_limit_101_is_rejected() {
        let err = Pagination::from_query(None, Some("101")).unwrap_err();
        assert_eq!(err, PaginationError::LimitTooHigh(101));
        assert_eq!(err.to_string(), "The limit parameter must be lower than 100");
    }

    #[test]
    fn test_huge_limit_is_rejected_as_too_high() {
        let err = Pagination::from_query(None, Some("99999999999")).unwrap_err();
        assert!(matches!(err, PaginationError::LimitTooHigh(_)));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let err = Pagination::from_query(Some("two"), None).unwrap_err();
        assert_eq!(
            err,
            PaginationError::InvalidNumber {
                field: "page",
                value: "two".to_string()
            }
        );
        assert!(Pagination::from_query(None, Some("-5")).is_err());
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(Pagination::from_query(Some("0"), None).is_err());
        assert!(Pagination::from_query(None, Some("0")).is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(3, 20).unwrap().offset(), 40);
    }

    #[test]
    fn test_apply_slices_items() {
        let items: Vec<i32> = (1..=25).collect();
        assert_eq!(Pagination::new(3, 10).unwrap().apply(&items), vec![21, 22, 23, 24, 25]);
        assert!(Pagination::new(4, 10).unwrap().apply(&items).is_empty());
    }
}
