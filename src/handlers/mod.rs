//! HTTP handlers module
//!
//! One submodule per API surface; all handlers take the shared
//! application state and return `Result` so errors map onto HTTP
//! responses in one place.

use serde::Deserialize;

pub mod attendance;
pub mod audit;
pub mod exams;
pub mod health;
pub mod import;
pub mod lecturers;
pub mod pages;
pub mod users;

/// Common limit/offset query parameters for list endpoints
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination {
            limit: None,
            offset: None,
        };
        assert_eq!(pagination.limit(), 50);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_pagination_explicit_values() {
        let pagination = Pagination {
            limit: Some(10),
            offset: Some(30),
        };
        assert_eq!(pagination.limit(), 10);
        assert_eq!(pagination.offset(), 30);
    }
}
