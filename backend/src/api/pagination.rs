use potpourri_core::db::{page::DEFAULT_PAGE_SIZE, Page, PageParams};
use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// Query string of list and search routes.
///
/// Numbers that do not parse fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
    pub q: Option<String>,
}

fn int_or(v: &Option<String>, default: i64) -> i64 {
    v.as_deref()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ListQuery {
    pub fn parse(query: Option<&str>) -> Result<Self, ProcessError> {
        Ok(serde_urlencoded::from_str(query.unwrap_or(""))?)
    }

    pub fn page_params(&self) -> PageParams {
        PageParams::new(
            int_or(&self.page, 1),
            int_or(&self.per_page, DEFAULT_PAGE_SIZE as i64),
        )
    }

    /// Optional `search` filter of list routes.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Required `q` of search routes.
    pub fn term(&self) -> Result<&str, ProcessError> {
        self.q
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ProcessError::MissingSearchTerm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&Page<T>> for Pagination {
    fn from(p: &Page<T>) -> Self {
        Self {
            page: p.params.page,
            pages: p.pages(),
            per_page: p.params.page_size,
            total: p.total,
            has_next: p.has_next(),
            has_prev: p.has_prev(),
        }
    }
}
