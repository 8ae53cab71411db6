//! Offset pagination primitives shared by query surfaces.

use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u32 = 15;
const MAX_PER_PAGE: u32 = 100;

/// A 1-based page request. `per_page` is clamped to `1..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
}

impl<T> Page<T> {
    /// Slice a fully-filtered result set down to the requested page.
    pub fn slice(matches: Vec<T>, request: PageRequest) -> Self {
        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(request.offset())
            .take(request.per_page as usize)
            .collect();
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }
}
