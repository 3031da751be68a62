// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page arithmetic for list queries.
//!
//! A list query is described by a [`PageRequest`] (1-based page number and
//! page size). The store is asked for a `skip`/`take` window derived from the
//! request, and the returned total count is turned into page metadata by
//! [`compute_page`].

use serde::Serialize;

/// Page number used when the caller supplies none or a non-positive value.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller supplies none or a non-positive value.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A normalized page request.
///
/// Both fields are guaranteed to be at least 1. The fields are private so a
/// zero page size cannot be constructed through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Builds a page request from raw, possibly absent, caller input.
    ///
    /// Absent or non-positive values fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page: u64 = page
            .and_then(|p| u64::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PAGE);
        let page_size: u64 = page_size
            .and_then(|s| u64::try_from(s).ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, page_size }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows the store should skip: `(page - 1) * page_size`.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of rows the store should return.
    #[must_use]
    pub const fn take(&self) -> u64 {
        self.page_size
    }

    /// The `(skip, take)` window handed to the store.
    #[must_use]
    pub const fn window(&self) -> (u64, u64) {
        (self.skip(), self.take())
    }
}

/// Page metadata derived from a total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// `ceil(total / page_size)`, zero when there are no items.
    pub total_pages: u64,
    /// 1-based index of the first item on the page, zero when empty.
    pub range_start: u64,
    /// 1-based index of the last item on the page.
    pub range_end: u64,
}

/// Computes page metadata for a total count.
///
/// # Preconditions
///
/// `page` and `page_size` must both be at least 1; callers obtain them from
/// a [`PageRequest`]. A zero `page_size` yields all-zero bounds rather than
/// a division by zero.
///
/// A page beyond the last one is not clamped: `range_start` then exceeds
/// `range_end`, which tells the client the page is past the end.
#[must_use]
pub const fn compute_page(total: u64, page: u64, page_size: u64) -> PageBounds {
    if page_size == 0 {
        return PageBounds {
            total_pages: 0,
            range_start: 0,
            range_end: 0,
        };
    }

    let total_pages: u64 = total.div_ceil(page_size);
    let range_start: u64 = if total == 0 {
        0
    } else {
        page.saturating_sub(1).saturating_mul(page_size).saturating_add(1)
    };
    let page_end: u64 = page.saturating_mul(page_size);
    let range_end: u64 = if page_end < total { page_end } else { total };

    PageBounds {
        total_pages,
        range_start,
        range_end,
    }
}

/// One page of results together with its metadata.
///
/// Constructed fresh for every list query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    /// The items on this page, in store order.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total_count: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Requested page size.
    pub page_size: u64,
    /// Requested page number.
    pub current_page: u64,
    /// 1-based index of the first item on the page, zero when empty.
    pub range_start: u64,
    /// 1-based index of the last item on the page.
    pub range_end: u64,
}

impl<T> PageResult<T> {
    /// Builds a page result from the store output and the request that
    /// produced it.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        let bounds: PageBounds =
            compute_page(total_count, request.page(), request.page_size());

        Self {
            items,
            total_count,
            total_pages: bounds.total_pages,
            page_size: request.page_size(),
            current_page: request.page(),
            range_start: bounds.range_start,
            range_end: bounds.range_end,
        }
    }

    /// Transforms the items while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            page_size: self.page_size,
            current_page: self.current_page,
            range_start: self.range_start,
            range_end: self.range_end,
        }
    }
}
