//! Page-window computation for list endpoints.
//! Used by: handlers::category, response.

use crate::error::{Error, Result};

/// Page size used when the caller asks for zero or a negative size.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// One page of a larger result set.
///
/// `first..last` is the half-open offset range the caller slices out of its
/// result set. Page numbers are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub per_page: u64,
    pub page_count: u64,
    pub total_count: u64,
    pub first: u64,
    pub last: u64,
}

impl Page {
    /// Number of rows the page covers.
    pub fn len(&self) -> u64 {
        self.last - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }
}

/// Computes the window for `page` over `total_count` items.
///
/// The empty first page is always valid, even though zero items yield zero
/// pages; that case is checked before the range check.
pub fn compute_page(total_count: u64, page: i64, per_page: i64) -> Result<Page> {
    if page <= 0 {
        return Err(Error::InvalidPage);
    }
    let page = page as u64;
    let per_page = if per_page > 0 {
        per_page as u64
    } else {
        DEFAULT_PER_PAGE
    };

    if total_count == 0 && page == 1 {
        return Ok(Page {
            page,
            per_page,
            page_count: 1,
            total_count: 0,
            first: 0,
            last: 0,
        });
    }

    let page_count = total_count.div_ceil(per_page);
    if page > page_count {
        return Err(Error::PageOutOfRange { page, page_count });
    }

    // page <= page_count keeps `first` below total_count; `last` may not fit.
    let first = (page - 1) * per_page;
    let last = page.saturating_mul(per_page).min(total_count);

    Ok(Page {
        page,
        per_page,
        page_count,
        total_count,
        first,
        last,
    })
}
