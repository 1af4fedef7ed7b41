//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] is a validated `(page, limit)` pair. Pages are 1-based
//! and limits are bounded to `[MIN_LIMIT, MAX_LIMIT]`. Out-of-range input is
//! rejected rather than clamped so callers can surface the problem verbatim.
//!
//! A [`Page`] is the response envelope: the slice of items for the requested
//! page, the total number of matching items ignoring pagination, and the
//! echoed request parameters.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::try_new(3, 10).expect("valid request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(request, 25, vec!["a", "b", "c", "d", "e"]);
//! assert_eq!(page.items.len(), 5);
//! assert_eq!(page.total_count, 25);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest accepted page number.
pub const MIN_PAGE: i64 = 1;
/// Smallest accepted page size.
pub const MIN_LIMIT: i64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;
/// Page used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// A single reason a page request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page number is below [`MIN_PAGE`].
    #[error("page must be greater than or equal to {min}")]
    PageTooSmall {
        /// Rejected page number.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
    },
    /// The page size is below [`MIN_LIMIT`].
    #[error("limit must be greater than or equal to {min}")]
    LimitTooSmall {
        /// Rejected page size.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
    },
    /// The page size is above [`MAX_LIMIT`].
    #[error("limit must be less than or equal to {max}")]
    LimitTooLarge {
        /// Rejected page size.
        value: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

impl PageRequestError {
    /// Name of the request parameter the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::PageTooSmall { .. } => "page",
            Self::LimitTooSmall { .. } | Self::LimitTooLarge { .. } => "limit",
        }
    }

    /// The rejected value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self {
            Self::PageTooSmall { value, .. }
            | Self::LimitTooSmall { value, .. }
            | Self::LimitTooLarge { value, .. } => *value,
        }
    }
}

/// Every reason a page request was rejected, in parameter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequestErrors(Vec<PageRequestError>);

impl PageRequestErrors {
    /// Iterate over the individual rejections.
    pub fn iter(&self) -> impl Iterator<Item = &PageRequestError> {
        self.0.iter()
    }

    /// Consume the collection, yielding the individual rejections.
    #[must_use]
    pub fn into_vec(self) -> Vec<PageRequestError> {
        self.0
    }
}

impl fmt::Display for PageRequestErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PageRequestErrors {}

/// A validated page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Validate raw page parameters.
    ///
    /// # Errors
    ///
    /// Returns every violated bound when `page < MIN_PAGE` or `limit` lies
    /// outside `[MIN_LIMIT, MAX_LIMIT]`.
    pub fn try_new(page: i64, limit: i64) -> Result<Self, PageRequestErrors> {
        let mut errors = Vec::new();
        if page < MIN_PAGE {
            errors.push(PageRequestError::PageTooSmall {
                value: page,
                min: MIN_PAGE,
            });
        }
        if limit < MIN_LIMIT {
            errors.push(PageRequestError::LimitTooSmall {
                value: limit,
                min: MIN_LIMIT,
            });
        } else if limit > MAX_LIMIT {
            errors.push(PageRequestError::LimitTooLarge {
                value: limit,
                max: MAX_LIMIT,
            });
        }

        match (u64::try_from(page), u64::try_from(limit)) {
            (Ok(page), Ok(limit)) if errors.is_empty() => Ok(Self { page, limit }),
            _ => Err(PageRequestErrors(errors)),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items preceding the first item of this page.
    ///
    /// Saturates instead of overflowing for absurdly large page numbers; such
    /// pages are simply empty.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE.unsigned_abs(),
            limit: DEFAULT_LIMIT.unsigned_abs(),
        }
    }
}

/// One page of results plus the metadata needed to request the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of items matching the query, ignoring pagination.
    pub total_count: u64,
    /// Echoed 1-based page number.
    pub page: u64,
    /// Echoed page size.
    pub limit: u64,
    /// Items on this page, in the store's stable order.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope for `request`.
    #[must_use]
    pub const fn new(request: PageRequest, total_count: u64, items: Vec<T>) -> Self {
        Self {
            total_count,
            page: request.page,
            limit: request.limit,
            items,
        }
    }

    /// Convert every item, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            page: self.page,
            limit: self.limit,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
