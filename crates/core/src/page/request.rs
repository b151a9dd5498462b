use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a page request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}

/// A request for one page of results: how many items to skip and how many
/// to return.
///
/// A zero page size is rejected at construction: the look-ahead that
/// decides whether a next page exists probes up to one page of further
/// results, and a zero-sized probe could never see one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: u64,
    page_size: usize,
}

impl PageRequest {
    /// Creates a page request, validating that the page size is positive.
    pub fn new(offset: u64, page_size: usize) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { offset, page_size })
    }

    /// Creates a request for the first page.
    pub fn first(page_size: usize) -> Result<Self, PageRequestError> {
        Self::new(0, page_size)
    }

    /// Number of items to skip before the page starts.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of items in the page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The request for the page immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset + self.page_size as u64,
            page_size: self.page_size,
        }
    }
}
