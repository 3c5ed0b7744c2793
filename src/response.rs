//! JSON response envelopes shared by every endpoint.
//! Used by: error, handlers.

use serde::Serialize;

use crate::pagination::Page;

#[derive(Debug, Serialize)]
pub struct Meta {
    pub status: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub meta: Meta,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status: false,
                message: message.into(),
            },
        }
    }
}

/// Pagination metadata emitted next to a list payload.
#[derive(Debug, Serialize, PartialEq)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub page_count: u64,
    pub total_count: u64,
}

impl From<&Page> for PaginationMeta {
    fn from(page: &Page) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            page_count: page.page_count,
            total_count: page.total_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub meta: Meta,
    pub data: Option<T>,
    pub pagination: Option<PaginationMeta>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            meta: Meta {
                status: true,
                message: message.into(),
            },
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, page: &Page) -> Self {
        self.pagination = Some(PaginationMeta::from(page));
        self
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub meta: Meta,
    pub access_token: String,
    pub expired_at: i64,
}
