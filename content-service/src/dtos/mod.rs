pub mod content;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::listing::Page;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Envelope for admin list views: one page of records plus the pagination
/// metadata and the canonical serialized controls, so clients can build
/// shareable URLs without re-implementing the omission rules.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: usize,
    pub params: BTreeMap<String, String>,
}

impl<T> ListResponse<T> {
    pub fn new(page: Page<T>, params: BTreeMap<String, String>) -> Self {
        Self {
            items: page.items,
            page: page.safe_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            params,
        }
    }
}
