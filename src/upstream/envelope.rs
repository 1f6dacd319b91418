//! Upstream response envelope.
//!
//! Every dashboard endpoint wraps its payload as `{ data, meta }`, where
//! `meta.pagination` is only present on list endpoints. Absent pagination
//! metadata is the upstream's way of saying "no more pages".

use serde::Deserialize;
use serde_json::Value;

/// The `{ data, meta }` wrapper used by all upstream responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Payload: an object for detail endpoints, an array for list endpoints.
    #[serde(default)]
    pub data: Value,

    /// Pagination metadata, present only on list endpoints.
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Describes a collection's page structure.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl Envelope {
    /// Total page count reported by the upstream, treating absent
    /// pagination metadata as 0 (single-page contract).
    pub fn total_pages(&self) -> u32 {
        self.meta
            .as_ref()
            .and_then(|m| m.pagination.as_ref())
            .map(|p| p.total_pages)
            .unwrap_or(0)
    }
}
