//! # Entity Services
//!
//! One service per entity, each a thin typed wrapper over [`crate::ApiClient`]:
//! build the request, parse the envelope, normalize the failure. Services
//! hold no state beyond the shared client and never retry on their own.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Service Layer                                    │
//! │                                                                         │
//! │  store ──► OrderService::create(draft)                                 │
//! │              │                                                          │
//! │              ├─ serialize draft                                        │
//! │              ├─ ApiClient::post_json("orders", body)                   │
//! │              ├─ parse_mutation::<Order>(payload)                       │
//! │              └─ .map_err(|f| normalize(f, "order", "create"))          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::normalize::DEFAULT_MESSAGE;

pub mod auth;
pub mod company;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod packing_list;
pub mod permission;
pub mod report;
pub mod shipment;
pub mod variant;
pub mod vgm;

pub use auth::{AuthService, Credentials};
pub use company::{CompanyService, FilePart};
pub use invoice::InvoiceService;
pub use menu::MenuService;
pub use order::OrderService;
pub use packing_list::PackingListService;
pub use permission::PermissionService;
pub use report::ReportService;
pub use shipment::ShipmentService;
pub use variant::VariantService;
pub use vgm::VgmService;

// =============================================================================
// List Query
// =============================================================================

/// Paging, search and filter parameters for list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    /// Extra endpoint-specific filters (e.g. `("status", "shipped")`).
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// A query for one page at the default limit.
    pub fn page(page: i64) -> Self {
        ListQuery {
            page: Some(page),
            limit: Some(cargodesk_core::DEFAULT_PAGE_LIMIT),
            ..ListQuery::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.min(cargodesk_core::MAX_PAGE_LIMIT));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Renders the query as key/value pairs for the HTTP layer.
    pub fn to_query(&self) -> Vec<(&str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(search) = &self.search {
            if !search.trim().is_empty() {
                query.push(("search", search.trim().to_string()));
            }
        }
        for (key, value) in &self.filters {
            query.push((key.as_str(), value.clone()));
        }
        query
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Serializes a request body. A failure here is a programming error; the
/// cause is logged and the user sees the generic message.
pub(crate) fn encode<T: Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| {
        error!(error = %e, "request body serialization failed");
        ApiError::new(ErrorKind::Unclassified, DEFAULT_MESSAGE)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_renders_in_order() {
        let query = ListQuery::page(2)
            .with_search("  mango  ")
            .with_filter("status", "shipped");
        assert_eq!(
            query.to_query(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("search", "mango".to_string()),
                ("status", "shipped".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_query_limit_is_capped() {
        let query = ListQuery::page(1).with_limit(5000);
        assert_eq!(query.limit, Some(cargodesk_core::MAX_PAGE_LIMIT));
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListQuery::default().with_search("   ");
        assert!(query.to_query().is_empty());
    }
}
