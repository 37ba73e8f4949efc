//! Dashboard aggregates.

use cargodesk_core::{parse_one, DashboardSummary};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;

const CONTEXT: &str = "report";

/// Service for the reporting dashboard.
#[derive(Debug, Clone)]
pub struct ReportService {
    client: ApiClient,
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        ReportService { client }
    }

    /// Fetches the aggregate counts and monthly shipment series.
    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let payload = self
            .client
            .get_json("dashboard", &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }
}
