//! Order CRUD plus the status transition and PDF export.

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, ListPage, Mutation, Order, OrderDraft, OrderStatus,
};

use crate::download::PdfDownload;
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "order";
const PATH: &str = "orders";

/// Service for the orders screen.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub fn new(client: ApiClient) -> Self {
        OrderService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Order>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn get(&self, id: i64) -> ApiResult<Order> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(&self, draft: &OrderDraft) -> ApiResult<Mutation<Order>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .post_json(PATH, &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "create", e))
    }

    pub async fn update(&self, id: i64, draft: &OrderDraft) -> ApiResult<Mutation<Order>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("{}/{}", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<Order>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }

    /// Moves the order to a new lifecycle status.
    pub async fn set_status(&self, id: i64, status: OrderStatus) -> ApiResult<Mutation<Order>> {
        let body = serde_json::json!({ "status": status });
        let payload = self
            .client
            .patch_json(&format!("{}/{}/status", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "status"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "status", e))
    }

    /// Downloads the order confirmation PDF.
    pub async fn download_pdf(&self, id: i64) -> ApiResult<PdfDownload> {
        let response = self
            .client
            .get_bytes(&format!("{}/{}/pdf", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "download"))?;
        Ok(PdfDownload::from_response(
            response,
            format!("Order-{}.pdf", id),
        ))
    }
}
