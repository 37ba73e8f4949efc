//! Invoice CRUD plus PDF export.

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, Invoice, InvoiceDraft, ListPage, Mutation,
};

use crate::download::PdfDownload;
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "invoice";
const PATH: &str = "invoices";

/// Service for the invoices screen.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    client: ApiClient,
}

impl InvoiceService {
    pub fn new(client: ApiClient) -> Self {
        InvoiceService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Invoice>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn get(&self, id: i64) -> ApiResult<Invoice> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(&self, draft: &InvoiceDraft) -> ApiResult<Mutation<Invoice>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .post_json(PATH, &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "create", e))
    }

    pub async fn update(&self, id: i64, draft: &InvoiceDraft) -> ApiResult<Mutation<Invoice>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("{}/{}", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<Invoice>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }

    /// Downloads the commercial invoice PDF.
    pub async fn download_pdf(&self, id: i64) -> ApiResult<PdfDownload> {
        let response = self
            .client
            .get_bytes(&format!("{}/{}/pdf", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "download"))?;
        Ok(PdfDownload::from_response(
            response,
            format!("Invoice-{}.pdf", id),
        ))
    }
}
