//! Packing list CRUD.
//!
//! Containers and boxes travel nested inside the draft JSON; the server owns
//! box numbering validation, the client only checks weights (see the core
//! validation rules).

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, ListPage, Mutation, PackingList, PackingListDraft,
};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "packing-list";
const PATH: &str = "packing-lists";

/// Service for the packing list screen.
#[derive(Debug, Clone)]
pub struct PackingListService {
    client: ApiClient,
}

impl PackingListService {
    pub fn new(client: ApiClient) -> Self {
        PackingListService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<PackingList>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn get(&self, id: i64) -> ApiResult<PackingList> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(&self, draft: &PackingListDraft) -> ApiResult<Mutation<PackingList>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .post_json(PATH, &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "create", e))
    }

    pub async fn update(
        &self,
        id: i64,
        draft: &PackingListDraft,
    ) -> ApiResult<Mutation<PackingList>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("{}/{}", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<PackingList>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }
}
