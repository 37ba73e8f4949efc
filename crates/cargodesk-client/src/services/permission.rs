//! User permission CRUD.

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, ListPage, Mutation, UserPermission,
    UserPermissionDraft,
};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "permission";
const PATH: &str = "user-permissions";

/// Service for the permission assignment screen.
#[derive(Debug, Clone)]
pub struct PermissionService {
    client: ApiClient,
}

impl PermissionService {
    pub fn new(client: ApiClient) -> Self {
        PermissionService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<UserPermission>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    /// Lists every permission row for one user.
    pub async fn list_for_user(&self, user_id: i64) -> ApiResult<ListPage<UserPermission>> {
        let query = ListQuery::default().with_filter("userId", user_id.to_string());
        self.list(&query).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<UserPermission> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(&self, draft: &UserPermissionDraft) -> ApiResult<Mutation<UserPermission>> {
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
        draft: &UserPermissionDraft,
    ) -> ApiResult<Mutation<UserPermission>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("{}/{}", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<UserPermission>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }
}
