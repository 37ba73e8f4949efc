//! Menu and submenu management.
//!
//! Menus are the navigation tree shown in the sidebar; submenus nest one
//! level deep. Submenu creation posts under the parent menu, while update
//! and delete address the submenu directly.

use cargodesk_core::{
    parse_list, parse_mutation, parse_one, ListPage, Menu, MenuDraft, Mutation, Submenu,
    SubmenuDraft,
};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::{encode, ListQuery};

const CONTEXT: &str = "menu";
const SUBMENU_CONTEXT: &str = "submenu";
const PATH: &str = "menus";

/// Service for the menu management screen.
#[derive(Debug, Clone)]
pub struct MenuService {
    client: ApiClient,
}

impl MenuService {
    pub fn new(client: ApiClient) -> Self {
        MenuService { client }
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Menu>> {
        let payload = self
            .client
            .get_json(PATH, &query.to_query())
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_list(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn get(&self, id: i64) -> ApiResult<Menu> {
        let payload = self
            .client
            .get_json(&format!("{}/{}", PATH, id), &[])
            .await
            .map_err(|f| normalize(f, CONTEXT, "fetch"))?;
        parse_one(payload).map_err(|e| ApiError::decode(CONTEXT, "fetch", e))
    }

    pub async fn create(&self, draft: &MenuDraft) -> ApiResult<Mutation<Menu>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .post_json(PATH, &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "create", e))
    }

    pub async fn update(&self, id: i64, draft: &MenuDraft) -> ApiResult<Mutation<Menu>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("{}/{}", PATH, id), &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "update", e))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Mutation<Menu>> {
        let payload = self
            .client
            .delete_json(&format!("{}/{}", PATH, id))
            .await
            .map_err(|f| normalize(f, CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(CONTEXT, "delete", e))
    }

    // =========================================================================
    // Submenus
    // =========================================================================

    /// Creates a submenu under its parent menu.
    pub async fn create_submenu(&self, draft: &SubmenuDraft) -> ApiResult<Mutation<Submenu>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .post_json(&format!("{}/{}/submenus", PATH, draft.menu_id), &body)
            .await
            .map_err(|f| normalize(f, SUBMENU_CONTEXT, "create"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(SUBMENU_CONTEXT, "create", e))
    }

    pub async fn update_submenu(
        &self,
        id: i64,
        draft: &SubmenuDraft,
    ) -> ApiResult<Mutation<Submenu>> {
        let body = encode(draft)?;
        let payload = self
            .client
            .put_json(&format!("submenus/{}", id), &body)
            .await
            .map_err(|f| normalize(f, SUBMENU_CONTEXT, "update"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(SUBMENU_CONTEXT, "update", e))
    }

    pub async fn delete_submenu(&self, id: i64) -> ApiResult<Mutation<Submenu>> {
        let payload = self
            .client
            .delete_json(&format!("submenus/{}", id))
            .await
            .map_err(|f| normalize(f, SUBMENU_CONTEXT, "delete"))?;
        parse_mutation(payload).map_err(|e| ApiError::decode(SUBMENU_CONTEXT, "delete", e))
    }
}
