//! # CRUD Stores
//!
//! One store per entity, all sharing the same generic engine: validate the
//! draft, run the service call, route the outcome into slice state. Locks
//! are never held across an await; every request takes the write lock twice,
//! once to begin and once to settle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Request Flow                                 │
//! │                                                                         │
//! │  create(draft)                                                          │
//! │      │                                                                  │
//! │      ├─ draft.validate() ── Err ──► error state, NO network call        │
//! │      │                                                                  │
//! │      ├─ lock: begin()  (loading=true, banners cleared)                 │
//! │      ├─ await service.create(draft)        ◄── no lock held here       │
//! │      └─ lock: fulfill_create / reject                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use cargodesk_client::services::{AuthService, Credentials, ListQuery, ReportService};
use cargodesk_client::{ApiError, ApiResult, ErrorKind, PdfDownload};
use cargodesk_core::{DashboardSummary, OrderStatus, SubmenuDraft, User, Validate};

use crate::service::{
    CompanyCrud, CrudService, InvoiceCrud, MenuCrud, OrderCrud, PackingListCrud, PermissionCrud,
    ShipmentCrud, VariantCrud, VgmCrud,
};
use crate::slice::SliceState;

// =============================================================================
// Generic CRUD Store
// =============================================================================

/// Slice state plus the service that feeds it.
#[derive(Debug)]
pub struct CrudStore<S: CrudService> {
    service: Arc<S>,
    state: Arc<RwLock<SliceState<S::Entity>>>,
}

impl<S: CrudService> Clone for CrudStore<S> {
    fn clone(&self) -> Self {
        CrudStore {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: CrudService> CrudStore<S> {
    pub fn new(service: S) -> Self {
        CrudStore {
            service: Arc::new(service),
            state: Arc::new(RwLock::new(SliceState::new())),
        }
    }

    /// The underlying service, for entity-specific operations.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Reads the slice through a closure, never exposing the lock guard.
    pub async fn with_state<R>(&self, f: impl FnOnce(&SliceState<S::Entity>) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Fetches a page into `items`. A response that arrives after a newer
    /// fetch was issued is discarded.
    pub async fn fetch_list(&self, query: &ListQuery) -> ApiResult<()> {
        let seq = self.state.write().await.begin();

        match self.service.list(query).await {
            Ok(page) => {
                let mut state = self.state.write().await;
                if !state.fulfill_list(seq, page.items, page.pagination) {
                    debug!(seq, "discarded stale list response");
                }
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Fetches one record into `selected`.
    pub async fn fetch_one(&self, id: i64) -> ApiResult<()> {
        self.state.write().await.begin();

        match self.service.get(id).await {
            Ok(entity) => {
                self.state.write().await.fulfill_selected(entity);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Validates and creates; the new record is prepended to `items`.
    pub async fn create(&self, draft: &S::Draft) -> ApiResult<()> {
        self.check(draft).await?;
        self.state.write().await.begin();

        match self.service.create(draft).await {
            Ok(mutation) => {
                self.state
                    .write()
                    .await
                    .fulfill_create(mutation.data, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Validates and updates; the record is replaced in place by id.
    pub async fn update(&self, id: i64, draft: &S::Draft) -> ApiResult<()> {
        self.check(draft).await?;
        self.state.write().await.begin();

        match self.service.update(id, draft).await {
            Ok(mutation) => {
                self.state
                    .write()
                    .await
                    .fulfill_update(mutation.data, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Deletes; on success the record leaves `items`, on failure the rows
    /// are untouched and the error is surfaced.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.state.write().await.begin();

        match self.service.delete(id).await {
            Ok(mutation) => {
                self.state.write().await.fulfill_delete(id, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Runs draft validation; a failure becomes the slice error without any
    /// network traffic.
    async fn check(&self, draft: &S::Draft) -> ApiResult<()> {
        if let Err(violation) = draft.validate() {
            let err = ApiError::new(ErrorKind::Validation, violation.to_string());
            self.state.write().await.reject(err.message.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Clears any error/success banners without touching the rows.
    pub async fn dismiss_banners(&self) {
        let mut state = self.state.write().await;
        state.error = None;
        state.success_message = None;
    }
}

// =============================================================================
// Per-Entity Stores
// =============================================================================

pub type CompanyStore = CrudStore<CompanyCrud>;
pub type OrderStore = CrudStore<OrderCrud>;
pub type ShipmentStore = CrudStore<ShipmentCrud>;
pub type PackingListStore = CrudStore<PackingListCrud>;
pub type VgmStore = CrudStore<VgmCrud>;
pub type InvoiceStore = CrudStore<InvoiceCrud>;
pub type MenuStore = CrudStore<MenuCrud>;
pub type PermissionStore = CrudStore<PermissionCrud>;
pub type VariantStore = CrudStore<VariantCrud>;

impl CompanyStore {
    /// Creates a company with optional logo/signature uploads.
    pub async fn create_with_files(
        &self,
        draft: &cargodesk_core::CompanyDraft,
        logo: Option<cargodesk_client::FilePart>,
        signature: Option<cargodesk_client::FilePart>,
    ) -> ApiResult<()> {
        self.check(draft).await?;
        self.state.write().await.begin();

        match self.service.service().create(draft, logo, signature).await {
            Ok(mutation) => {
                self.state
                    .write()
                    .await
                    .fulfill_create(mutation.data, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Updates a company with optional logo/signature uploads.
    pub async fn update_with_files(
        &self,
        id: i64,
        draft: &cargodesk_core::CompanyDraft,
        logo: Option<cargodesk_client::FilePart>,
        signature: Option<cargodesk_client::FilePart>,
    ) -> ApiResult<()> {
        self.check(draft).await?;
        self.state.write().await.begin();

        match self
            .service
            .service()
            .update(id, draft, logo, signature)
            .await
        {
            Ok(mutation) => {
                self.state
                    .write()
                    .await
                    .fulfill_update(mutation.data, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }
}

impl OrderStore {
    /// Moves an order to a new lifecycle status and replaces it in `items`.
    pub async fn set_status(&self, id: i64, status: OrderStatus) -> ApiResult<()> {
        self.state.write().await.begin();

        match self.service.service().set_status(id, status).await {
            Ok(mutation) => {
                self.state
                    .write()
                    .await
                    .fulfill_update(mutation.data, mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    /// Downloads the order PDF. Failures surface on the slice like any
    /// other request; success does not change the rows.
    pub async fn download_pdf(&self, id: i64) -> ApiResult<PdfDownload> {
        match self.service.service().download_pdf(id).await {
            Ok(download) => Ok(download),
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }
}

impl InvoiceStore {
    /// Downloads the invoice PDF.
    pub async fn download_pdf(&self, id: i64) -> ApiResult<PdfDownload> {
        match self.service.service().download_pdf(id).await {
            Ok(download) => Ok(download),
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }
}

impl MenuStore {
    /// Creates a submenu under its parent. The menu rows are not patched in
    /// place; callers refetch the list to pick up the new nesting.
    pub async fn create_submenu(&self, draft: &SubmenuDraft) -> ApiResult<()> {
        self.check_submenu(draft).await?;
        self.state.write().await.begin();

        match self.service.service().create_submenu(draft).await {
            Ok(mutation) => {
                self.state.write().await.fulfill_message(mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    pub async fn update_submenu(&self, id: i64, draft: &SubmenuDraft) -> ApiResult<()> {
        self.check_submenu(draft).await?;
        self.state.write().await.begin();

        match self.service.service().update_submenu(id, draft).await {
            Ok(mutation) => {
                self.state.write().await.fulfill_message(mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    pub async fn delete_submenu(&self, id: i64) -> ApiResult<()> {
        self.state.write().await.begin();

        match self.service.service().delete_submenu(id).await {
            Ok(mutation) => {
                self.state.write().await.fulfill_message(mutation.message);
                Ok(())
            }
            Err(err) => {
                self.state.write().await.reject(err.message.clone());
                Err(err)
            }
        }
    }

    async fn check_submenu(&self, draft: &SubmenuDraft) -> ApiResult<()> {
        if let Err(violation) = draft.validate() {
            let err = ApiError::new(ErrorKind::Validation, violation.to_string());
            self.state.write().await.reject(err.message.clone());
            return Err(err);
        }
        Ok(())
    }
}

// =============================================================================
// Auth Store
// =============================================================================

/// Session state for the login screen and route guards.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store driving login/logout.
#[derive(Debug, Clone)]
pub struct AuthStore {
    service: Arc<AuthService>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    pub fn new(service: AuthService) -> Self {
        AuthStore {
            service: Arc::new(service),
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    pub async fn with_state<R>(&self, f: impl FnOnce(&AuthState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.service.login(credentials).await {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.user = Some(user);
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Logs out. The local user is cleared even when revocation fails.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.service.logout().await;
        let mut state = self.state.write().await;
        state.user = None;
        state.loading = false;
        result
    }
}

// =============================================================================
// Report Store
// =============================================================================

/// State behind the reporting dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub summary: Option<DashboardSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store driving the dashboard screen.
#[derive(Debug, Clone)]
pub struct ReportStore {
    service: Arc<ReportService>,
    state: Arc<RwLock<DashboardState>>,
}

impl ReportStore {
    pub fn new(service: ReportService) -> Self {
        ReportStore {
            service: Arc::new(service),
            state: Arc::new(RwLock::new(DashboardState::default())),
        }
    }

    pub async fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Refreshes the aggregate counts. A failure keeps the last good summary
    /// visible alongside the error.
    pub async fn refresh(&self) -> ApiResult<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.service.dashboard().await {
            Ok(summary) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.summary = Some(summary);
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(err.message.clone());
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use cargodesk_core::{
        validate_required, HasId, ListPage, Mutation, ValidationResult,
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    impl HasId for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
        }
    }

    #[derive(Debug, Clone, Default)]
    struct RowDraft {
        name: String,
    }

    impl Validate for RowDraft {
        fn validate(&self) -> ValidationResult<()> {
            validate_required("name", &self.name, 50)
        }
    }

    /// Scripted service: each call pops the next queued outcome. A `gate`
    /// on a list outcome holds the response until the test releases it.
    #[derive(Default)]
    struct MockService {
        list_results: Mutex<VecDeque<(Option<Arc<Notify>>, ApiResult<ListPage<Row>>)>>,
        mutation_results: Mutex<VecDeque<ApiResult<Mutation<Row>>>>,
        calls: AtomicUsize,
    }

    impl MockService {
        fn queue_list(&self, gate: Option<Arc<Notify>>, result: ApiResult<ListPage<Row>>) {
            self.list_results
                .lock()
                .unwrap()
                .push_back((gate, result));
        }

        fn queue_mutation(&self, result: ApiResult<Mutation<Row>>) {
            self.mutation_results.lock().unwrap().push_back(result);
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn page(rows: Vec<Row>) -> ApiResult<ListPage<Row>> {
        Ok(ListPage {
            items: rows,
            pagination: None,
        })
    }

    fn mutated(entity: Row, message: &str) -> ApiResult<Mutation<Row>> {
        Ok(Mutation {
            data: entity,
            message: message.to_string(),
        })
    }

    #[async_trait]
    impl CrudService for MockService {
        type Entity = Row;
        type Draft = RowDraft;

        async fn list(&self, _query: &ListQuery) -> ApiResult<ListPage<Row>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (gate, result) = self
                .list_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| (None, page(Vec::new())));
            if let Some(gate) = gate {
                gate.notified().await;
            }
            result
        }

        async fn get(&self, id: i64) -> ApiResult<Row> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(row(id, "fetched"))
        }

        async fn create(&self, _draft: &RowDraft) -> ApiResult<Mutation<Row>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.next_mutation()
        }

        async fn update(&self, _id: i64, _draft: &RowDraft) -> ApiResult<Mutation<Row>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.next_mutation()
        }

        async fn delete(&self, _id: i64) -> ApiResult<Mutation<Row>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.next_mutation()
        }
    }

    impl MockService {
        fn next_mutation(&self) -> ApiResult<Mutation<Row>> {
            self.mutation_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| mutated(row(0, "unscripted"), ""))
        }
    }

    #[tokio::test]
    async fn test_create_prepends_to_items() {
        let service = MockService::default();
        service.queue_list(None, page(vec![row(1, "a"), row(2, "b")]));
        service.queue_mutation(mutated(row(3, "c"), "Record created"));

        let store = CrudStore::new(service);
        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        store
            .create(&RowDraft {
                name: "c".to_string(),
            })
            .await
            .unwrap();

        store
            .with_state(|s| {
                assert_eq!(s.items[0].id, 3);
                assert_eq!(s.items.len(), 3);
                assert_eq!(s.success_message.as_deref(), Some("Record created"));
                assert!(!s.loading);
                assert!(s.error.is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let service = MockService::default();
        service.queue_list(None, page(vec![row(1, "a"), row(2, "b")]));
        service.queue_mutation(mutated(row(1, "a"), "Record deleted"));

        let store = CrudStore::new(service);
        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        store.delete(1).await.unwrap();

        store
            .with_state(|s| {
                assert_eq!(s.items, vec![row(2, "b")]);
                assert!(s.error.is_none());
                assert_eq!(s.success_message.as_deref(), Some("Record deleted"));
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows_and_surfaces_error() {
        let service = MockService::default();
        service.queue_list(None, page(vec![row(1, "a")]));
        service.queue_mutation(Err(ApiError::new(
            ErrorKind::Referential,
            "This order cannot be deleted because other records depend on it.",
        )));

        let store = CrudStore::new(service);
        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        let err = store.delete(1).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Referential);
        store
            .with_state(|s| {
                assert_eq!(s.items.len(), 1);
                assert!(!s.loading);
                assert_eq!(
                    s.error.as_deref(),
                    Some("This order cannot be deleted because other records depend on it.")
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_fetch_twice_is_idempotent() {
        let service = MockService::default();
        service.queue_list(None, page(vec![row(1, "a"), row(2, "b")]));
        service.queue_list(None, page(vec![row(1, "a"), row(2, "b")]));

        let store = CrudStore::new(service);
        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        let first = store.with_state(|s| s.items.clone()).await;
        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        let second = store.with_state(|s| s.items.clone()).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_the_service() {
        let service = MockService::default();
        let store = CrudStore::new(service);

        let err = store.create(&RowDraft::default()).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.service().call_count(), 0);
        store
            .with_state(|s| {
                assert!(!s.loading);
                assert!(s.error.is_some());
            })
            .await;
    }

    #[tokio::test]
    async fn test_stale_list_response_is_discarded() {
        let gate = Arc::new(Notify::new());
        let service = MockService::default();
        // First fetch is held at the gate; second completes immediately.
        service.queue_list(Some(Arc::clone(&gate)), page(vec![row(1, "old")]));
        service.queue_list(None, page(vec![row(2, "new")]));

        let store = CrudStore::new(service);
        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch_list(&ListQuery::page(1)).await })
        };

        // Let the slow fetch issue its sequence number before the fast one.
        tokio::task::yield_now().await;
        store.fetch_list(&ListQuery::page(2)).await.unwrap();

        gate.notify_one();
        slow.await.unwrap().unwrap();

        store
            .with_state(|s| {
                assert_eq!(s.items, vec![row(2, "new")]);
            })
            .await;
    }

    #[tokio::test]
    async fn test_new_request_clears_banners() {
        let service = MockService::default();
        service.queue_list(None, Err(ApiError::new(ErrorKind::Server, "boom")));
        service.queue_list(None, page(vec![row(1, "a")]));

        let store = CrudStore::new(service);
        let _ = store.fetch_list(&ListQuery::page(1)).await;
        store.with_state(|s| assert!(s.error.is_some())).await;

        store.fetch_list(&ListQuery::page(1)).await.unwrap();
        store
            .with_state(|s| {
                assert!(s.error.is_none());
                assert_eq!(s.items.len(), 1);
            })
            .await;
    }
}
