//! # CRUD Service Seam
//!
//! The store is generic over [`CrudService`] so slice logic is written once
//! and tested without a network. Each adapter below pairs one REST service
//! with its entity/draft types; entity-specific operations (status changes,
//! downloads, submenus, file uploads) stay on the underlying service and are
//! surfaced by the matching store impl.

use async_trait::async_trait;

use cargodesk_client::services::{
    CompanyService, InvoiceService, ListQuery, MenuService, OrderService, PackingListService,
    PermissionService, ShipmentService, VariantService, VgmService,
};
use cargodesk_client::ApiResult;
use cargodesk_core::{
    Company, CompanyDraft, HasId, Invoice, InvoiceDraft, ListPage, Menu, MenuDraft, Mutation,
    Order, OrderDraft, PackingList, PackingListDraft, ProductVariant, ProductVariantDraft,
    Shipment, ShipmentDraft, UserPermission, UserPermissionDraft, Validate, VgmDocument, VgmDraft,
};

/// The uniform CRUD surface a slice is driven by.
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    type Entity: HasId + Clone + Send + Sync + 'static;
    type Draft: Validate + Send + Sync;

    async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Self::Entity>>;
    async fn get(&self, id: i64) -> ApiResult<Self::Entity>;
    async fn create(&self, draft: &Self::Draft) -> ApiResult<Mutation<Self::Entity>>;
    async fn update(&self, id: i64, draft: &Self::Draft) -> ApiResult<Mutation<Self::Entity>>;
    async fn delete(&self, id: i64) -> ApiResult<Mutation<Self::Entity>>;
}

/// Pairs a REST service with its entity/draft types behind [`CrudService`].
macro_rules! crud_adapter {
    ($adapter:ident, $service:ty, $entity:ty, $draft:ty) => {
        #[derive(Debug, Clone)]
        pub struct $adapter {
            service: $service,
        }

        impl $adapter {
            pub fn new(service: $service) -> Self {
                $adapter { service }
            }

            /// The underlying REST service, for entity-specific operations.
            pub fn service(&self) -> &$service {
                &self.service
            }
        }

        #[async_trait]
        impl CrudService for $adapter {
            type Entity = $entity;
            type Draft = $draft;

            async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Self::Entity>> {
                self.service.list(query).await
            }

            async fn get(&self, id: i64) -> ApiResult<Self::Entity> {
                self.service.get(id).await
            }

            async fn create(&self, draft: &Self::Draft) -> ApiResult<Mutation<Self::Entity>> {
                self.service.create(draft).await
            }

            async fn update(
                &self,
                id: i64,
                draft: &Self::Draft,
            ) -> ApiResult<Mutation<Self::Entity>> {
                self.service.update(id, draft).await
            }

            async fn delete(&self, id: i64) -> ApiResult<Mutation<Self::Entity>> {
                self.service.delete(id).await
            }
        }
    };
}

crud_adapter!(OrderCrud, OrderService, Order, OrderDraft);
crud_adapter!(ShipmentCrud, ShipmentService, Shipment, ShipmentDraft);
crud_adapter!(PackingListCrud, PackingListService, PackingList, PackingListDraft);
crud_adapter!(VgmCrud, VgmService, VgmDocument, VgmDraft);
crud_adapter!(InvoiceCrud, InvoiceService, Invoice, InvoiceDraft);
crud_adapter!(MenuCrud, MenuService, Menu, MenuDraft);
crud_adapter!(PermissionCrud, PermissionService, UserPermission, UserPermissionDraft);
crud_adapter!(VariantCrud, VariantService, ProductVariant, ProductVariantDraft);

// =============================================================================
// Company (multipart)
// =============================================================================

/// Company adapter, written by hand because create/update are multipart.
///
/// The plain [`CrudService`] surface submits without files; the company
/// store exposes the with-files variants on top of the same slice.
#[derive(Debug, Clone)]
pub struct CompanyCrud {
    service: CompanyService,
}

impl CompanyCrud {
    pub fn new(service: CompanyService) -> Self {
        CompanyCrud { service }
    }

    pub fn service(&self) -> &CompanyService {
        &self.service
    }
}

#[async_trait]
impl CrudService for CompanyCrud {
    type Entity = Company;
    type Draft = CompanyDraft;

    async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Company>> {
        self.service.list(query).await
    }

    async fn get(&self, id: i64) -> ApiResult<Company> {
        self.service.get(id).await
    }

    async fn create(&self, draft: &CompanyDraft) -> ApiResult<Mutation<Company>> {
        self.service.create(draft, None, None).await
    }

    async fn update(&self, id: i64, draft: &CompanyDraft) -> ApiResult<Mutation<Company>> {
        self.service.update(id, draft, None, None).await
    }

    async fn delete(&self, id: i64) -> ApiResult<Mutation<Company>> {
        self.service.delete(id).await
    }
}
