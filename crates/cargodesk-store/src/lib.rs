//! # cargodesk-store: CRUD State Slices for CargoDesk
//!
//! The screen-facing state layer. Every entity screen reads one
//! [`SliceState`] and drives it through a [`CrudStore`]; the lifecycle,
//! validation gating and stale-response handling are identical across
//! entities because they are written once, generically.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      cargodesk-store Internals                          │
//! │                                                                         │
//! │  view layer reads state / dispatches ops                                │
//! │        │                                                                │
//! │  ┌─────▼──────────────────────────────────────────────────────────┐    │
//! │  │  CrudStore<S>        one per entity (CompanyStore, OrderStore…)│    │
//! │  │    ├── SliceState    items · selected · loading · error ·      │    │
//! │  │    │                 success_message · pagination              │    │
//! │  │    └── CrudService   seam to cargodesk-client (mockable)       │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  AuthStore / ReportStore carry their own non-CRUD state shapes.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! 1. A request in flight is visible as `loading`; settling always clears it
//! 2. Drafts are validated before any network call
//! 3. A failed request never blanks rows the user is looking at
//! 4. A list response that arrives after a newer fetch is discarded

pub mod service;
pub mod slice;
pub mod store;

pub use service::{
    CompanyCrud, CrudService, InvoiceCrud, MenuCrud, OrderCrud, PackingListCrud, PermissionCrud,
    ShipmentCrud, VariantCrud, VgmCrud,
};
pub use slice::SliceState;
pub use store::{
    AuthState, AuthStore, CompanyStore, CrudStore, DashboardState, InvoiceStore, MenuStore,
    OrderStore, PackingListStore, PermissionStore, ReportStore, ShipmentStore, VariantStore,
    VgmStore,
};
