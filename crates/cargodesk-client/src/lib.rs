//! # cargodesk-client: REST Boundary for CargoDesk
//!
//! Everything that touches the network lives here: the HTTP wrapper with its
//! one-shot 401 refresh, the session token store, the error normalizer, and
//! one typed service per entity.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    cargodesk-client Internals                           │
//! │                                                                         │
//! │  cargodesk-store calls                                                  │
//! │        │                                                                │
//! │  ┌─────▼──────────────────────────────────────────────────────────┐    │
//! │  │  services/   AuthService, CompanyService, OrderService, ...    │    │
//! │  │              build request → parse envelope → normalize error  │    │
//! │  └─────┬──────────────────────────────────────────────────────────┘    │
//! │        │                                                                │
//! │  ┌─────▼───────────┐   ┌──────────────┐   ┌───────────────────────┐   │
//! │  │  http::ApiClient │◄──┤ SessionStore │   │ normalize::normalize  │   │
//! │  │  bearer + 401    │   │ token pair   │   │ failure → ApiError    │   │
//! │  │  refresh/replay  │   │ (TOML mirror)│   │ (message taxonomy)    │   │
//! │  └─────┬───────────┘   └──────────────┘   └───────────────────────┘   │
//! │        │                                                                │
//! │        ▼  reqwest over HTTPS                                           │
//! │    REST API (…/api/v1)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! 1. Every failing operation produces an [`ApiError`] whose message is safe
//!    to show a user - raw transport detail is logged, never displayed
//! 2. A 401 triggers at most one refresh-and-replay per original request
//! 3. Envelope unwrapping happens exactly once, in `cargodesk-core`;
//!    services hand precise types upward

pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod normalize;
pub mod services;
pub mod session;

pub use config::ClientConfig;
pub use download::PdfDownload;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use http::{ApiClient, BinaryResponse};
pub use normalize::{normalize, TransportFailure};
pub use services::{
    AuthService, CompanyService, Credentials, FilePart, InvoiceService, ListQuery, MenuService,
    OrderService, PackingListService, PermissionService, ReportService, ShipmentService,
    VariantService, VgmService,
};
pub use session::{SessionStore, SessionTokens};
