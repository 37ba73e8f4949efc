//! # cargodesk-core: Pure Domain Model for CargoDesk
//!
//! This crate is the **heart** of CargoDesk. It contains the domain model,
//! response-envelope parsing and draft validation as pure code with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CargoDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      View Layer (out of scope)                  │   │
//! │  │    Company setup ─ Orders ─ Packing ─ VGM ─ Invoices ─ Reports │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reads state / dispatches ops           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cargodesk-store (CRUD slices)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               cargodesk-client (REST boundary)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cargodesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ envelope  │  │validation │  │   error   │  │   │
//! │  │   │  Company  │  │ ListPage  │  │  drafts   │  │ CoreError │  │   │
//! │  │   │  Order…   │  │ Mutation  │  │  checks   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Order, Shipment, PackingList, ...)
//! - [`envelope`] - Response envelope parsing (`{data, message}` and list shapes)
//! - [`validation`] - Draft validation run before any dispatch
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and async I/O are FORBIDDEN here
//! 3. **Server-Assigned Identity**: Entity ids come from the server; the client
//!    never fabricates one
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cargodesk_core::Order` instead of
// `use cargodesk_core::types::Order`

pub use envelope::{parse_list, parse_mutation, parse_one, ListPage, Mutation, Pagination};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
pub use validation::{validate_required, Validate, ValidationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for list requests when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Hard cap on requested page size.
///
/// ## Business Reason
/// Keeps a single list response bounded; the admin screens paginate rather
/// than render thousands of rows.
pub const MAX_PAGE_LIMIT: i64 = 100;
