//! # Domain Types
//!
//! Core domain types used throughout CargoDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Company      │   │      Order      │   │    Shipment     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name, email    │   │  order_number   │   │  vessel/voyage  │       │
//! │  │  bank_details   │   │  status         │   │  container_no   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PackingList    │   │  VgmDocument    │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  containers[]   │   │  gross_mass_kg  │   │  invoice_number │       │
//! │  │   └ boxes[]     │   │  method (1/2)   │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity's identity is its server-assigned numeric `id`. The client
//! never generates identity; records only exist after a successful create.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Identity
// =============================================================================

/// Implemented by every entity whose identity is a server-assigned `id`.
///
/// The store layer relies on this for update-by-id and delete-by-id slice
/// transitions.
pub trait HasId {
    /// Returns the server-assigned numeric id.
    fn id(&self) -> i64;
}

macro_rules! impl_has_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl HasId for $ty {
            #[inline]
            fn id(&self) -> i64 {
                self.id
            }
        })+
    };
}

// =============================================================================
// Company
// =============================================================================

/// A bank account attached to a company, printed on invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetail {
    /// Name on the account.
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub branch: Option<String>,
    /// Indian Financial System Code (routing identifier).
    pub ifsc_code: Option<String>,
    /// SWIFT code for international wires.
    pub swift_code: Option<String>,
}

/// An exporting company managed through the company setup screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// GST registration number.
    pub gst_number: Option<String>,
    /// Import Export Code.
    pub iec_number: Option<String>,
    /// Bank accounts shown on invoices, in display order.
    #[serde(default)]
    pub bank_details: Vec<BankDetail>,
    /// Server-side path of the uploaded logo, if any.
    pub logo_path: Option<String>,
    /// Server-side path of the uploaded authorized signature, if any.
    pub signature_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a company.
///
/// Logo and signature travel as separate multipart file parts, not in this
/// struct; `bank_details` is JSON-stringified into a single string field on
/// the wire (see the company service).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub iec_number: Option<String>,
    #[serde(default)]
    pub bank_details: Vec<BankDetail>,
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle status of an export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order captured but not yet confirmed by the buyer.
    #[default]
    Draft,
    /// Buyer confirmed; production can begin.
    Confirmed,
    /// Goods being manufactured/packed.
    InProduction,
    /// Packed and awaiting vessel.
    ReadyToShip,
    /// On the water.
    Shipped,
    /// Received at destination.
    Delivered,
    /// Cancelled at any point before shipping.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order can still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            OrderStatus::Draft | OrderStatus::Confirmed | OrderStatus::InProduction
        )
    }

    /// Returns true if the order has left the warehouse.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::ReadyToShip => "ready_to_ship",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// An export order, the root of the shipment/packing/invoice lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Business identifier shown to users (e.g. "ORD-2026-0142").
    pub order_number: String,
    /// The company this order belongs to.
    pub company_id: i64,
    /// Proforma invoice number referenced by the buyer.
    pub pi_number: Option<String>,
    pub status: OrderStatus,
    pub buyer_name: Option<String>,
    pub destination_port: Option<String>,
    /// Order value in the smallest currency unit.
    pub total_cents: i64,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_number: String,
    pub company_id: i64,
    pub pi_number: Option<String>,
    pub buyer_name: Option<String>,
    pub destination_port: Option<String>,
    pub total_cents: i64,
    pub currency: String,
    pub notes: Option<String>,
}

// =============================================================================
// Shipment
// =============================================================================

/// Vessel/container details for a dispatched order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: i64,
    pub order_id: i64,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    /// ISO 6346 container number (e.g. "MSKU1234567").
    pub container_number: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    /// Estimated time of departure.
    pub etd: Option<NaiveDate>,
    /// Estimated time of arrival.
    pub eta: Option<NaiveDate>,
    /// Bill of lading number, once issued.
    pub bl_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDraft {
    pub order_id: i64,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub container_number: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    pub etd: Option<NaiveDate>,
    pub eta: Option<NaiveDate>,
    pub bl_number: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Packing List
// =============================================================================

/// One box inside a packing container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingBox {
    /// Box number within the container (printed on the carton).
    pub box_number: i64,
    /// Product variant packed in this box.
    pub product_variant_id: i64,
    pub quantity: i64,
    pub net_weight_kg: f64,
    pub gross_weight_kg: f64,
    /// L×W×H in centimeters, free-form (e.g. "60x40x40").
    pub dimensions: Option<String>,
}

/// One container on a packing list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingContainer {
    pub container_number: Option<String>,
    pub seal_number: Option<String>,
    #[serde(default)]
    pub boxes: Vec<PackingBox>,
}

/// A packing list for an order: containers, each holding numbered boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    pub id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub containers: Vec<PackingContainer>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PackingList {
    /// Total number of boxes across all containers.
    pub fn total_boxes(&self) -> usize {
        self.containers.iter().map(|c| c.boxes.len()).sum()
    }

    /// Total gross weight across all containers, in kilograms.
    pub fn total_gross_weight_kg(&self) -> f64 {
        self.containers
            .iter()
            .flat_map(|c| c.boxes.iter())
            .map(|b| b.gross_weight_kg)
            .sum()
    }
}

/// Create/update payload for a packing list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListDraft {
    pub order_id: i64,
    #[serde(default)]
    pub containers: Vec<PackingContainer>,
    pub remarks: Option<String>,
}

// =============================================================================
// VGM Document
// =============================================================================

/// How the verified gross mass was determined (SOLAS VI/2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeighingMethod {
    /// Weighing the packed and sealed container as a whole.
    #[default]
    Method1,
    /// Summing the weights of cargo, dunnage and container tare.
    Method2,
}

/// A Verified Gross Mass declaration for a container on a shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VgmDocument {
    pub id: i64,
    pub shipment_id: i64,
    pub container_number: String,
    /// Verified gross mass in kilograms.
    pub gross_mass_kg: f64,
    pub method: WeighingMethod,
    /// Weighbridge slip reference for Method 1.
    pub weighbridge_slip_number: Option<String>,
    /// Person authorized to sign the declaration.
    pub authorized_person: String,
    pub weighing_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a VGM document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VgmDraft {
    pub shipment_id: i64,
    pub container_number: String,
    pub gross_mass_kg: f64,
    pub method: WeighingMethod,
    pub weighbridge_slip_number: Option<String>,
    pub authorized_person: String,
    pub weighing_date: Option<NaiveDate>,
}

// =============================================================================
// Invoice
// =============================================================================

/// Payment status of a commercial invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
}

/// A commercial invoice raised against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub order_id: i64,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    pub currency: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub order_id: i64,
    pub invoice_number: String,
    pub amount_cents: i64,
    pub currency: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

// =============================================================================
// Menu / Submenu
// =============================================================================

/// A top-level navigation menu entry managed from the menu screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub label: String,
    /// Route path the entry navigates to.
    pub path: String,
    pub icon: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    #[serde(default)]
    pub submenus: Vec<Submenu>,
}

/// A nested entry under a menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submenu {
    pub id: i64,
    pub menu_id: i64,
    pub label: String,
    pub path: String,
    pub display_order: i64,
    pub is_active: bool,
}

/// Create/update payload for a menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    pub label: String,
    pub path: String,
    pub icon: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
}

/// Create/update payload for a submenu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuDraft {
    pub menu_id: i64,
    pub label: String,
    pub path: String,
    pub display_order: i64,
    pub is_active: bool,
}

// =============================================================================
// User Permission
// =============================================================================

/// Per-user access flags for one menu (optionally one submenu).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermission {
    pub id: i64,
    pub user_id: i64,
    pub menu_id: i64,
    pub submenu_id: Option<i64>,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Create/update payload for a user permission row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionDraft {
    pub user_id: i64,
    pub menu_id: i64,
    pub submenu_id: Option<i64>,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

// =============================================================================
// Product Variant
// =============================================================================

/// A sellable variant of a product (size/pack configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: i64,
    pub name: String,
    /// Harmonized System of Nomenclature code for customs.
    pub hsn_code: Option<String>,
    /// Unit of measure (e.g. "kg", "pcs").
    pub unit: String,
    /// Units per pack (e.g. 12 jars per carton).
    pub pack_size: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a product variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantDraft {
    pub name: String,
    pub hsn_code: Option<String>,
    pub unit: String,
    pub pack_size: i64,
    pub is_active: bool,
}

// =============================================================================
// Auth / User
// =============================================================================

/// The authenticated user returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Shipments dispatched in one calendar month, for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyShipments {
    /// Month in "YYYY-MM" form, as the server reports it.
    pub month: String,
    pub count: i64,
}

/// Aggregate counts for the reporting dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_companies: i64,
    pub total_orders: i64,
    pub open_orders: i64,
    pub total_shipments: i64,
    pub pending_invoices: i64,
    #[serde(default)]
    pub monthly_shipments: Vec<MonthlyShipments>,
}

impl_has_id!(
    Company,
    Order,
    Shipment,
    PackingList,
    VgmDocument,
    Invoice,
    Menu,
    Submenu,
    UserPermission,
    ProductVariant,
    User,
);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Draft);
    }

    #[test]
    fn test_order_status_editable() {
        assert!(OrderStatus::Draft.is_editable());
        assert!(OrderStatus::InProduction.is_editable());
        assert!(!OrderStatus::Shipped.is_editable());
        assert!(!OrderStatus::Cancelled.is_editable());
    }

    #[test]
    fn test_order_status_wire_name() {
        let json = serde_json::to_string(&OrderStatus::ReadyToShip).unwrap();
        assert_eq!(json, "\"ready_to_ship\"");
    }

    #[test]
    fn test_packing_list_totals() {
        let list = PackingList {
            id: 1,
            order_id: 10,
            containers: vec![PackingContainer {
                container_number: Some("MSKU1234567".to_string()),
                seal_number: None,
                boxes: vec![
                    PackingBox {
                        box_number: 1,
                        product_variant_id: 5,
                        quantity: 24,
                        net_weight_kg: 10.0,
                        gross_weight_kg: 11.5,
                        dimensions: None,
                    },
                    PackingBox {
                        box_number: 2,
                        product_variant_id: 5,
                        quantity: 24,
                        net_weight_kg: 10.0,
                        gross_weight_kg: 11.5,
                        dimensions: None,
                    },
                ],
            }],
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(list.total_boxes(), 2);
        assert!((list.total_gross_weight_kg() - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_company_camel_case_wire_names() {
        let json = r#"{
            "id": 7,
            "name": "Acme",
            "email": "a@b.com",
            "gstNumber": "27AAPFU0939F1ZV",
            "bankDetails": [],
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.id, 7);
        assert_eq!(company.gst_number.as_deref(), Some("27AAPFU0939F1ZV"));
    }
}
