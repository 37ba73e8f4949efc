//! # Validation Module
//!
//! Draft validation for CargoDesk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client-side, synchronous)                       │
//! │  ├── Required-field / length / format checks on drafts                 │
//! │  └── Failures short-circuit BEFORE any request is dispatched           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server (out of scope here)                                   │
//! │  ├── Business rules, uniqueness, referential integrity                 │
//! │  └── Failures come back as HTTP errors and are normalized              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cargodesk_core::types::CompanyDraft;
//! use cargodesk_core::validation::Validate;
//!
//! let draft = CompanyDraft {
//!     name: "Acme Exports".to_string(),
//!     email: "sales@acme.example".to_string(),
//!     ..Default::default()
//! };
//! assert!(draft.validate().is_ok());
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::{
    CompanyDraft, InvoiceDraft, MenuDraft, OrderDraft, PackingListDraft, ProductVariantDraft,
    ShipmentDraft, SubmenuDraft, UserPermissionDraft, VgmDraft,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Implemented by every draft type; checked before any create/update dispatch.
pub trait Validate {
    /// Returns the first violated rule, if any.
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// Format Patterns
// =============================================================================

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn container_re() -> &'static Regex {
    // ISO 6346: four letters (owner + category) followed by seven digits.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{4}\d{7}$").expect("valid container pattern"))
}

fn ifsc_re() -> &'static Regex {
    // Four-letter bank code, a literal zero, six alphanumerics.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC pattern"))
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required, non-blank string field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `max` characters
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Example
/// ```rust
/// use cargodesk_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !email_re().is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 6346 container number (e.g. "MSKU1234567").
pub fn validate_container_number(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "containerNumber".to_string(),
        });
    }

    if !container_re().is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field: "containerNumber".to_string(),
            reason: "must be 4 letters followed by 7 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an IFSC bank routing code, when provided.
pub fn validate_ifsc(value: &str) -> ValidationResult<()> {
    if !ifsc_re().is_match(value.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: "ifscCode".to_string(),
            reason: "must be 4 letters, a zero, then 6 alphanumerics".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount in the smallest currency unit.
///
/// Zero is allowed (draft orders may be captured before pricing).
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a strictly positive quantity or weight.
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a server-assigned reference id (must be positive).
pub fn validate_reference(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validation
// =============================================================================

impl Validate for CompanyDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, 200)?;
        validate_email(&self.email)?;

        for bank in &self.bank_details {
            validate_required("accountName", &bank.account_name, 200)?;
            validate_required("accountNumber", &bank.account_number, 34)?;
            validate_required("bankName", &bank.bank_name, 200)?;
            if let Some(ifsc) = &bank.ifsc_code {
                validate_ifsc(ifsc)?;
            }
        }

        Ok(())
    }
}

impl Validate for OrderDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("orderNumber", &self.order_number, 50)?;
        validate_reference("companyId", self.company_id)?;
        validate_amount_cents("total", self.total_cents)?;
        validate_required("currency", &self.currency, 3)?;
        Ok(())
    }
}

impl Validate for ShipmentDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("orderId", self.order_id)?;
        if let Some(container) = &self.container_number {
            validate_container_number(container)?;
        }
        Ok(())
    }
}

impl Validate for PackingListDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("orderId", self.order_id)?;

        for container in &self.containers {
            if let Some(number) = &container.container_number {
                validate_container_number(number)?;
            }
            for b in &container.boxes {
                validate_positive("quantity", b.quantity as f64)?;
                validate_positive("netWeightKg", b.net_weight_kg)?;
                validate_positive("grossWeightKg", b.gross_weight_kg)?;
                if b.gross_weight_kg < b.net_weight_kg {
                    return Err(ValidationError::InvalidFormat {
                        field: "grossWeightKg".to_string(),
                        reason: "must be at least the net weight".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Validate for VgmDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("shipmentId", self.shipment_id)?;
        validate_container_number(&self.container_number)?;
        validate_positive("grossMassKg", self.gross_mass_kg)?;
        validate_required("authorizedPerson", &self.authorized_person, 200)?;
        Ok(())
    }
}

impl Validate for InvoiceDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("orderId", self.order_id)?;
        validate_required("invoiceNumber", &self.invoice_number, 50)?;
        validate_amount_cents("amount", self.amount_cents)?;
        validate_required("currency", &self.currency, 3)?;
        Ok(())
    }
}

impl Validate for MenuDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("label", &self.label, 100)?;
        validate_required("path", &self.path, 200)?;
        Ok(())
    }
}

impl Validate for SubmenuDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("menuId", self.menu_id)?;
        validate_required("label", &self.label, 100)?;
        validate_required("path", &self.path, 200)?;
        Ok(())
    }
}

impl Validate for UserPermissionDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_reference("userId", self.user_id)?;
        validate_reference("menuId", self.menu_id)?;
        Ok(())
    }
}

impl Validate for ProductVariantDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name, 200)?;
        validate_required("unit", &self.unit, 20)?;
        validate_positive("packSize", self.pack_size as f64)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BankDetail;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("sales@acme.example").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@signs.com").is_err());
    }

    #[test]
    fn test_validate_container_number() {
        assert!(validate_container_number("MSKU1234567").is_ok());
        assert!(validate_container_number("TGHU9876543").is_ok());

        assert!(validate_container_number("").is_err());
        assert!(validate_container_number("MSKU123").is_err());
        assert!(validate_container_number("msku1234567").is_err());
        assert!(validate_container_number("1234MSKU567").is_err());
    }

    #[test]
    fn test_validate_ifsc() {
        assert!(validate_ifsc("HDFC0001234").is_ok());
        assert!(validate_ifsc("SBIN0STEELX").is_ok());

        assert!(validate_ifsc("HDFC1001234").is_err()); // fifth char must be zero
        assert!(validate_ifsc("HD0001234").is_err());
    }

    #[test]
    fn test_company_draft_requires_name_and_email() {
        let draft = CompanyDraft::default();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Required { .. })
        ));

        let draft = CompanyDraft {
            name: "Acme Exports".to_string(),
            email: "bad-email".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_company_draft_checks_bank_details() {
        let draft = CompanyDraft {
            name: "Acme Exports".to_string(),
            email: "a@b.com".to_string(),
            bank_details: vec![BankDetail {
                account_name: "Acme Exports".to_string(),
                account_number: "1234567890".to_string(),
                bank_name: "HDFC".to_string(),
                branch: None,
                ifsc_code: Some("BAD".to_string()),
                swift_code: None,
            }],
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_order_draft() {
        let mut draft = OrderDraft {
            order_number: "ORD-2026-0001".to_string(),
            company_id: 1,
            total_cents: 0,
            currency: "USD".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.company_id = 0;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_packing_list_gross_below_net_rejected() {
        use crate::types::{PackingBox, PackingContainer};

        let draft = PackingListDraft {
            order_id: 1,
            containers: vec![PackingContainer {
                container_number: None,
                seal_number: None,
                boxes: vec![PackingBox {
                    box_number: 1,
                    product_variant_id: 1,
                    quantity: 10,
                    net_weight_kg: 12.0,
                    gross_weight_kg: 11.0,
                    dimensions: None,
                }],
            }],
            remarks: None,
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_vgm_draft() {
        let draft = VgmDraft {
            shipment_id: 3,
            container_number: "MSKU1234567".to_string(),
            gross_mass_kg: 21750.0,
            authorized_person: "R. Mehta".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        let draft = VgmDraft {
            gross_mass_kg: 0.0,
            ..draft
        };
        assert!(draft.validate().is_err());
    }
}
