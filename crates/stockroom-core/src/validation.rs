//! # Validation Module
//!
//! Field-level validation for entity writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Form layer (web)                                          │
//! │  ├── Basic format checks, immediate user feedback                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - constraint checks before any SQL runs       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / CHECK constraints                                   │
//! │  ├── UNIQUE constraint (customer email)                             │
//! │  └── Foreign key constraints                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed check rejects the write in full; the returned error names the
//! offending field.

use crate::error::{ValidationError, ValidationResult};

/// Longest accepted name-like field (product name, customer names).
const MAX_NAME_LEN: usize = 255;

/// Longest accepted email address.
const MAX_EMAIL_LEN: usize = 254;

/// Longest accepted phone number.
const MAX_PHONE_LEN: usize = 15;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: required, at most 255 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product description: required free text.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents: zero or greater.
pub fn validate_unit_price(unit_price_cents: i64) -> ValidationResult<()> {
    if unit_price_cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates an on-hand quantity: zero or greater.
pub fn validate_quantity_on_hand(quantity_on_hand: i64) -> ValidationResult<()> {
    if quantity_on_hand < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity_on_hand".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale quantity: strictly positive.
pub fn validate_quantity_sold(quantity_sold: i64) -> ValidationResult<()> {
    if quantity_sold <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity_sold".to_string(),
        });
    }

    Ok(())
}

/// Validates a rollup sales count: zero or greater.
pub fn validate_sales_count(sales_count: i64) -> ValidationResult<()> {
    if sales_count < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "sales_count".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Not a full RFC 5322 parser - the same pragmatic shape check web frameworks
/// apply: non-empty local part, an `@`, and a domain containing a dot.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() {
        return Err(invalid("missing local part"));
    }

    if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') {
        return Err(invalid("invalid domain"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }

    Ok(())
}

/// Validates an optional name-like field (customer first/last name): may be
/// blank, at most 255 characters.
pub fn validate_optional_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a phone number: may be blank, at most 15 characters.
pub fn validate_phone_number(phone_number: &str) -> ValidationResult<()> {
    if phone_number.len() > MAX_PHONE_LEN {
        return Err(ValidationError::TooLong {
            field: "phone_number".to_string(),
            max: MAX_PHONE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================
// The repositories run these before any SQL; insert and update share them.

/// Validates the writable fields of a product.
pub fn validate_product_fields(
    name: &str,
    description: &str,
    unit_price_cents: i64,
    quantity_on_hand: i64,
) -> ValidationResult<()> {
    validate_product_name(name)?;
    validate_description(description)?;
    validate_unit_price(unit_price_cents)?;
    validate_quantity_on_hand(quantity_on_hand)?;
    Ok(())
}

/// Validates the writable fields of a customer.
pub fn validate_customer_fields(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone_number: &str,
) -> ValidationResult<()> {
    validate_optional_name("first_name", first_name)?;
    validate_optional_name("last_name", last_name)?;
    validate_email(email)?;
    validate_phone_number(phone_number)?;
    Ok(())
}

/// Validates the writable fields of an analytics rollup.
pub fn validate_analytics_fields(sales_count: i64) -> ValidationResult<()> {
    validate_sales_count(sales_count)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
