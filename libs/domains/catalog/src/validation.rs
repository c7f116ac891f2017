//! Field rules shared by the catalog DTOs.
//!
//! Strings are trimmed while deserializing so the length rules see the value
//! that will be stored.

use axum_helpers::FieldViolation;
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::error::{CatalogError, CatalogResult};

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

pub const DUPLICATE_CATEGORY: &str = "Category name already exists";
pub const DUPLICATE_SUBCATEGORY: &str = "Subcategory name already exists in this category";

/// Trimmed string; `null` and a missing field become empty.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}

/// Trimmed optional string; `null` stays `None`.
pub fn trimmed_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

pub fn name_rule(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Name is required".to_string()));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(error(
            "length",
            format!("Name cannot exceed {NAME_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn description_rule(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(error(
            "length",
            format!("Description cannot exceed {DESCRIPTION_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

/// Run the derived rules and convert failures into [`CatalogError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> CatalogResult<()> {
    input
        .validate()
        .map_err(|e| CatalogError::Validation(FieldViolation::from_validation_errors(&e)))
}

pub fn duplicate(field: &str, message: &str) -> CatalogError {
    CatalogError::Validation(vec![FieldViolation::new(field, "unique", message)])
}

pub fn required(field: &str, message: &str) -> CatalogError {
    CatalogError::Validation(vec![FieldViolation::new(field, "required", message)])
}

pub fn in_use(field: &str, message: &str) -> CatalogError {
    CatalogError::Validation(vec![FieldViolation::new(field, "in_use", message)])
}

pub fn invalid_id(field: &str) -> CatalogError {
    CatalogError::Validation(vec![FieldViolation::new(field, "uuid", "Invalid ID format")])
}
