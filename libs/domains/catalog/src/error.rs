use axum::response::{IntoResponse, Response};
use axum_helpers::{validation_message, AppError, FieldViolation};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The three catalog record types, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    SubCategory,
    Product,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Category => "Category",
            Entity::SubCategory => "Subcategory",
            Entity::Product => "Product",
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{}", validation_message(.0))]
    Validation(Vec<FieldViolation>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: Uuid },

    #[error("Cannot delete category. It has {subcategories} subcategories and {products} products associated with it.")]
    DependencyExists { subcategories: u64, products: u64 },

    /// A create/update names a category or subcategory that does not exist,
    /// or a subcategory outside the product's category.
    #[error("{field} does not reference a valid {entity}: {id}")]
    InvalidReference {
        field: &'static str,
        entity: Entity,
        id: Uuid,
    },

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        CatalogError::NotFound { entity, id }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(violations) => AppError::Validation(violations),
            CatalogError::NotFound { entity, .. } => AppError::NotFound(format!("{entity} not found")),
            err @ CatalogError::DependencyExists { .. } => AppError::BadRequest(err.to_string()),
            CatalogError::InvalidReference { field, entity, id } => {
                AppError::Validation(vec![FieldViolation::new(
                    field,
                    "reference",
                    format!("{entity} {id} does not exist or does not match"),
                )])
            }
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_dependency_message() {
        let err = CatalogError::DependencyExists {
            subcategories: 2,
            products: 5,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete category. It has 2 subcategories and 5 products associated with it."
        );
    }

    #[test]
    fn test_status_mapping() {
        let id = Uuid::now_v7();
        let cases = [
            (
                CatalogError::Validation(vec![FieldViolation::new("name", "unique", "taken")]),
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::not_found(Entity::Product, id), StatusCode::NOT_FOUND),
            (
                CatalogError::DependencyExists {
                    subcategories: 1,
                    products: 0,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::InvalidReference {
                    field: "category",
                    entity: Entity::Category,
                    id,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Database("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let err: AppError = CatalogError::not_found(Entity::SubCategory, Uuid::now_v7()).into();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Subcategory not found"));
    }
}
