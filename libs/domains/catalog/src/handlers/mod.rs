//! HTTP endpoints, one router per resource.
//!
//! Mount them under `/api/categories`, `/api/subcategories` and
//! `/api/products`.

pub mod categories;
pub mod products;
pub mod subcategories;

pub use categories::CategoriesApiDoc;
pub use products::ProductsApiDoc;
pub use subcategories::SubCategoriesApiDoc;

use axum::Router;
use std::sync::Arc;

use crate::repository::CatalogRepository;
use crate::service::{CategoryService, ProductService, SubCategoryService};

/// All catalog routers over one shared store, nested at their resource paths.
pub fn router<R: CatalogRepository>(repository: Arc<R>) -> Router {
    Router::new()
        .nest(
            "/categories",
            categories::router(CategoryService::new(Arc::clone(&repository))),
        )
        .nest(
            "/subcategories",
            subcategories::router(SubCategoryService::new(Arc::clone(&repository))),
        )
        .nest("/products", products::router(ProductService::new(repository)))
}
