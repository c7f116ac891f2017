//! Catalog Domain
//!
//! Categories, subcategories and products stored in MongoDB, with product
//! search, filtering and pagination.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← Validation, uniqueness, reference checks, delete guard
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Traits + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, predicates
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, MongoCatalogRepository};
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoCatalogRepository::new(&client.database("catalog"));
//! repository.init_indexes().await?;
//!
//! // /categories, /subcategories, /products
//! let router = handlers::router(Arc::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod guard;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod pagination;
pub mod params;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult, Entity};
pub use handlers::{CategoriesApiDoc, ProductsApiDoc, SubCategoriesApiDoc};
pub use memory::InMemoryCatalogRepository;
pub use models::{
    Category, CreateCategory, CreateProduct, CreateSubCategory, Product, ProductView, Reference,
    ReferenceSummary, SubCategory, SubCategoryView, UpdateCategory, UpdateProduct,
    UpdateSubCategory,
};
pub use mongodb::MongoCatalogRepository;
pub use pagination::{PageMeta, PageRequest};
pub use query::{Predicate, ProductQuery};
pub use repository::{CatalogRepository, CategoryRepository, ProductRepository, SubCategoryRepository};
pub use service::{CategoryService, ProductPage, ProductService, SubCategoryService};
