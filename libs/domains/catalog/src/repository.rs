use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product, SubCategory};
use crate::pagination::PageRequest;
use crate::query::{CategoryField, Predicate, ProductField, SubCategoryField};

/// Category persistence.
///
/// Listings are ordered newest first. Inserting or replacing a category whose
/// name is already taken fails with a `name` validation error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert_category(&self, category: Category) -> CatalogResult<Category>;

    async fn category_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn category_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    async fn find_categories(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Category>>;

    /// Ids of matching categories
    async fn category_ids(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Uuid>>;

    /// Returns `false` when no record has the category's id
    async fn replace_category(&self, category: Category) -> CatalogResult<bool>;

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Subcategory persistence. `(name, category)` is unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubCategoryRepository: Send + Sync {
    async fn insert_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory>;

    async fn subcategory_by_id(&self, id: Uuid) -> CatalogResult<Option<SubCategory>>;

    /// The subcategory called `name` under `category`, if any
    async fn subcategory_by_name(
        &self,
        name: &str,
        category: Uuid,
    ) -> CatalogResult<Option<SubCategory>>;

    async fn find_subcategories(
        &self,
        filter: Predicate<SubCategoryField>,
    ) -> CatalogResult<Vec<SubCategory>>;

    async fn subcategory_ids(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<Vec<Uuid>>;

    async fn count_subcategories(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<u64>;

    async fn replace_subcategory(&self, subcategory: SubCategory) -> CatalogResult<bool>;

    async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Product persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert_product(&self, product: Product) -> CatalogResult<Product>;

    async fn product_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// One page of matching products, newest first
    async fn find_products(
        &self,
        filter: Predicate<ProductField>,
        page: PageRequest,
    ) -> CatalogResult<Vec<Product>>;

    async fn count_products(&self, filter: Predicate<ProductField>) -> CatalogResult<u64>;

    async fn replace_product(&self, product: Product) -> CatalogResult<bool>;

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool>;
}

/// A store holding all three collections.
pub trait CatalogRepository:
    CategoryRepository + SubCategoryRepository + ProductRepository + 'static
{
}

impl<T> CatalogRepository for T where
    T: CategoryRepository + SubCategoryRepository + ProductRepository + 'static
{
}
