//! In-process catalog store.
//!
//! Evaluates the same predicates as the MongoDB adapter and enforces the same
//! unique constraints. Used by tests and for running the API without a
//! database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product, SubCategory};
use crate::pagination::PageRequest;
use crate::query::{CategoryField, Predicate, ProductField, SubCategoryField};
use crate::repository::{CategoryRepository, ProductRepository, SubCategoryRepository};
use crate::validation::{DUPLICATE_CATEGORY, DUPLICATE_SUBCATEGORY, duplicate};

#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
    subcategories: Arc<RwLock<HashMap<Uuid, SubCategory>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; v7 ids grow with creation time.
fn newest_first<T>(mut records: Vec<T>, id: impl Fn(&T) -> Uuid) -> Vec<T> {
    records.sort_by_key(|record| std::cmp::Reverse(id(record)));
    records
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogRepository {
    async fn insert_category(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.name == category.name) {
            return Err(duplicate("name", DUPLICATE_CATEGORY));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn category_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn find_categories(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let matching = categories
            .values()
            .filter(|c| filter.matches(*c))
            .cloned()
            .collect();
        Ok(newest_first(matching, |c: &Category| c.id))
    }

    async fn category_ids(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Uuid>> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .filter(|c| filter.matches(*c))
            .map(|c| c.id)
            .collect())
    }

    async fn replace_category(&self, category: Category) -> CatalogResult<bool> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Ok(false);
        }
        if categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(duplicate("name", DUPLICATE_CATEGORY));
        }
        categories.insert(category.id, category);
        Ok(true)
    }

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.categories.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl SubCategoryRepository for InMemoryCatalogRepository {
    async fn insert_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory> {
        let mut subcategories = self.subcategories.write().await;
        if subcategories
            .values()
            .any(|s| s.name == subcategory.name && s.category == subcategory.category)
        {
            return Err(duplicate("name", DUPLICATE_SUBCATEGORY));
        }
        subcategories.insert(subcategory.id, subcategory.clone());
        Ok(subcategory)
    }

    async fn subcategory_by_id(&self, id: Uuid) -> CatalogResult<Option<SubCategory>> {
        Ok(self.subcategories.read().await.get(&id).cloned())
    }

    async fn subcategory_by_name(
        &self,
        name: &str,
        category: Uuid,
    ) -> CatalogResult<Option<SubCategory>> {
        let subcategories = self.subcategories.read().await;
        Ok(subcategories
            .values()
            .find(|s| s.name == name && s.category == category)
            .cloned())
    }

    async fn find_subcategories(
        &self,
        filter: Predicate<SubCategoryField>,
    ) -> CatalogResult<Vec<SubCategory>> {
        let subcategories = self.subcategories.read().await;
        let matching = subcategories
            .values()
            .filter(|s| filter.matches(*s))
            .cloned()
            .collect();
        Ok(newest_first(matching, |s: &SubCategory| s.id))
    }

    async fn subcategory_ids(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<Vec<Uuid>> {
        let subcategories = self.subcategories.read().await;
        Ok(subcategories
            .values()
            .filter(|s| filter.matches(*s))
            .map(|s| s.id)
            .collect())
    }

    async fn count_subcategories(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<u64> {
        let subcategories = self.subcategories.read().await;
        Ok(subcategories.values().filter(|s| filter.matches(*s)).count() as u64)
    }

    async fn replace_subcategory(&self, subcategory: SubCategory) -> CatalogResult<bool> {
        let mut subcategories = self.subcategories.write().await;
        if !subcategories.contains_key(&subcategory.id) {
            return Ok(false);
        }
        if subcategories.values().any(|s| {
            s.id != subcategory.id
                && s.name == subcategory.name
                && s.category == subcategory.category
        }) {
            return Err(duplicate("name", DUPLICATE_SUBCATEGORY));
        }
        subcategories.insert(subcategory.id, subcategory);
        Ok(true)
    }

    async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.subcategories.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogRepository {
    async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn product_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_products(
        &self,
        filter: Predicate<ProductField>,
        page: PageRequest,
    ) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let matching = products
            .values()
            .filter(|p| filter.matches(*p))
            .cloned()
            .collect();
        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(newest_first(matching, |p: &Product| p.id)
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn count_products(&self, filter: Predicate<ProductField>) -> CatalogResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(*p)).count() as u64)
    }

    async fn replace_product(&self, product: Product) -> CatalogResult<bool> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Ok(false);
        }
        products.insert(product.id, product);
        Ok(true)
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::models::{CreateCategory, CreateProduct, CreateSubCategory};

    fn category(name: &str) -> Category {
        Category::new(CreateCategory {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn product(name: &str, category: Uuid) -> Product {
        Product::new(
            CreateProduct {
                name: name.to_string(),
                price: Some(1.0),
                ..Default::default()
            },
            category,
            None,
        )
    }

    #[tokio::test]
    async fn test_category_name_is_unique_and_case_sensitive() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert_category(category("Phones")).await.unwrap();

        let err = repo.insert_category(category("Phones")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref v) if v[0].field == "name"));

        assert!(repo.insert_category(category("phones")).await.is_ok());
    }

    #[tokio::test]
    async fn test_replace_rejects_taken_name() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert_category(category("Phones")).await.unwrap();
        let mut laptops = repo.insert_category(category("Laptops")).await.unwrap();

        laptops.name = "Phones".to_string();
        assert!(repo.replace_category(laptops.clone()).await.is_err());

        laptops.name = "Laptops".to_string();
        laptops.description = "Portable".to_string();
        assert!(repo.replace_category(laptops).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_missing_returns_false() {
        let repo = InMemoryCatalogRepository::new();
        assert!(!repo.replace_category(category("Ghost")).await.unwrap());
        assert!(!repo.delete_category(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_subcategory_unique_per_category() {
        let repo = InMemoryCatalogRepository::new();
        let c = Uuid::now_v7();
        let d = Uuid::now_v7();
        let sub = |category: Uuid| {
            SubCategory::new(
                CreateSubCategory {
                    name: "Phones".to_string(),
                    ..Default::default()
                },
                category,
            )
        };

        repo.insert_subcategory(sub(c)).await.unwrap();
        assert!(repo.insert_subcategory(sub(c)).await.is_err());
        assert!(repo.insert_subcategory(sub(d)).await.is_ok());
        assert!(repo.subcategory_by_name("Phones", d).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_product_pages_newest_first() {
        let repo = InMemoryCatalogRepository::new();
        let cat = Uuid::now_v7();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(repo.insert_product(product(&format!("p{i}"), cat)).await.unwrap().id);
        }

        let page = repo
            .find_products(Predicate::True, PageRequest::new(2, 2))
            .await
            .unwrap();
        let names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p2", "p1"]);
        assert_eq!(repo.count_products(Predicate::True).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_ids_by_name_search() {
        let repo = InMemoryCatalogRepository::new();
        let phones = repo.insert_category(category("Smart Phones")).await.unwrap();
        repo.insert_category(category("Audio")).await.unwrap();

        let ids = repo
            .category_ids(Predicate::contains(CategoryField::Name, "PHONE"))
            .await
            .unwrap();
        assert_eq!(ids, vec![phones.id]);
    }
}
