use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::guard;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::query::Predicate;
use crate::repository::CatalogRepository;
use crate::validation::{DUPLICATE_CATEGORY, duplicate, validate_input};

pub struct CategoryService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CategoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        validate_input(&input)?;

        if self.repository.category_by_name(&input.name).await?.is_some() {
            return Err(duplicate("name", DUPLICATE_CATEGORY));
        }

        self.repository.insert_category(Category::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .category_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Entity::Category, id))
    }

    /// All categories, newest first
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.find_categories(Predicate::True).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        validate_input(&input)?;

        let mut category = self.get_category(id).await?;

        if let Some(ref name) = input.name {
            if name != &category.name && self.repository.category_by_name(name).await?.is_some() {
                return Err(duplicate("name", DUPLICATE_CATEGORY));
            }
        }

        category.apply_update(input);
        if !self.repository.replace_category(category.clone()).await? {
            return Err(CatalogError::not_found(Entity::Category, id));
        }

        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Delete a category that no subcategory or product refers to.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        self.get_category(id).await?;

        let store = self.repository.as_ref();
        guard::ensure_deletable(store, store, id).await?;

        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::not_found(Entity::Category, id));
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

impl<R: CatalogRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalogRepository;
    use crate::models::{CreateProduct, CreateSubCategory, Product, SubCategory};
    use crate::repository::{ProductRepository, SubCategoryRepository};

    fn service() -> (CategoryService<InMemoryCatalogRepository>, Arc<InMemoryCatalogRepository>) {
        let repo = Arc::new(InMemoryCatalogRepository::new());
        (CategoryService::new(Arc::clone(&repo)), repo)
    }

    fn create(name: &str) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
            description: format!("{name} description"),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (service, _) = service();
        let created = service.create_category(create("Phones")).await.unwrap();
        let fetched = service.get_category(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.description, "Phones description");
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let (service, _) = service();
        service.create_category(create("Phones")).await.unwrap();

        let err = service.create_category(create("Phones")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref v) if v[0].field == "name"));

        assert!(service.create_category(create("PHONES")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let (service, _) = service();
        let err = service.create_category(create("")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_rechecks_name_only_when_changed() {
        let (service, _) = service();
        service.create_category(create("Phones")).await.unwrap();
        let laptops = service.create_category(create("Laptops")).await.unwrap();

        let same_name = UpdateCategory {
            name: Some("Laptops".to_string()),
            description: Some("Portable".to_string()),
            is_active: None,
        };
        let updated = service.update_category(laptops.id, same_name).await.unwrap();
        assert_eq!(updated.description, "Portable");
        assert!(updated.updated_at >= laptops.updated_at);

        let taken = UpdateCategory {
            name: Some("Phones".to_string()),
            ..Default::default()
        };
        assert!(service.update_category(laptops.id, taken).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, _) = service();
        let err = service
            .update_category(Uuid::now_v7(), UpdateCategory::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: Entity::Category, .. }));
    }

    #[tokio::test]
    async fn test_delete_unreferenced() {
        let (service, _) = service();
        let category = service.create_category(create("Phones")).await.unwrap();

        service.delete_category(category.id).await.unwrap();

        let err = service.get_category(category.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert!(matches!(
            service.delete_category(category.id).await.unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_dependents() {
        let (service, repo) = service();
        let category = service.create_category(create("Phones")).await.unwrap();

        repo.insert_subcategory(SubCategory::new(
            CreateSubCategory {
                name: "Smartphones".to_string(),
                ..Default::default()
            },
            category.id,
        ))
        .await
        .unwrap();
        for name in ["A", "B"] {
            repo.insert_product(Product::new(
                CreateProduct {
                    name: name.to_string(),
                    price: Some(1.0),
                    ..Default::default()
                },
                category.id,
                None,
            ))
            .await
            .unwrap();
        }

        let err = service.delete_category(category.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot delete category. It has 1 subcategories and 2 products associated with it."
        );
        assert!(service.get_category(category.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (service, _) = service();
        for name in ["First", "Second", "Third"] {
            service.create_category(create(name)).await.unwrap();
        }
        let names: Vec<String> = service
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }
}
