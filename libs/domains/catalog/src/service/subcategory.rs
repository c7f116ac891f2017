use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::models::{CreateSubCategory, SubCategory, SubCategoryView, UpdateSubCategory};
use crate::query::{Predicate, ProductField, compose_subcategory_filter};
use crate::repository::CatalogRepository;
use crate::validation::{DUPLICATE_SUBCATEGORY, duplicate, in_use, required, validate_input};

use super::{category_summaries, require_category};

pub struct SubCategoryService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> SubCategoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn view(&self, subcategory: SubCategory) -> CatalogResult<SubCategoryView> {
        let category = self.repository.category_by_id(subcategory.category).await?;
        Ok(subcategory.into_view(category.map(|c| c.summary())))
    }

    async fn ensure_unique(&self, name: &str, category: Uuid, except: Option<Uuid>) -> CatalogResult<()> {
        match self.repository.subcategory_by_name(name, category).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(duplicate("name", DUPLICATE_SUBCATEGORY))
            }
            _ => Ok(()),
        }
    }

    /// A subcategory must stay inside the category of every product that uses it.
    async fn ensure_unreferenced(&self, id: Uuid) -> CatalogResult<()> {
        let products = self
            .repository
            .count_products(Predicate::eq(ProductField::SubCategory, id))
            .await?;
        if products > 0 {
            return Err(in_use(
                "category",
                &format!(
                    "Cannot move subcategory. It has {products} products associated with it."
                ),
            ));
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(subcategory_name = %input.name))]
    pub async fn create_subcategory(&self, input: CreateSubCategory) -> CatalogResult<SubCategoryView> {
        validate_input(&input)?;
        let category = input
            .category
            .ok_or_else(|| required("category", "Category is required"))?;

        require_category(self.repository.as_ref(), "category", category).await?;
        self.ensure_unique(&input.name, category, None).await?;

        let subcategory = self
            .repository
            .insert_subcategory(SubCategory::new(input, category))
            .await?;
        self.view(subcategory).await
    }

    #[instrument(skip(self))]
    pub async fn get_subcategory(&self, id: Uuid) -> CatalogResult<SubCategoryView> {
        let subcategory = self.find(id).await?;
        self.view(subcategory).await
    }

    /// Subcategories newest first, optionally only those of one category.
    #[instrument(skip(self))]
    pub async fn list_subcategories(
        &self,
        category_id: Option<Uuid>,
    ) -> CatalogResult<Vec<SubCategoryView>> {
        let subcategories = self
            .repository
            .find_subcategories(compose_subcategory_filter(category_id))
            .await?;

        let summaries = category_summaries(
            self.repository.as_ref(),
            subcategories.iter().map(|s| s.category),
        )
        .await?;

        Ok(subcategories
            .into_iter()
            .map(|s| {
                let category = summaries.get(&s.category).cloned();
                s.into_view(category)
            })
            .collect())
    }

    #[instrument(skip(self, input))]
    pub async fn update_subcategory(
        &self,
        id: Uuid,
        input: UpdateSubCategory,
    ) -> CatalogResult<SubCategoryView> {
        validate_input(&input)?;

        let mut subcategory = self.find(id).await?;

        let category = input.category.unwrap_or(subcategory.category);
        if category != subcategory.category {
            require_category(self.repository.as_ref(), "category", category).await?;
            self.ensure_unreferenced(id).await?;
        }

        let name = input.name.as_deref().unwrap_or(&subcategory.name);
        if name != subcategory.name || category != subcategory.category {
            self.ensure_unique(name, category, Some(id)).await?;
        }

        subcategory.apply_update(input);
        if !self.repository.replace_subcategory(subcategory.clone()).await? {
            return Err(CatalogError::not_found(Entity::SubCategory, id));
        }

        tracing::info!(subcategory_id = %id, "Subcategory updated");
        self.view(subcategory).await
    }

    #[instrument(skip(self))]
    pub async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_subcategory(id).await? {
            return Err(CatalogError::not_found(Entity::SubCategory, id));
        }

        tracing::info!(subcategory_id = %id, "Subcategory deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> CatalogResult<SubCategory> {
        self.repository
            .subcategory_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Entity::SubCategory, id))
    }
}

impl<R: CatalogRepository> Clone for SubCategoryService<R> {
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
    use crate::models::{Category, CreateCategory, CreateProduct, Product, Reference};
    use crate::repository::{CategoryRepository, ProductRepository};

    struct Fixture {
        service: SubCategoryService<InMemoryCatalogRepository>,
        repo: Arc<InMemoryCatalogRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            let repo = Arc::new(InMemoryCatalogRepository::new());
            Self {
                service: SubCategoryService::new(Arc::clone(&repo)),
                repo,
            }
        }

        async fn category(&self, name: &str) -> Category {
            self.repo
                .insert_category(Category::new(CreateCategory {
                    name: name.to_string(),
                    ..Default::default()
                }))
                .await
                .unwrap()
        }
    }

    fn create(name: &str, category: Uuid) -> CreateSubCategory {
        CreateSubCategory {
            name: name.to_string(),
            description: String::new(),
            category: Some(category),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_name_unique_within_category_only() {
        let fx = Fixture::new();
        let c = fx.category("Electronics").await;
        let d = fx.category("Accessories").await;

        fx.service.create_subcategory(create("Phones", c.id)).await.unwrap();
        let err = fx
            .service
            .create_subcategory(create("Phones", c.id))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref v) if v[0].code == "unique"));

        assert!(fx.service.create_subcategory(create("Phones", d.id)).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let fx = Fixture::new();
        let missing = Uuid::now_v7();
        let err = fx
            .service
            .create_subcategory(create("Phones", missing))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidReference { field: "category", id, .. } if id == missing
        ));

        let no_category = CreateSubCategory {
            name: "Phones".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            fx.service.create_subcategory(no_category).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_view_resolves_category() {
        let fx = Fixture::new();
        let c = fx.category("Electronics").await;
        let created = fx.service.create_subcategory(create("Phones", c.id)).await.unwrap();

        match created.category {
            Reference::Resolved(ref summary) => assert_eq!(summary.name, "Electronics"),
            ref other => panic!("expected resolved category, got {other:?}"),
        }
        assert_eq!(fx.service.get_subcategory(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let fx = Fixture::new();
        let c = fx.category("Electronics").await;
        let d = fx.category("Home").await;
        fx.service.create_subcategory(create("Phones", c.id)).await.unwrap();
        fx.service.create_subcategory(create("Laptops", c.id)).await.unwrap();
        fx.service.create_subcategory(create("Kitchen", d.id)).await.unwrap();

        let all = fx.service.list_subcategories(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Kitchen");

        let electronics = fx.service.list_subcategories(Some(c.id)).await.unwrap();
        let names: Vec<&str> = electronics.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Laptops", "Phones"]);
        assert!(electronics.iter().all(|s| s.category.id() == c.id));
    }

    #[tokio::test]
    async fn test_update_move_checks_target() {
        let fx = Fixture::new();
        let c = fx.category("Electronics").await;
        let d = fx.category("Accessories").await;
        let phones = fx.service.create_subcategory(create("Phones", c.id)).await.unwrap();
        fx.service.create_subcategory(create("Phones", d.id)).await.unwrap();

        let clash = UpdateSubCategory {
            category: Some(d.id),
            ..Default::default()
        };
        assert!(fx.service.update_subcategory(phones.id, clash).await.is_err());

        let missing = UpdateSubCategory {
            category: Some(Uuid::now_v7()),
            ..Default::default()
        };
        assert!(matches!(
            fx.service.update_subcategory(phones.id, missing).await.unwrap_err(),
            CatalogError::InvalidReference { .. }
        ));

        let rename = UpdateSubCategory {
            name: Some("Mobile".to_string()),
            category: Some(d.id),
            ..Default::default()
        };
        let moved = fx.service.update_subcategory(phones.id, rename).await.unwrap();
        assert_eq!(moved.name, "Mobile");
        assert_eq!(moved.category.id(), d.id);
    }

    #[tokio::test]
    async fn test_move_rejected_while_products_use_it() {
        let fx = Fixture::new();
        let phones = fx.category("Phones").await;
        let audio = fx.category("Audio").await;
        let smart = fx.service.create_subcategory(create("Smart", phones.id)).await.unwrap();

        let mut pixel = Product::new(
            CreateProduct {
                name: "Pixel".to_string(),
                price: Some(699.0),
                category: Some(phones.id),
                sub_category: Some(smart.id),
                ..Default::default()
            },
            phones.id,
            Some(smart.id),
        );
        pixel = fx.repo.insert_product(pixel).await.unwrap();

        let to_audio = UpdateSubCategory {
            category: Some(audio.id),
            ..Default::default()
        };
        let err = fx
            .service
            .update_subcategory(smart.id, to_audio.clone())
            .await
            .unwrap_err();
        match err {
            CatalogError::Validation(ref v) => {
                assert_eq!(v[0].field, "category");
                assert_eq!(v[0].code, "in_use");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(
            fx.service.get_subcategory(smart.id).await.unwrap().category.id(),
            phones.id
        );

        // renaming in place is still allowed
        let rename = UpdateSubCategory {
            name: Some("Smartphones".to_string()),
            ..Default::default()
        };
        assert!(fx.service.update_subcategory(smart.id, rename).await.is_ok());

        fx.repo.delete_product(pixel.id).await.unwrap();
        let moved = fx.service.update_subcategory(smart.id, to_audio).await.unwrap();
        assert_eq!(moved.category.id(), audio.id);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let fx = Fixture::new();
        let c = fx.category("Electronics").await;
        let phones = fx.service.create_subcategory(create("Phones", c.id)).await.unwrap();

        fx.service.delete_subcategory(phones.id).await.unwrap();
        assert!(matches!(
            fx.service.get_subcategory(phones.id).await.unwrap_err(),
            CatalogError::NotFound { entity: Entity::SubCategory, .. }
        ));
        assert!(fx.service.delete_subcategory(phones.id).await.is_err());
    }
}
