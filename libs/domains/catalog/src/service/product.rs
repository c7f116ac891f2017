use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::models::{CreateProduct, Product, ProductView, UpdateProduct};
use crate::pagination::{PageMeta, PageRequest};
use crate::query::{
    CategoryField, ProductQuery, SearchMatches, SubCategoryField, compose_product_filter,
    name_search,
};
use crate::repository::CatalogRepository;
use crate::validation::{required, validate_input};

use super::{category_summaries, require_category, require_subcategory_of, subcategory_summaries};

/// One page of products with its metadata.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<ProductView>,
    pub meta: PageMeta,
}

pub struct ProductService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<ProductView> {
        validate_input(&input)?;
        let category = input
            .category
            .ok_or_else(|| required("category", "Category is required"))?;

        self.check_references(category, input.sub_category).await?;

        let sub_category = input.sub_category;
        let product = self
            .repository
            .insert_product(Product::new(input, category, sub_category))
            .await?;
        self.view(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductView> {
        let product = self.find(id).await?;
        self.view(product).await
    }

    /// Search, filter and paginate products, newest first.
    ///
    /// A search term is first matched against category and subcategory names so
    /// products are also found through the name of their category or
    /// subcategory.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: ProductQuery,
        page: PageRequest,
    ) -> CatalogResult<ProductPage> {
        let matches = match query.search_term() {
            Some(term) => {
                let (category_ids, subcategory_ids) = tokio::try_join!(
                    self.repository
                        .category_ids(name_search(CategoryField::Name, term)),
                    self.repository
                        .subcategory_ids(name_search(SubCategoryField::Name, term)),
                )?;
                SearchMatches {
                    category_ids,
                    subcategory_ids,
                }
            }
            None => SearchMatches::default(),
        };

        let filter = compose_product_filter(&query, &matches);
        let (total_count, products) = tokio::try_join!(
            self.repository.count_products(filter.clone()),
            self.repository.find_products(filter, page),
        )?;

        tracing::debug!(total_count, returned = products.len(), "Products listed");

        Ok(ProductPage {
            items: self.views(products).await?,
            meta: page.meta(total_count),
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<ProductView> {
        validate_input(&input)?;

        let mut product = self.find(id).await?;

        if input.category.is_some() || input.sub_category.is_some() {
            let category = input.category.unwrap_or(product.category);
            let sub_category = input.sub_category.unwrap_or(product.sub_category);
            self.check_references(category, sub_category).await?;
        }

        product.apply_update(input);
        if !self.repository.replace_product(product.clone()).await? {
            return Err(CatalogError::not_found(Entity::Product, id));
        }

        tracing::info!(product_id = %id, "Product updated");
        self.view(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_product(id).await? {
            return Err(CatalogError::not_found(Entity::Product, id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .product_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Entity::Product, id))
    }

    async fn check_references(&self, category: Uuid, sub_category: Option<Uuid>) -> CatalogResult<()> {
        let store = self.repository.as_ref();
        require_category(store, "category", category).await?;
        if let Some(sub_category) = sub_category {
            require_subcategory_of(store, sub_category, category).await?;
        }
        Ok(())
    }

    async fn view(&self, product: Product) -> CatalogResult<ProductView> {
        Ok(self.views(vec![product]).await?.remove(0))
    }

    async fn views(&self, products: Vec<Product>) -> CatalogResult<Vec<ProductView>> {
        let store = self.repository.as_ref();
        let (categories, subcategories) = tokio::try_join!(
            category_summaries(store, products.iter().map(|p| p.category)),
            subcategory_summaries(store, products.iter().filter_map(|p| p.sub_category)),
        )?;

        Ok(products
            .into_iter()
            .map(|p| {
                let category = categories.get(&p.category).cloned();
                let sub_category = p.sub_category.and_then(|id| subcategories.get(&id).cloned());
                p.into_view(category, sub_category)
            })
            .collect())
    }
}

impl<R: CatalogRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
