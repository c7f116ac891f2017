//! Referential guard for category deletion.
//!
//! A category may only be deleted while no subcategory and no product refers to
//! it. The check and the delete are separate store calls; a dependent inserted
//! in between is not detected.

use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::query::{Predicate, ProductField, SubCategoryField};
use crate::repository::{ProductRepository, SubCategoryRepository};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyCounts {
    pub subcategories: u64,
    pub products: u64,
}

impl DependencyCounts {
    pub fn is_empty(&self) -> bool {
        self.subcategories == 0 && self.products == 0
    }
}

/// Count subcategories and products whose `category` is `category_id`.
#[instrument(skip(subcategories, products))]
pub async fn count_dependents<S, P>(
    subcategories: &S,
    products: &P,
    category_id: Uuid,
) -> CatalogResult<DependencyCounts>
where
    S: SubCategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    let (subcategories, products) = tokio::try_join!(
        subcategories.count_subcategories(Predicate::eq(SubCategoryField::Category, category_id)),
        products.count_products(Predicate::eq(ProductField::Category, category_id)),
    )?;

    Ok(DependencyCounts {
        subcategories,
        products,
    })
}

/// Fail with [`CatalogError::DependencyExists`] unless the category is unreferenced.
pub async fn ensure_deletable<S, P>(
    subcategories: &S,
    products: &P,
    category_id: Uuid,
) -> CatalogResult<()>
where
    S: SubCategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    let counts = count_dependents(subcategories, products, category_id).await?;
    if counts.is_empty() {
        return Ok(());
    }

    tracing::info!(
        category_id = %category_id,
        subcategories = counts.subcategories,
        products = counts.products,
        "Category deletion blocked by dependents"
    );
    Err(CatalogError::DependencyExists {
        subcategories: counts.subcategories,
        products: counts.products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockProductRepository, MockSubCategoryRepository};
    use mockall::predicate::eq;

    fn mocks(subs: u64, prods: u64, id: Uuid) -> (MockSubCategoryRepository, MockProductRepository) {
        let mut subcategories = MockSubCategoryRepository::new();
        subcategories
            .expect_count_subcategories()
            .with(eq(Predicate::eq(SubCategoryField::Category, id)))
            .times(1)
            .returning(move |_| Ok(subs));

        let mut products = MockProductRepository::new();
        products
            .expect_count_products()
            .with(eq(Predicate::eq(ProductField::Category, id)))
            .times(1)
            .returning(move |_| Ok(prods));

        (subcategories, products)
    }

    #[tokio::test]
    async fn test_unreferenced_category_is_deletable() {
        let id = Uuid::now_v7();
        let (subs, prods) = mocks(0, 0, id);
        assert!(ensure_deletable(&subs, &prods, id).await.is_ok());
    }

    #[tokio::test]
    async fn test_subcategory_blocks_delete() {
        let id = Uuid::now_v7();
        let (subs, prods) = mocks(1, 0, id);
        let err = ensure_deletable(&subs, &prods, id).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DependencyExists {
                subcategories: 1,
                products: 0
            }
        ));
    }

    #[tokio::test]
    async fn test_counts_both_dependents() {
        let id = Uuid::now_v7();
        let (subs, prods) = mocks(2, 5, id);
        let counts = count_dependents(&subs, &prods, id).await.unwrap();
        assert_eq!(
            counts,
            DependencyCounts {
                subcategories: 2,
                products: 5
            }
        );
        assert!(!counts.is_empty());
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let id = Uuid::now_v7();
        let mut subs = MockSubCategoryRepository::new();
        subs.expect_count_subcategories()
            .returning(|_| Err(CatalogError::Database("timeout".to_string())));
        let mut prods = MockProductRepository::new();
        prods.expect_count_products().returning(|_| Ok(0));

        let err = ensure_deletable(&subs, &prods, id).await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
