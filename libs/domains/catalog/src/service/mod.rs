//! Catalog services - validation, reference checks and read enrichment

mod category;
mod product;
mod subcategory;

pub use category::CategoryService;
pub use product::{ProductPage, ProductService};
pub use subcategory::SubCategoryService;

use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult, Entity};
use crate::models::ReferenceSummary;
use crate::query::{CategoryField, Predicate, SubCategoryField};
use crate::repository::{CategoryRepository, SubCategoryRepository};

type Summaries = HashMap<Uuid, ReferenceSummary>;

/// Summaries of the given categories, looked up in one query.
async fn category_summaries<R>(
    repository: &R,
    ids: impl IntoIterator<Item = Uuid>,
) -> CatalogResult<Summaries>
where
    R: CategoryRepository + ?Sized,
{
    let ids: BTreeSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Summaries::new());
    }

    let categories = repository
        .find_categories(Predicate::one_of(CategoryField::Id, ids.into_iter().collect()))
        .await?;
    Ok(categories.iter().map(|c| (c.id, c.summary())).collect())
}

async fn subcategory_summaries<R>(
    repository: &R,
    ids: impl IntoIterator<Item = Uuid>,
) -> CatalogResult<Summaries>
where
    R: SubCategoryRepository + ?Sized,
{
    let ids: BTreeSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Summaries::new());
    }

    let subcategories = repository
        .find_subcategories(Predicate::one_of(SubCategoryField::Id, ids.into_iter().collect()))
        .await?;
    Ok(subcategories.iter().map(|s| (s.id, s.summary())).collect())
}

/// Fail unless category `id` exists.
async fn require_category<R>(repository: &R, field: &'static str, id: Uuid) -> CatalogResult<()>
where
    R: CategoryRepository + ?Sized,
{
    match repository.category_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(CatalogError::InvalidReference {
            field,
            entity: Entity::Category,
            id,
        }),
    }
}

/// Fail unless subcategory `id` exists and belongs to `category`.
async fn require_subcategory_of<R>(
    repository: &R,
    id: Uuid,
    category: Uuid,
) -> CatalogResult<()>
where
    R: SubCategoryRepository + ?Sized,
{
    match repository.subcategory_by_id(id).await? {
        Some(subcategory) if subcategory.category == category => Ok(()),
        _ => Err(CatalogError::InvalidReference {
            field: "subCategory",
            entity: Entity::SubCategory,
            id,
        }),
    }
}
