//! MongoDB implementation of the catalog repositories

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Product, SubCategory};
use crate::pagination::PageRequest;
use crate::query::{CategoryField, Field, Predicate, ProductField, SubCategoryField};
use crate::repository::{CategoryRepository, ProductRepository, SubCategoryRepository};
use crate::validation::{DUPLICATE_CATEGORY, DUPLICATE_SUBCATEGORY, duplicate};

const DUPLICATE_KEY: i32 = 11000;

/// All three catalog collections of one database.
#[derive(Clone)]
pub struct MongoCatalogRepository {
    categories: Collection<Category>,
    subcategories: Collection<SubCategory>,
    products: Collection<Product>,
}

impl MongoCatalogRepository {
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoCatalogRepository::new(&client.database("catalog"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: &Database) -> Self {
        Self {
            categories: db.collection("categories"),
            subcategories: db.collection("subcategories"),
            products: db.collection("products"),
        }
    }

    /// Create the unique and lookup indexes. Safe to call on every start.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        self.categories
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name("categories_name_unique".to_string())
                            .build(),
                    )
                    .build(),
            )
            .await?;

        self.subcategories
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "name": 1, "category": 1 })
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name("subcategories_name_category_unique".to_string())
                            .build(),
                    )
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "category": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("subcategories_category".to_string())
                            .build(),
                    )
                    .build(),
            ])
            .await?;

        self.products
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "category": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("products_category".to_string())
                            .build(),
                    )
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "subCategory": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("products_sub_category".to_string())
                            .build(),
                    )
                    .build(),
            ])
            .await?;

        tracing::info!("Catalog indexes initialized");
        Ok(())
    }
}

fn id_value(id: Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn by_id(id: Uuid) -> Document {
    doc! { "_id": id_value(id) }
}

fn field_doc<F: Field>(field: F, value: impl Into<Bson>) -> Document {
    let mut doc = Document::new();
    doc.insert(field.name(), value);
    doc
}

/// Translate a predicate into a MongoDB filter document.
pub fn to_document<F: Field>(predicate: &Predicate<F>) -> Document {
    match predicate {
        Predicate::True => doc! {},
        Predicate::Contains { field, needle } => field_doc(
            *field,
            doc! { "$regex": regex::escape(needle), "$options": "i" },
        ),
        Predicate::Equals { field, id } => field_doc(*field, id_value(*id)),
        Predicate::In { field, ids } => {
            let ids: Vec<Bson> = ids.iter().copied().map(id_value).collect();
            field_doc(*field, doc! { "$in": ids })
        }
        Predicate::And(clauses) if clauses.is_empty() => doc! {},
        Predicate::And(clauses) => {
            let clauses: Vec<Document> = clauses.iter().map(to_document).collect();
            doc! { "$and": clauses }
        }
        // `$or` rejects an empty array
        Predicate::Or(clauses) if clauses.is_empty() => doc! { "_id": { "$in": [] } },
        Predicate::Or(clauses) => {
            let clauses: Vec<Document> = clauses.iter().map(to_document).collect();
            doc! { "$or": clauses }
        }
    }
}

fn newest_first() -> Document {
    doc! { "_id": -1 }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// Map a unique-index violation to the validation error the services raise.
fn write_error(err: mongodb::error::Error, duplicate_message: &str) -> CatalogError {
    if is_duplicate_key(&err) {
        duplicate("name", duplicate_message)
    } else {
        err.into()
    }
}

async fn ids_matching<T: Send + Sync>(
    collection: &Collection<T>,
    filter: Document,
) -> CatalogResult<Vec<Uuid>> {
    let options = FindOptions::builder().projection(doc! { "_id": 1 }).build();
    let cursor = collection
        .clone_with_type::<Document>()
        .find(filter)
        .with_options(options)
        .await?;
    let docs: Vec<Document> = cursor.try_collect().await?;

    Ok(docs
        .iter()
        .filter_map(|d| d.get_str("_id").ok())
        .filter_map(|raw| Uuid::parse_str(raw).ok())
        .collect())
}

#[async_trait]
impl CategoryRepository for MongoCatalogRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn insert_category(&self, category: Category) -> CatalogResult<Category> {
        self.categories
            .insert_one(&category)
            .await
            .map_err(|e| write_error(e, DUPLICATE_CATEGORY))?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn category_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.categories.find_one(by_id(id)).await?)
    }

    #[instrument(skip(self))]
    async fn category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        Ok(self.categories.find_one(doc! { "name": name }).await?)
    }

    #[instrument(skip(self))]
    async fn find_categories(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Category>> {
        let options = FindOptions::builder().sort(newest_first()).build();
        let cursor = self
            .categories
            .find(to_document(&filter))
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn category_ids(&self, filter: Predicate<CategoryField>) -> CatalogResult<Vec<Uuid>> {
        ids_matching(&self.categories, to_document(&filter)).await
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn replace_category(&self, category: Category) -> CatalogResult<bool> {
        let result = self
            .categories
            .replace_one(by_id(category.id), &category)
            .await
            .map_err(|e| write_error(e, DUPLICATE_CATEGORY))?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.categories.delete_one(by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl SubCategoryRepository for MongoCatalogRepository {
    #[instrument(skip(self, subcategory), fields(subcategory_id = %subcategory.id))]
    async fn insert_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory> {
        self.subcategories
            .insert_one(&subcategory)
            .await
            .map_err(|e| write_error(e, DUPLICATE_SUBCATEGORY))?;

        tracing::info!(subcategory_id = %subcategory.id, "Subcategory created");
        Ok(subcategory)
    }

    #[instrument(skip(self))]
    async fn subcategory_by_id(&self, id: Uuid) -> CatalogResult<Option<SubCategory>> {
        Ok(self.subcategories.find_one(by_id(id)).await?)
    }

    #[instrument(skip(self))]
    async fn subcategory_by_name(
        &self,
        name: &str,
        category: Uuid,
    ) -> CatalogResult<Option<SubCategory>> {
        let filter = doc! { "name": name, "category": id_value(category) };
        Ok(self.subcategories.find_one(filter).await?)
    }

    #[instrument(skip(self))]
    async fn find_subcategories(
        &self,
        filter: Predicate<SubCategoryField>,
    ) -> CatalogResult<Vec<SubCategory>> {
        let options = FindOptions::builder().sort(newest_first()).build();
        let cursor = self
            .subcategories
            .find(to_document(&filter))
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn subcategory_ids(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<Vec<Uuid>> {
        ids_matching(&self.subcategories, to_document(&filter)).await
    }

    #[instrument(skip(self))]
    async fn count_subcategories(&self, filter: Predicate<SubCategoryField>) -> CatalogResult<u64> {
        Ok(self
            .subcategories
            .count_documents(to_document(&filter))
            .await?)
    }

    #[instrument(skip(self, subcategory), fields(subcategory_id = %subcategory.id))]
    async fn replace_subcategory(&self, subcategory: SubCategory) -> CatalogResult<bool> {
        let result = self
            .subcategories
            .replace_one(by_id(subcategory.id), &subcategory)
            .await
            .map_err(|e| write_error(e, DUPLICATE_SUBCATEGORY))?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.subcategories.delete_one(by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ProductRepository for MongoCatalogRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
        self.products.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn product_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.products.find_one(by_id(id)).await?)
    }

    #[instrument(skip(self))]
    async fn find_products(
        &self,
        filter: Predicate<ProductField>,
        page: PageRequest,
    ) -> CatalogResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(newest_first())
            .skip(page.skip())
            .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .products
            .find(to_document(&filter))
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn count_products(&self, filter: Predicate<ProductField>) -> CatalogResult<u64> {
        Ok(self.products.count_documents(to_document(&filter)).await?)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace_product(&self, product: Product) -> CatalogResult<bool> {
        let result = self
            .products
            .replace_one(by_id(product.id), &product)
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.products.delete_one(by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
