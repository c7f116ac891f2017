//! Catalog entities, request DTOs and read views.

mod category;
pub mod id;
mod product;
mod subcategory;

pub use category::{Category, CreateCategory, UpdateCategory};
pub use product::{CreateProduct, Product, ProductView, UpdateProduct};
pub use subcategory::{CreateSubCategory, SubCategory, SubCategoryView, UpdateSubCategory};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

fn default_active() -> bool {
    true
}

/// Display fields of a referenced category or subcategory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// A reference as returned on reads: the summary of the target, or the bare
/// id when the target no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Reference {
    Resolved(ReferenceSummary),
    Dangling(Uuid),
}

impl Reference {
    pub fn resolve(id: Uuid, summary: Option<ReferenceSummary>) -> Self {
        match summary {
            Some(summary) => Reference::Resolved(summary),
            None => Reference::Dangling(id),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Reference::Resolved(summary) => summary.id,
            Reference::Dangling(id) => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_serializes_summary_or_bare_id() {
        let id = Uuid::now_v7();
        let resolved = Reference::resolve(
            id,
            Some(ReferenceSummary {
                id,
                name: "Phones".to_string(),
                description: String::new(),
            }),
        );
        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({"_id": id.to_string(), "name": "Phones", "description": ""})
        );

        let dangling = Reference::resolve(id, None);
        assert_eq!(serde_json::to_value(&dangling).unwrap(), json!(id.to_string()));
        assert_eq!(dangling.id(), resolved.id());
    }
}
