use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::query::{ProductField, Record};
use crate::validation::{description_rule, name_rule, nullable, trimmed, trimmed_opt};

use super::{Reference, ReferenceSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", with = "super::id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    /// Image URLs in display order
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "super::id")]
    pub category: Uuid,
    #[serde(default, with = "super::id::option")]
    pub sub_category: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "name_rule"))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "description_rule"))]
    pub description: String,
    #[validate(
        required(message = "Price is required"),
        range(min = 0.0, message = "Price cannot be negative")
    )]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(required(message = "Category is required"))]
    pub category: Option<Uuid>,
    pub sub_category: Option<Uuid>,
}

/// Partial update. `subCategory: null` clears the link, a missing
/// `subCategory` keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "name_rule"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "description_rule"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i64>,
    pub images: Option<Vec<String>>,
    pub category: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub sub_category: Option<Option<Uuid>>,
}

/// Product as returned by the API, with category and subcategory resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub images: Vec<String>,
    pub category: Reference,
    pub sub_category: Option<Reference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a record from validated input with its checked references.
    pub fn new(input: CreateProduct, category: Uuid, sub_category: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price.unwrap_or_default(),
            stock: input.stock,
            images: input.images,
            category,
            sub_category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(sub_category) = update.sub_category {
            self.sub_category = sub_category;
        }
        self.updated_at = Utc::now();
    }

    pub fn into_view(
        self,
        category: Option<ReferenceSummary>,
        sub_category: Option<ReferenceSummary>,
    ) -> ProductView {
        ProductView {
            id: self.id,
            category: Reference::resolve(self.category, category),
            sub_category: self
                .sub_category
                .map(|id| Reference::resolve(id, sub_category)),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            images: self.images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Record<ProductField> for Product {
    fn text(&self, field: ProductField) -> Option<&str> {
        match field {
            ProductField::Name => Some(&self.name),
            ProductField::Description => Some(&self.description),
            _ => None,
        }
    }

    fn reference(&self, field: ProductField) -> Option<Uuid> {
        match field {
            ProductField::Id => Some(self.id),
            ProductField::Category => Some(self.category),
            ProductField::SubCategory => self.sub_category,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(input: &impl Validate) -> Vec<String> {
        let mut fields: Vec<String> = input
            .validate()
            .err()
            .map(|e| e.field_errors().keys().map(|k| k.to_string()).collect())
            .unwrap_or_default();
        fields.sort();
        fields
    }

    #[test]
    fn test_create_requires_name_price_category() {
        let input: CreateProduct = serde_json::from_value(json!({})).unwrap();
        assert_eq!(violations(&input), vec!["category", "name", "price"]);
    }

    #[test]
    fn test_negative_price_and_stock_rejected() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": "Cable",
            "price": -1.0,
            "stock": -3,
            "category": Uuid::now_v7(),
        }))
        .unwrap();
        assert_eq!(violations(&input), vec!["price", "stock"]);
    }

    #[test]
    fn test_create_defaults() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": " Cable ",
            "price": 0.0,
            "category": Uuid::now_v7(),
        }))
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.name, "Cable");
        assert_eq!(input.stock, 0);
        assert!(input.images.is_empty());
        assert_eq!(input.sub_category, None);
    }

    #[test]
    fn test_update_null_clears_subcategory() {
        let category = Uuid::now_v7();
        let mut product = Product::new(
            CreateProduct {
                name: "Case".to_string(),
                price: Some(9.5),
                ..Default::default()
            },
            category,
            Some(Uuid::now_v7()),
        );

        let keep: UpdateProduct = serde_json::from_value(json!({"stock": 4})).unwrap();
        product.apply_update(keep);
        assert!(product.sub_category.is_some());
        assert_eq!(product.stock, 4);

        let clear: UpdateProduct = serde_json::from_value(json!({"subCategory": null})).unwrap();
        product.apply_update(clear);
        assert_eq!(product.sub_category, None);
    }

    #[test]
    fn test_view_shapes_references() {
        let category = Uuid::now_v7();
        let sub = Uuid::now_v7();
        let product = Product::new(
            CreateProduct {
                name: "Case".to_string(),
                price: Some(9.5),
                ..Default::default()
            },
            category,
            Some(sub),
        );
        let view = product.into_view(
            Some(ReferenceSummary {
                id: category,
                name: "Phones".to_string(),
                description: String::new(),
            }),
            None,
        );
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["category"]["name"], "Phones");
        assert_eq!(value["subCategory"], json!(sub.to_string()));
    }
}
