use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::query::{Record, SubCategoryField};
use crate::validation::{description_rule, name_rule, trimmed, trimmed_opt};

use super::{Reference, ReferenceSummary};

/// A named group inside one category. `(name, category)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(rename = "_id", alias = "id", with = "super::id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owning category id
    #[serde(with = "super::id")]
    pub category: Uuid,
    #[serde(default = "super::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubCategory {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "name_rule"))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "description_rule"))]
    pub description: String,
    #[validate(required(message = "Category is required"))]
    pub category: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubCategory {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "name_rule"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "description_rule"))]
    pub description: Option<String>,
    /// Move the subcategory to another existing category
    pub category: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Subcategory as returned by the API, with its category resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Reference,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubCategory {
    /// Build a record from validated input; `category` is the checked owner.
    pub fn new(input: CreateSubCategory, category: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            category,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateSubCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> ReferenceSummary {
        ReferenceSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn into_view(self, category: Option<ReferenceSummary>) -> SubCategoryView {
        SubCategoryView {
            id: self.id,
            category: Reference::resolve(self.category, category),
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Record<SubCategoryField> for SubCategory {
    fn text(&self, field: SubCategoryField) -> Option<&str> {
        match field {
            SubCategoryField::Name => Some(&self.name),
            SubCategoryField::Id | SubCategoryField::Category => None,
        }
    }

    fn reference(&self, field: SubCategoryField) -> Option<Uuid> {
        match field {
            SubCategoryField::Id => Some(self.id),
            SubCategoryField::Category => Some(self.category),
            SubCategoryField::Name => None,
        }
    }
}
