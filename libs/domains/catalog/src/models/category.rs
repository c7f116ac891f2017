use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::query::{CategoryField, Record};
use crate::validation::{description_rule, name_rule, trimmed, trimmed_opt};

use super::ReferenceSummary;

/// Top-level catalog grouping; referenced by subcategories and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id", with = "super::id")]
    pub id: Uuid,
    /// Unique, case-sensitive
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "super::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "name_rule"))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "description_rule"))]
    pub description: String,
    /// Defaults to `true`
    pub is_active: Option<bool>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "name_rule"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "description_rule"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
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
}

impl Record<CategoryField> for Category {
    fn text(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::Name => Some(&self.name),
            CategoryField::Id => None,
        }
    }

    fn reference(&self, field: CategoryField) -> Option<Uuid> {
        match field {
            CategoryField::Id => Some(self.id),
            CategoryField::Name => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_defaults_active() {
        let category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            ..Default::default()
        });
        assert!(category.is_active);
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            description: "Mobile".to_string(),
            is_active: Some(true),
        });
        category.apply_update(UpdateCategory {
            is_active: Some(false),
            ..Default::default()
        });
        assert_eq!(category.name, "Phones");
        assert_eq!(category.description, "Mobile");
        assert!(!category.is_active);
    }

    #[test]
    fn test_json_shape() {
        let category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            ..Default::default()
        });
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["_id"], json!(category.id.to_string()));
        assert_eq!(value["isActive"], json!(true));
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_update_distinguishes_blank_name() {
        let update: UpdateCategory = serde_json::from_value(json!({"name": "  "})).unwrap();
        assert_eq!(update.name.as_deref(), Some(""));
        assert!(update.validate().is_err());

        let update: UpdateCategory = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
    }
}
