//! Raw listing query strings.
//!
//! Values arrive as strings so that junk pagination input can fall back to the
//! defaults instead of rejecting the request. Empty strings count as absent.

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::pagination::PageRequest;
use crate::query::ProductQuery;
use crate::validation::invalid_id;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 50)
    pub limit: Option<String>,
    /// Case-insensitive text matched against product name and description and
    /// category/subcategory names
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
}

impl ProductListParams {
    pub fn parse(self) -> CatalogResult<(ProductQuery, PageRequest)> {
        let page = PageRequest::parse(self.page.as_deref(), self.limit.as_deref());
        let query = ProductQuery {
            search: self.search,
            category_id: optional_id("categoryId", self.category_id.as_deref())?,
            sub_category_id: optional_id("subCategoryId", self.sub_category_id.as_deref())?,
        };
        Ok((query, page))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubCategoryListParams {
    /// Only subcategories of this category
    pub category_id: Option<String>,
}

impl SubCategoryListParams {
    pub fn parse(self) -> CatalogResult<Option<Uuid>> {
        optional_id("categoryId", self.category_id.as_deref())
    }
}

fn optional_id(field: &str, raw: Option<&str>) -> CatalogResult<Option<Uuid>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(|_| invalid_id(field)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_product_params() {
        let cat = Uuid::now_v7();
        let params = ProductListParams {
            page: Some("2".to_string()),
            limit: Some("x".to_string()),
            search: Some("phone".to_string()),
            category_id: Some(cat.to_string()),
            sub_category_id: Some(String::new()),
        };

        let (query, page) = params.parse().unwrap();
        assert_eq!(page, PageRequest::new(2, 50));
        assert_eq!(query.category_id, Some(cat));
        assert_eq!(query.sub_category_id, None);
        assert_eq!(query.search_term(), Some("phone"));
    }

    #[test]
    fn test_malformed_id_is_validation_error() {
        let params = SubCategoryListParams {
            category_id: Some("not-a-uuid".to_string()),
        };
        match params.parse() {
            Err(CatalogError::Validation(v)) => assert_eq!(v[0].field, "categoryId"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
