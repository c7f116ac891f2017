//! Success envelope shared by all JSON endpoints.
//!
//! ```json
//! { "success": true, "message": "Category created successfully", "data": { ... } }
//! { "success": true, "count": 2, "data": [ ... ] }
//! { "success": true, "currentPage": 1, "totalPages": 3, "totalCount": 25, "limit": 10, "data": [ ... ] }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of records in `data` for unpaginated lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            current_page: None,
            total_pages: None,
            total_count: None,
            limit: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_page(
        mut self,
        current_page: u64,
        total_pages: u64,
        total_count: u64,
        limit: u64,
    ) -> Self {
        self.current_page = Some(current_page);
        self.total_pages = Some(total_pages);
        self.total_count = Some(total_count);
        self.limit = Some(limit);
        self
    }

    /// `201 Created` with this envelope as body.
    pub fn created(self) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(self))
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Envelope for a full (unpaginated) list; sets `count`.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len() as u64;
        let mut response = Self::new(data);
        response.count = Some(count);
        response
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Envelope for writes that return no record, such as deletes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
