use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, MessageResponse, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    CreateSubCategory, Reference, ReferenceSummary, SubCategoryView, UpdateSubCategory,
};
use crate::params::SubCategoryListParams;
use crate::repository::CatalogRepository;
use crate::service::SubCategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_subcategories,
        create_subcategory,
        get_subcategory,
        update_subcategory,
        delete_subcategory,
    ),
    components(
        schemas(
            SubCategoryView,
            CreateSubCategory,
            UpdateSubCategory,
            Reference,
            ReferenceSummary,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Subcategories", description = "Subcategory management")
    )
)]
pub struct SubCategoriesApiDoc;

pub fn router<R: CatalogRepository>(service: SubCategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_subcategories).post(create_subcategory))
        .route(
            "/{id}",
            get(get_subcategory)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
        .with_state(Arc::new(service))
}

/// List subcategories, newest first, optionally for one category
#[utoipa::path(
    get,
    path = "",
    tag = "Subcategories",
    params(SubCategoryListParams),
    responses(
        (status = 200, description = "Matching subcategories with their count", body = ApiResponse<Vec<SubCategoryView>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_subcategories<R: CatalogRepository>(
    State(service): State<Arc<SubCategoryService<R>>>,
    Query(params): Query<SubCategoryListParams>,
) -> CatalogResult<ApiResponse<Vec<SubCategoryView>>> {
    let category_id = params.parse()?;
    let subcategories = service.list_subcategories(category_id).await?;
    Ok(ApiResponse::list(subcategories))
}

#[utoipa::path(
    post,
    path = "",
    tag = "Subcategories",
    request_body = CreateSubCategory,
    responses(
        (status = 201, description = "Subcategory created successfully", body = ApiResponse<SubCategoryView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_subcategory<R: CatalogRepository>(
    State(service): State<Arc<SubCategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSubCategory>,
) -> CatalogResult<impl IntoResponse> {
    let subcategory = service.create_subcategory(input).await?;
    Ok(ApiResponse::new(subcategory)
        .with_message("Subcategory created successfully")
        .created())
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Subcategories",
    params(
        ("id" = Uuid, Path, description = "Subcategory ID")
    ),
    responses(
        (status = 200, description = "Subcategory found", body = ApiResponse<SubCategoryView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_subcategory<R: CatalogRepository>(
    State(service): State<Arc<SubCategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<ApiResponse<SubCategoryView>> {
    let subcategory = service.get_subcategory(id).await?;
    Ok(ApiResponse::new(subcategory))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Subcategories",
    params(
        ("id" = Uuid, Path, description = "Subcategory ID")
    ),
    request_body = UpdateSubCategory,
    responses(
        (status = 200, description = "Subcategory updated successfully", body = ApiResponse<SubCategoryView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_subcategory<R: CatalogRepository>(
    State(service): State<Arc<SubCategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSubCategory>,
) -> CatalogResult<ApiResponse<SubCategoryView>> {
    let subcategory = service.update_subcategory(id, input).await?;
    Ok(ApiResponse::new(subcategory).with_message("Subcategory updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Subcategories",
    params(
        ("id" = Uuid, Path, description = "Subcategory ID")
    ),
    responses(
        (status = 200, description = "Subcategory deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_subcategory<R: CatalogRepository>(
    State(service): State<Arc<SubCategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<MessageResponse> {
    service.delete_subcategory(id).await?;
    Ok(MessageResponse::new("Subcategory deleted successfully"))
}
