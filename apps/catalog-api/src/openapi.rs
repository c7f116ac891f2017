//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "REST API for categories, subcategories and products"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/categories", api = domain_catalog::CategoriesApiDoc),
        (path = "/api/subcategories", api = domain_catalog::SubCategoriesApiDoc),
        (path = "/api/products", api = domain_catalog::ProductsApiDoc),
        (path = "/api", api = crate::api::health::HealthApiDoc)
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/categories",
            "/api/categories/{id}",
            "/api/subcategories",
            "/api/subcategories/{id}",
            "/api/products",
            "/api/products/{id}",
            "/api/health",
            "/api/ready",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }
}
