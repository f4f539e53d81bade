use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::version::teste),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "1.0",
        description = "Categories and products with paged, cached listings"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_categories::handlers::URL, api = domain_categories::ApiDoc),
        (path = domain_products::handlers::URL, api = domain_products::ApiDoc)
    ),
    tags(
        (name = crate::api::version::TAG, description = "API version check")
    )
)]
pub struct ApiDoc;
