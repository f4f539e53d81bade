use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    AuditEvent, IdPath, JwtClaims, QueryParams, RoleGuard, ValidatedJson,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse, UnprocessableEntityResponse,
    },
    require_role,
};
use pagination::{NameFilter, PageQuery, PaginatedJson, PaginationMetadata};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, PatchProduct, PriceCriterion, PriceFilter, Product, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "Produtos";
/// Mount point below `/api`
pub const URL: &str = "/produtos";

/// OpenAPI documentation for the products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_products_by_name,
        list_products_by_price,
        list_products_by_category,
        list_all_products,
        get_product,
        create_product,
        update_product,
        patch_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            PatchProduct,
            PriceCriterion,
            PaginationMetadata
        ),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Product routes; `guard` protects the unpaged `/todos` listing only
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    guard: RoleGuard,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/filter/nome/pagination", get(list_products_by_name))
        .route("/filter/preco/pagination", get(list_products_by_price))
        .route("/categoria/{id}", get(list_products_by_category))
        .route(
            "/todos",
            get(list_all_products).layer(from_fn_with_state(guard, require_role)),
        )
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/update-partial", patch(patch_product))
        .with_state(shared_service)
}

/// List products one page at a time
///
/// Pagination metadata travels in the `X-Pagination` header.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = Vec<Product>,
            headers(("x-pagination" = String, description = "JSON pagination metadata"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(page): QueryParams<PageQuery>,
) -> ProductResult<PaginatedJson<Product>> {
    let products = service.list_products(page).await?;
    Ok(products.into())
}

/// List products whose name contains `nome`
#[utoipa::path(
    get,
    path = "/filter/nome/pagination",
    tag = TAG,
    params(PageQuery, NameFilter),
    responses(
        (status = 200, description = "Page of matching products", body = Vec<Product>,
            headers(("x-pagination" = String, description = "JSON pagination metadata"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(page): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<NameFilter>,
) -> ProductResult<PaginatedJson<Product>> {
    let products = service.list_products_by_name(page, filter).await?;
    Ok(products.into())
}

/// List products compared against `preco`
///
/// An unrecognised `precoCriterio` lists without the price condition.
#[utoipa::path(
    get,
    path = "/filter/preco/pagination",
    tag = TAG,
    params(PageQuery, PriceFilter),
    responses(
        (status = 200, description = "Page of matching products", body = Vec<Product>,
            headers(("x-pagination" = String, description = "JSON pagination metadata"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products_by_price<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(page): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<PriceFilter>,
) -> ProductResult<PaginatedJson<Product>> {
    let products = service.list_products_by_price(page, filter).await?;
    Ok(products.into())
}

#[utoipa::path(
    get,
    path = "/categoria/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Products of the category", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(category_id): IdPath,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products_by_category(category_id).await?;
    Ok(Json(products))
}

/// Whole catalog without paging; requires the `User` role
#[utoipa::path(
    get,
    path = "/todos",
    tag = TAG,
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_all_products().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;

    AuditEvent::new("product.create", format!("product:{}", product.id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": product.name, "categoriaId": product.category_id }))
        .log();

    let location = format!("/api{}/{}", URL, product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

/// Replace a product; `produtoId` in the body must match the path
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;

    AuditEvent::new("product.update", format!("product:{}", id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": product.name, "preco": product.price }))
        .log();

    Ok(Json(product))
}

/// Change `estoque` and/or `dataCadastro`
#[utoipa::path(
    patch,
    path = "/{id}/update-partial",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    request_body = PatchProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<PatchProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.patch_product(id, patch).await?;

    AuditEvent::new("product.patch", format!("product:{}", id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "estoque": product.stock }))
        .log();

    Ok(Json(product))
}

/// Delete a product and return the removed record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.delete_product(id).await?;

    AuditEvent::new("product.delete", format!("product:{}", id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": product.name }))
        .log();

    Ok(Json(product))
}
