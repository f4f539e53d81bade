use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, IdPath, JwtClaims, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use pagination::{NameFilter, PageQuery, PaginatedJson, PaginationMetadata};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

pub const TAG: &str = "Categorias";
/// Mount point below `/api`
pub const URL: &str = "/categorias";

/// OpenAPI documentation for the categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        list_categories_by_name,
        get_category,
        create_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, CreateCategory, UpdateCategory, PaginationMetadata),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product categories")
    )
)]
pub struct ApiDoc;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/filter/nome/pagination", get(list_categories_by_name))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(shared_service)
}

/// List categories one page at a time
///
/// Pagination metadata travels in the `X-Pagination` header.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of categories", body = Vec<Category>,
            headers(("x-pagination" = String, description = "JSON pagination metadata"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    QueryParams(page): QueryParams<PageQuery>,
) -> CategoryResult<PaginatedJson<Category>> {
    let categories = service.list_categories(page, NameFilter::default()).await?;
    Ok(categories.into())
}

/// List categories whose name contains `nome`
#[utoipa::path(
    get,
    path = "/filter/nome/pagination",
    tag = TAG,
    params(PageQuery, NameFilter),
    responses(
        (status = 200, description = "Page of matching categories", body = Vec<Category>,
            headers(("x-pagination" = String, description = "JSON pagination metadata"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories_by_name<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    QueryParams(page): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<NameFilter>,
) -> CategoryResult<PaginatedJson<Category>> {
    let categories = service.list_categories(page, filter).await?;
    Ok(categories.into())
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    IdPath(id): IdPath,
) -> CategoryResult<Json<Category>> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;

    AuditEvent::new("category.create", format!("category:{}", category.id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": category.name }))
        .log();

    let location = format!("/api{}/{}", URL, category.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(category)))
}

/// Replace a category; `categoriaId` in the body must match the path
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<Json<Category>> {
    let category = service.update_category(id, input).await?;

    AuditEvent::new("category.update", format!("category:{}", id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": category.name }))
        .log();

    Ok(Json(category))
}

/// Delete a category and return the removed record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CategoryResult<Json<Category>> {
    let category = service.delete_category(id).await?;

    AuditEvent::new("category.delete", format!("category:{}", id))
        .with_actor(claims.as_deref())
        .with_request_headers(&headers)
        .with_details(json!({ "nome": category.name }))
        .log();

    Ok(Json(category))
}
