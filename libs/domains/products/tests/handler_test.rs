//! Handler tests for the products domain
//!
//! Routes run on the in-memory repository; `/todos` is checked with tokens
//! issued by a local `JwtAuth`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, RoleGuard};
use chrono::{Duration, Utc};
use domain_products::*;
use http_body_util::BodyExt;
use pagination::PaginationConfig;
use response_cache::ResponseCache;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "products-handler-test-secret-32chars";

fn auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn app() -> Router {
    let service = ProductService::new(
        InMemoryProductRepository::new(),
        ResponseCache::default(),
        PaginationConfig::default(),
    );
    handlers::router(service, RoleGuard::new(auth(), "User"))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn send(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn product_json(name: &str, price: f64, category_id: i32) -> Value {
    json!({
        "nome": name,
        "descricao": format!("{name} description"),
        "preco": price,
        "imagemUrl": "x.jpg",
        "estoque": 10,
        "categoriaId": category_id
    })
}

async fn seed(app: &Router, products: &[(&str, f64, i32)]) -> Vec<Product> {
    let mut created = Vec::new();
    for (name, price, category_id) in products {
        let response = app
            .clone()
            .oneshot(send("POST", "/", product_json(name, *price, *category_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        created.push(json_body(response.into_body()).await);
    }
    created
}

#[tokio::test]
async fn test_create_returns_201_with_location_and_registration_date() {
    let before = Utc::now();
    let response = app()
        .oneshot(send("POST", "/", product_json("Suco", 7.5, 1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/produtos/1");

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.price, 7.5);
    assert!(product.registered_at >= before);
}

#[tokio::test]
async fn test_create_validates_input() {
    let response = app()
        .oneshot(send("POST", "/", json!({ "nome": "", "preco": 1.0, "categoriaId": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["nome"].is_array());
    assert!(body["details"]["categoriaId"].is_array());
}

#[tokio::test]
async fn test_list_pages_by_id_with_header() {
    let app = app();
    seed(&app, &[("a", 1.0, 1), ("b", 2.0, 1), ("c", 3.0, 1)]).await;

    let response = app
        .oneshot(get("/?pageNumber=2&pageSize=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let metadata: Value =
        serde_json::from_str(response.headers()["x-pagination"].to_str().unwrap()).unwrap();
    assert_eq!(metadata["totalCount"], 3);
    assert_eq!(metadata["currentPage"], 2);
    assert_eq!(metadata["hasNext"], false);

    let items: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "c");
}

#[tokio::test]
async fn test_list_sees_products_created_after_first_read() {
    let app = app();
    seed(&app, &[("a", 1.0, 1)]).await;

    let first: Vec<Product> = json_body(app.clone().oneshot(get("/")).await.unwrap().into_body()).await;
    assert_eq!(first.len(), 1);

    seed(&app, &[("b", 2.0, 1)]).await;
    let second: Vec<Product> = json_body(app.oneshot(get("/")).await.unwrap().into_body()).await;
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_filter_by_name_is_case_insensitive() {
    let app = app();
    seed(&app, &[("Suco de Laranja", 6.0, 1), ("Pastel", 5.0, 2), ("SUCO de uva", 6.5, 1)]).await;

    let response = app
        .oneshot(get("/filter/nome/pagination?nome=suco"))
        .await
        .unwrap();
    let items: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Suco de Laranja", "SUCO de uva"]);
}

#[tokio::test]
async fn test_filter_by_price_comparators() {
    let app = app();
    seed(&app, &[("a", 10.0, 1), ("b", 20.0, 1), ("c", 30.0, 1)]).await;

    for (criterion, expected) in [("maior", vec!["c"]), ("MENOR", vec!["a"]), ("igual", vec!["b"])] {
        let uri = format!("/filter/preco/pagination?preco=20&precoCriterio={criterion}");
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let items: Vec<Product> = json_body(response.into_body()).await;
        let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected, "criterion {criterion}");
    }
}

#[tokio::test]
async fn test_filter_by_price_unknown_comparator_returns_everything() {
    let app = app();
    seed(&app, &[("a", 10.0, 1), ("b", 20.0, 1)]).await;

    let response = app
        .oneshot(get("/filter/preco/pagination?preco=15&precoCriterio=entre"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_list_by_category() {
    let app = app();
    seed(&app, &[("a", 1.0, 1), ("b", 2.0, 2), ("c", 3.0, 1)]).await;

    let response = app.clone().oneshot(get("/categoria/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Product> = json_body(response.into_body()).await;
    assert!(items.iter().all(|p| p.category_id == 1));
    assert_eq!(items.len(), 2);

    let empty = app.oneshot(get("/categoria/9")).await.unwrap();
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todos_requires_user_role() {
    let app = app();
    seed(&app, &[("a", 1.0, 1)]).await;

    let anonymous = app.clone().oneshot(get("/todos")).await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let admin = auth().create_access_token("7", "bia", &["Admin"]).unwrap();
    let forbidden = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header("authorization", format!("Bearer {admin}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let user = auth().create_access_token("8", "caio", &["User"]).unwrap();
    let allowed = app
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header("authorization", format!("Bearer {user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
    let items: Vec<Product> = json_body(allowed.into_body()).await;
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_todos_on_empty_catalog_is_not_found() {
    let user = auth().create_access_token("8", "caio", &["User"]).unwrap();
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header("authorization", format!("Bearer {user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_and_invalid_id() {
    let app = app();
    assert_eq!(
        app.clone().oneshot(get("/42")).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.oneshot(get("/abc")).await.unwrap().status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_put_replaces_and_checks_id() {
    let app = app();
    let created = seed(&app, &[("a", 1.0, 1)]).await.remove(0);

    let mut body = product_json("renamed", 4.0, 2);
    body["produtoId"] = json!(created.id + 1);
    let mismatch = app
        .clone()
        .oneshot(send("PUT", &format!("/{}", created.id), body.clone()))
        .await
        .unwrap();
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

    body["produtoId"] = json!(created.id);
    let response = app
        .clone()
        .oneshot(send("PUT", &format!("/{}", created.id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.registered_at, created.registered_at);

    let read: Product =
        json_body(app.oneshot(get(&format!("/{}", created.id))).await.unwrap().into_body()).await;
    assert_eq!(read, updated);
}

#[tokio::test]
async fn test_patch_stock_and_date_rules() {
    let app = app();
    let created = seed(&app, &[("a", 1.0, 1)]).await.remove(0);
    let uri = format!("/{}/update-partial", created.id);

    let response = app
        .clone()
        .oneshot(send("PATCH", &uri, json!({ "estoque": 25 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patched: Product = json_body(response.into_body()).await;
    assert_eq!(patched.stock, 25.0);
    assert_eq!(patched.name, "a");

    let out_of_range = app
        .clone()
        .oneshot(send("PATCH", &uri, json!({ "estoque": 0 })))
        .await
        .unwrap();
    assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let past_date = app
        .clone()
        .oneshot(send("PATCH", &uri, json!({ "dataCadastro": yesterday })))
        .await
        .unwrap();
    assert_eq!(past_date.status(), StatusCode::BAD_REQUEST);

    let next_week = (Utc::now() + Duration::days(7)).to_rfc3339();
    let future_date = app
        .oneshot(send("PATCH", &uri, json!({ "dataCadastro": next_week })))
        .await
        .unwrap();
    assert_eq!(future_date.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_returns_removed_product() {
    let app = app();
    let created = seed(&app, &[("a", 1.0, 1)]).await.remove(0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Product = json_body(response.into_body()).await;
    assert_eq!(deleted.id, created.id);

    assert_eq!(
        app.oneshot(get(&format!("/{}", created.id))).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
}
