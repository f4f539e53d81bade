use axum::{
    Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use pagination::{
    PageQuery, PaginatedJson, PaginationConfig, PaginationMetadata, X_PAGINATION, paginate,
};
use tower::ServiceExt;

async fn letters(
    Query(query): Query<PageQuery>,
) -> Result<PaginatedJson<char>, (StatusCode, String)> {
    let params = query
        .normalize(&PaginationConfig::default())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(paginate('a'..='g', |_| true, |a, b| a.cmp(b), params).into())
}

fn app() -> Router {
    Router::new().route("/letters", get(letters))
}

#[tokio::test]
async fn test_body_is_plain_item_array_and_header_carries_metadata() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/letters?pageNumber=2&pageSize=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let header = response.headers().get(X_PAGINATION).unwrap().to_str().unwrap();
    let metadata: PaginationMetadata = serde_json::from_str(header).unwrap();
    assert_eq!(
        metadata,
        PaginationMetadata {
            total_count: 7,
            page_size: 3,
            current_page: 2,
            total_pages: 3,
            has_next: true,
            has_previous: true,
        }
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let items: Vec<char> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(items, vec!['d', 'e', 'f']);
}

#[tokio::test]
async fn test_non_numeric_page_number_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/letters?pageNumber=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(response.headers().get(X_PAGINATION).is_none());
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/letters?pageSize=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
