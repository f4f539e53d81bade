use axum::{Router, routing::get};
use axum_helpers::{ApiVersion, errors::responses::BadRequestResponse};

pub const TAG: &str = "Versionamento";

pub fn router() -> Router {
    Router::new().route("/teste", get(teste))
}

/// Report which API version served the request
///
/// The version comes from `?api-version=` or the `x-api-version` header and
/// defaults to `1.0`.
#[utoipa::path(
    get,
    path = "/teste",
    tag = TAG,
    params(
        ("api-version" = Option<String>, Query, description = "`1.0` or `2.0`"),
        ("x-api-version" = Option<String>, Header, description = "Alternative to the query parameter")
    ),
    responses(
        (status = 200, description = "Version banner", body = String,
            headers(("api-supported-versions" = String, description = "Versions this API accepts"))),
        (status = 400, response = BadRequestResponse)
    )
)]
pub async fn teste(version: ApiVersion) -> String {
    match version {
        ApiVersion::V1 => format!("TesteV1 - GET - Api Versão {version}"),
        ApiVersion::V2 => format!("TesteV2 - GET - Api Versão {version}"),
    }
}
