#[utoipa::path(
    get,
    path = "/healthy",
    tag = "System",
    responses(
        (status = 200, description = "API is up", body = String)
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}
