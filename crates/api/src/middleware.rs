use axum::{extract::Request, middleware::Next, response::Response};

/// Log every request with its outcome.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let res = next.run(req).await;

    tracing::info!(%method, %path, status = res.status().as_u16(), "request handled");
    res
}
