use axum::{extract::Request, middleware::Next, response::Response};

use crate::metrics::HTTP_REQUESTS_TOTAL;

/// Count every request by method, path and response status.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();

    response
}
