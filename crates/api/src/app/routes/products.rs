use axum::{Json, body::Bytes, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use skuforge_core::ProductId;
use skuforge_products::{CreatedProduct, CreatedResponse, ProductSubmission, validate_submission};

use crate::app::errors;

pub const CREATED_MESSAGE: &str = "Product created successfully";

/// `POST /api/product`: check the submission and echo it back as a created
/// product. Nothing is stored.
///
/// The body is read as JSON whatever its `Content-Type`; a body that does not
/// parse is answered with a 500.
pub async fn create_product(body: Bytes) -> axum::response::Response {
    let submission: ProductSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable product payload");
            return errors::internal_error();
        }
    };

    tracing::info!(
        title = %submission.title,
        collection = %submission.product_collection_id,
        skus = submission.sku.len(),
        media = submission.media.len(),
        "received product payload"
    );

    if let Err(e) = validate_submission(&submission) {
        tracing::info!(reason = %e, "product rejected");
        return errors::domain_error_to_response(e);
    }

    let product = CreatedProduct::new(ProductId::new(), submission, Utc::now());
    tracing::info!(product_id = %product.id, "product created");

    (
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE.to_string(),
            product,
        }),
    )
        .into_response()
}
