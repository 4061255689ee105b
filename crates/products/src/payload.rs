//! Submission payload: the wire shape accepted by the product endpoint, how a
//! draft is turned into it, and the rules the endpoint enforces on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skuforge_core::{DomainError, DomainResult, Entity, ProductId};

use crate::draft::{FormState, ProductImage, VariantCombination};

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const SKU_REQUIRED: &str = "At least one SKU is required";
pub const INVALID_SKU_DATA: &str = "Invalid SKU data";

/// One media entry (`media[]`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub url: String,
    pub is_main: bool,
}

/// One orderable unit (`sku[]`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkuItem {
    pub price: f64,
    pub quantity: f64,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
    pub external_id: String,
}

impl SkuItem {
    /// `price > 0`, `quantity >= 0`, and strictly positive weight and
    /// dimensions. NaN fails every bound.
    pub fn is_within_bounds(&self) -> bool {
        self.price > 0.0
            && self.quantity >= 0.0
            && self.weight > 0.0
            && self.height > 0.0
            && self.length > 0.0
            && self.width > 0.0
    }
}

/// The product record sent to the endpoint.
///
/// Missing JSON fields deserialize to their empty value so the endpoint can
/// answer with a rule violation instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSubmission {
    pub title: String,
    pub description: String,
    pub price_unit: String,
    #[serde(rename = "productCollectionID")]
    pub product_collection_id: String,
    pub shipping_type: String,
    pub media: Vec<MediaItem>,
    pub sku: Vec<SkuItem>,
}

impl ProductSubmission {
    /// Assemble the payload for `draft`.
    ///
    /// Media URLs are the image preview handles. SKU numbers are parsed from
    /// the row strings; blank or unparseable input becomes `0` and is left for
    /// the endpoint's bounds check to reject.
    pub fn from_draft(draft: &FormState, price_unit: impl Into<String>) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            price_unit: price_unit.into(),
            product_collection_id: draft.collection.clone(),
            shipping_type: draft
                .shipping_method
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            media: draft.images.iter().map(MediaItem::from).collect(),
            sku: draft.variant_combinations.iter().map(SkuItem::from).collect(),
        }
    }
}

impl From<&ProductImage> for MediaItem {
    fn from(image: &ProductImage) -> Self {
        Self {
            url: image.preview().to_string(),
            is_main: image.is_main(),
        }
    }
}

impl From<&VariantCombination> for SkuItem {
    fn from(row: &VariantCombination) -> Self {
        Self {
            price: parse_number(&row.price),
            quantity: parse_number(&row.quantity),
            weight: parse_number(&row.weight),
            height: parse_number(&row.packing_height),
            length: parse_number(&row.packing_length),
            width: parse_number(&row.packing_width),
            external_id: row.external_id.clone(),
        }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Endpoint-side rules, checked in order; the first violation wins.
pub fn validate_submission(submission: &ProductSubmission) -> DomainResult<()> {
    if submission.title.is_empty()
        || submission.description.is_empty()
        || submission.product_collection_id.is_empty()
    {
        return Err(DomainError::validation(MISSING_REQUIRED_FIELDS));
    }

    if submission.sku.is_empty() {
        return Err(DomainError::validation(SKU_REQUIRED));
    }

    if !submission.sku.iter().all(SkuItem::is_within_bounds) {
        return Err(DomainError::validation(INVALID_SKU_DATA));
    }

    Ok(())
}

/// A product accepted by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub id: ProductId,
    #[serde(flatten)]
    pub submission: ProductSubmission,
    pub created_at: DateTime<Utc>,
}

impl CreatedProduct {
    pub fn new(id: ProductId, submission: ProductSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            submission,
            created_at,
        }
    }
}

impl Entity for CreatedProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Body of a `201 Created` answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub product: CreatedProduct,
}
