//! Product draft domain.
//!
//! Business rules for creating a product, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no shared state):
//! - `draft`: the product draft and its parts
//! - `validation`: client-side field rules
//! - `combinations`: variant → SKU row expansion
//! - `payload`: the submission wire shape and the endpoint's rules

pub mod combinations;
pub mod draft;
pub mod payload;
pub mod validation;

pub use combinations::{combination_count, generate_combinations};
pub use draft::{
    COLLECTIONS, Collection, CombinationField, FormState, ImageFile, ProductImage, ShippingMethod,
    Variant, VariantCombination, collection_by_id,
};
pub use payload::{
    CreatedProduct, CreatedResponse, INVALID_SKU_DATA, MISSING_REQUIRED_FIELDS, MediaItem,
    ProductSubmission, SKU_REQUIRED, SkuItem, validate_submission,
};
pub use validation::{FormField, ValidationErrors, validate_draft};
