//! Client-side draft validation.
//!
//! Every rule is evaluated on its own; a missing title never hides a missing
//! description. The result replaces the previous one wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::FormState;

/// A validated draft field. Ordering follows rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    Description,
    Images,
    Collection,
    Variants,
    ShippingMethod,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Images => "images",
            FormField::Collection => "collection",
            FormField::Variants => "variants",
            FormField::ShippingMethod => "shippingMethod",
        }
    }

    /// Message shown when the field is missing.
    pub fn required_message(&self) -> &'static str {
        match self {
            FormField::Title => "Product name is required",
            FormField::Description => "Description is required",
            FormField::Images => "At least one image is required",
            FormField::Collection => "Collection is required",
            FormField::Variants => "At least one variant is required",
            FormField::ShippingMethod => "Shipping method is required",
        }
    }
}

/// Field → message. An absent key means the field is currently valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// Recompute the full error mapping for `state`.
///
/// Strings count as empty only when they are `""`; whitespace is content.
pub fn validate_draft(state: &FormState) -> ValidationErrors {
    let checks = [
        (FormField::Title, state.title.is_empty()),
        (FormField::Description, state.description.is_empty()),
        (FormField::Images, state.images.is_empty()),
        (FormField::Collection, state.collection.is_empty()),
        (FormField::Variants, state.variants.is_empty()),
        (FormField::ShippingMethod, state.shipping_method.is_none()),
    ];

    let mut errors = ValidationErrors::new();
    for (field, missing) in checks {
        if missing {
            errors.insert(field, field.required_message());
        }
    }
    errors
}
