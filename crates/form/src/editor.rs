//! Editing helpers used by the form panels.
//!
//! Each helper is one [`FormStore::update_state`] call. Index arguments that
//! are out of range leave the draft as it was.

use std::sync::Arc;

use skuforge_core::{DomainError, DomainResult};
use skuforge_products::{
    CombinationField, FormState, ImageFile, ProductImage, ShippingMethod, Variant,
    generate_combinations,
};

use crate::store::{FormStore, Update};

pub const EMPTY_PROPERTY: &str = "Property cannot be empty";

impl<S> FormStore<S> {
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.modify(|d| d.title = title);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.modify(|d| d.description = description);
    }

    pub fn set_collection(&self, collection_id: impl Into<String>) {
        let collection = collection_id.into();
        self.modify(|d| d.collection = collection);
    }

    pub fn set_shipping_method(&self, method: Option<ShippingMethod>) {
        self.modify(|d| d.shipping_method = method);
    }

    // -------------------------
    // Images
    // -------------------------

    /// Append `files` as non-main images, resolving a preview for each.
    pub fn add_images(&self, files: impl IntoIterator<Item = ImageFile>) {
        let resolver = self.preview_resolver();
        let new_images: Vec<ProductImage> = files
            .into_iter()
            .map(|file| {
                let preview = resolver.resolve(&file);
                ProductImage::new(file, preview)
            })
            .collect();

        if new_images.is_empty() {
            return;
        }
        self.modify(|d| d.images.extend(new_images));
    }

    /// Make image `index` the main image and every other image not main.
    pub fn toggle_main_image(&self, index: usize) {
        self.modify(|d| {
            if index < d.images.len() {
                d.set_main_image(index);
            }
        });
    }

    /// Drop image `index`. Its preview handle is not released.
    pub fn remove_image(&self, index: usize) {
        self.modify(|d| {
            if index < d.images.len() {
                d.images.remove(index);
            }
        });
    }

    // -------------------------
    // Variants
    // -------------------------

    /// Append a variant with no properties and return its index.
    pub fn add_variant(&self, name: impl Into<String>) -> DomainResult<usize> {
        let variant = Variant::named(name)?;
        let mut index = 0;
        self.update_state(Update::with(|prev: &FormState| {
            index = prev.variants.len();
            let mut next = prev.clone();
            next.variants.push(variant);
            next
        }));
        Ok(index)
    }

    /// Append `value` to the properties of variant `variant_index`.
    pub fn add_property(
        &self,
        variant_index: usize,
        value: impl Into<String>,
    ) -> DomainResult<()> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation(EMPTY_PROPERTY));
        }
        self.modify(|d| {
            if let Some(variant) = d.variants.get_mut(variant_index) {
                variant.properties.push(value);
            }
        });
        Ok(())
    }

    pub fn remove_property(&self, variant_index: usize, property_index: usize) {
        self.modify(|d| {
            if let Some(variant) = d.variants.get_mut(variant_index) {
                if property_index < variant.properties.len() {
                    variant.properties.remove(property_index);
                }
            }
        });
    }

    /// Drop variant `index`. Existing SKU rows are left as they are until the
    /// next [`FormStore::apply_variants`].
    pub fn remove_variant(&self, index: usize) {
        self.modify(|d| {
            if index < d.variants.len() {
                d.variants.remove(index);
            }
        });
    }

    // -------------------------
    // SKU rows
    // -------------------------

    /// Regenerate every SKU row from the current variants; returns the row count.
    pub fn apply_variants(&self) -> usize {
        let mut count = 0;
        self.modify(|d| {
            d.variant_combinations = generate_combinations(&d.variants);
            count = d.variant_combinations.len();
        });
        tracing::debug!(rows = count, "variant combinations regenerated");
        count
    }

    pub fn delete_combination(&self, index: usize) {
        self.modify(|d| {
            if index < d.variant_combinations.len() {
                d.variant_combinations.remove(index);
            }
        });
    }

    pub fn set_combination_field(
        &self,
        index: usize,
        field: CombinationField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        self.modify(|d| {
            if let Some(row) = d.variant_combinations.get_mut(index) {
                row.set_field(field, value);
            }
        });
    }

    /// Flip the cover flag of row `index`.
    pub fn toggle_cover(&self, index: usize) {
        self.modify(|d| {
            if let Some(row) = d.variant_combinations.get_mut(index) {
                row.cover = !row.cover;
            }
        });
    }
}

/// Scratch state of the variant editor panel.
///
/// Holds the pending inputs and which variant is being edited; everything
/// that belongs to the draft goes through the store.
pub struct VariantEditor<S> {
    store: Arc<FormStore<S>>,
    new_variant_name: String,
    new_property: String,
    editing_index: Option<usize>,
    show_table: bool,
}

impl<S> VariantEditor<S> {
    pub fn new(store: Arc<FormStore<S>>) -> Self {
        Self {
            store,
            new_variant_name: String::new(),
            new_property: String::new(),
            editing_index: None,
            show_table: false,
        }
    }

    pub fn store(&self) -> &Arc<FormStore<S>> {
        &self.store
    }

    pub fn new_variant_name(&self) -> &str {
        &self.new_variant_name
    }

    pub fn set_new_variant_name(&mut self, name: impl Into<String>) {
        self.new_variant_name = name.into();
    }

    pub fn new_property(&self) -> &str {
        &self.new_property
    }

    pub fn set_new_property(&mut self, value: impl Into<String>) {
        self.new_property = value.into();
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn select(&mut self, index: usize) {
        self.editing_index = Some(index);
    }

    /// The SKU table is shown once variants were applied and rows exist.
    pub fn table_visible(&self) -> bool {
        self.show_table && !self.store.state().variant_combinations.is_empty()
    }

    /// Add a variant from the pending name and start editing it.
    pub fn add_variant(&mut self) -> DomainResult<usize> {
        let index = self.store.add_variant(self.new_variant_name.clone())?;
        self.new_variant_name.clear();
        self.editing_index = Some(index);
        Ok(index)
    }

    /// Add the pending property to the variant being edited.
    ///
    /// Does nothing when no variant is selected.
    pub fn add_property(&mut self) -> DomainResult<()> {
        let Some(index) = self.editing_index else {
            return Ok(());
        };
        self.store.add_property(index, self.new_property.clone())?;
        self.new_property.clear();
        Ok(())
    }

    /// Remove the last property of variant `variant_index`.
    pub fn remove_last_property(&mut self, variant_index: usize) {
        let len = self
            .store
            .state()
            .variants
            .get(variant_index)
            .map(|v| v.properties.len())
            .unwrap_or(0);
        if len > 0 {
            self.store.remove_property(variant_index, len - 1);
        }
    }

    pub fn remove_variant(&mut self, index: usize) {
        self.store.remove_variant(index);
        if self.editing_index == Some(index) {
            self.editing_index = None;
        }
    }

    /// Regenerate the SKU rows, show the table and end editing.
    pub fn apply(&mut self) -> usize {
        let rows = self.store.apply_variants();
        self.show_table = true;
        self.editing_index = None;
        rows
    }
}
