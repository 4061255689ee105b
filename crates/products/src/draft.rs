use std::sync::Arc;

use serde::{Deserialize, Serialize};

use skuforge_core::{DomainError, DomainResult};

/// A file picked by the user, as handed over by the host (browser file API,
/// desktop picker, test fixture).
///
/// The bytes are shared, never copied: cloning an `ImageFile` (and therefore a
/// whole draft snapshot) only bumps a reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime_type: Option<String>,
    bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One uploaded image candidate.
///
/// `preview` is derived from `file` when the image is added and cannot be
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    file: ImageFile,
    preview: String,
    is_main: bool,
}


impl ProductImage {
    /// New, non-main image with an already resolved preview handle.
    pub fn new(file: ImageFile, preview: impl Into<String>) -> Self {
        Self {
            file,
            preview: preview.into(),
            is_main: false,
        }
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn set_main(&mut self, is_main: bool) {
        self.is_main = is_main;
    }
}

/// A named axis of differentiation (e.g. "Size") with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub properties: Vec<String>,
}


impl Variant {
    /// A variant with no properties yet.
    ///
    /// Rejects names that are blank after trimming. The stored name is kept
    /// exactly as typed.
    pub fn named(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Variant name cannot be empty"));
        }
        Ok(Self {
            name,
            properties: Vec::new(),
        })
    }

    pub fn with_properties<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

/// Editable string fields of a generated SKU row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombinationField {
    Quantity,
    ExternalId,
    Price,
    PackingLength,
    PackingWidth,
    PackingHeight,
    Weight,
}

impl CombinationField {
    pub const ALL: [CombinationField; 7] = [
        CombinationField::Quantity,
        CombinationField::ExternalId,
        CombinationField::Price,
        CombinationField::PackingLength,
        CombinationField::PackingWidth,
        CombinationField::PackingHeight,
        CombinationField::Weight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CombinationField::Quantity => "quantity",
            CombinationField::ExternalId => "externalId",
            CombinationField::Price => "price",
            CombinationField::PackingLength => "packingLength",
            CombinationField::PackingWidth => "packingWidth",
            CombinationField::PackingHeight => "packingHeight",
            CombinationField::Weight => "weight",
        }
    }
}

pub const DEFAULT_QUANTITY: &str = "1";
pub const DEFAULT_PACKING_DIMENSION: &str = "0";

/// One SKU row: a value for every variant axis plus the per-row fields.
///
/// Numeric fields stay string-encoded exactly as typed; they are only parsed
/// when the submission payload is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCombination {
    values: Vec<(String, String)>,
    pub quantity: String,
    pub external_id: String,
    pub price: String,
    pub packing_length: String,
    pub packing_width: String,
    pub packing_height: String,
    pub weight: String,
    pub cover: bool,
}


impl Default for VariantCombination {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            external_id: String::new(),
            price: String::new(),
            packing_length: DEFAULT_PACKING_DIMENSION.to_string(),
            packing_width: DEFAULT_PACKING_DIMENSION.to_string(),
            packing_height: DEFAULT_PACKING_DIMENSION.to_string(),
            weight: String::new(),
            cover: false,
        }
    }
}

impl VariantCombination {
    /// A row with default per-row fields and the given axis assignments.
    ///
    /// A repeated axis name keeps its first position and takes the last value.
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::default();
        for (name, value) in values {
            row.assign(name.into(), value.into());
        }
        row
    }

    fn assign(&mut self, name: String, value: String) {
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name, value)),
        }
    }

    /// Value assigned to the variant axis `name`, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Axis assignments in variant declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn field(&self, field: CombinationField) -> &str {
        match field {
            CombinationField::Quantity => &self.quantity,
            CombinationField::ExternalId => &self.external_id,
            CombinationField::Price => &self.price,
            CombinationField::PackingLength => &self.packing_length,
            CombinationField::PackingWidth => &self.packing_width,
            CombinationField::PackingHeight => &self.packing_height,
            CombinationField::Weight => &self.weight,
        }
    }

    pub fn set_field(&mut self, field: CombinationField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CombinationField::Quantity => self.quantity = value,
            CombinationField::ExternalId => self.external_id = value,
            CombinationField::Price => self.price = value,
            CombinationField::PackingLength => self.packing_length = value,
            CombinationField::PackingWidth => self.packing_width = value,
            CombinationField::PackingHeight => self.packing_height = value,
            CombinationField::Weight => self.weight = value,
        }
    }
}

/// How the created product is shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    EasyPost,
    Warehouse,
}


impl ShippingMethod {
    pub const ALL: [ShippingMethod; 2] = [ShippingMethod::EasyPost, ShippingMethod::Warehouse];

    /// Wire name (`shippingType` in the submission payload).
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::EasyPost => "easy_post",
            ShippingMethod::Warehouse => "warehouse",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMethod::EasyPost => "EASY Post",
            ShippingMethod::Warehouse => "Warehouse Management System",
        }
    }
}

impl core::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ShippingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy_post" => Ok(ShippingMethod::EasyPost),
            "warehouse" => Ok(ShippingMethod::Warehouse),
            other => Err(DomainError::validation(format!(
                "unknown shipping method `{other}` (expected easy_post or warehouse)"
            ))),
        }
    }
}

/// A selectable product collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
}

/// Collections offered by the general-information panel.
pub const COLLECTIONS: &[Collection] = &[
    Collection {
        id: "642ecc12db889ecd88d81dda",
        name: "Summer Collection",
    },
    Collection {
        id: "2",
        name: "Winter Collection",
    },
    Collection {
        id: "3",
        name: "Spring Collection",
    },
    Collection {
        id: "4",
        name: "Autumn Collection",
    },
];

pub fn collection_by_id(id: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.id == id)
}

/// The in-progress product draft.
///
/// `Default` is the empty draft the form starts from and returns to after a
/// successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub title: String,
    pub description: String,
    /// Selected collection id (see [`COLLECTIONS`]).
    pub collection: String,
    pub shipping_method: Option<ShippingMethod>,
    pub images: Vec<ProductImage>,
    pub variants: Vec<Variant>,
    /// Only consistent with `variants` right after regeneration.
    pub variant_combinations: Vec<VariantCombination>,
}

impl FormState {
    pub fn main_image(&self) -> Option<&ProductImage> {
        self.images.iter().find(|img| img.is_main())
    }

    /// Mark image `index` as main and every other image as not main.
    ///
    /// Out-of-range indexes clear the flag everywhere.
    pub fn set_main_image(&mut self, index: usize) {
        for (i, img) in self.images.iter_mut().enumerate() {
            img.set_main(i == index);
        }
    }
}
