//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const PRODUCT_PREFIX: &str = "prod_";
const PRODUCT_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a created product: `prod_` followed by nine lowercase
/// base-36 characters (e.g. `prod_k3x9a0qzm`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a new identifier.
    ///
    /// The suffix is drawn from the random bits of a UUIDv7. Prefer
    /// [`ProductId::from_uuid`] in tests for determinism.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    /// Derive an identifier from the low (random) bits of `uuid`.
    pub fn from_uuid(uuid: Uuid) -> Self {
        let space = 36u128.pow(PRODUCT_SUFFIX_LEN as u32);
        let mut n = uuid.as_u128() % space;

        let mut suffix = [b'0'; PRODUCT_SUFFIX_LEN];
        for slot in suffix.iter_mut().rev() {
            *slot = BASE36[(n % 36) as usize];
            n /= 36;
        }

        let mut id = String::with_capacity(PRODUCT_PREFIX.len() + PRODUCT_SUFFIX_LEN);
        id.push_str(PRODUCT_PREFIX);
        id.extend(suffix.iter().map(|b| char::from(*b)));
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffix = s
            .strip_prefix(PRODUCT_PREFIX)
            .ok_or_else(|| {
                DomainError::invalid_id(format!("ProductId: missing `{PRODUCT_PREFIX}` prefix"))
            })?;

        if suffix.len() != PRODUCT_SUFFIX_LEN
            || !suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        {
            return Err(DomainError::invalid_id(format!(
                "ProductId: expected {PRODUCT_SUFFIX_LEN} lowercase alphanumerics after prefix, \
                 got `{suffix}`"
            )));
        }

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}
