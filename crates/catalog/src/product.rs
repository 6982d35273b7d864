use serde::{Deserialize, Serialize};

use kmpapp_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Currency suffix appended to every rendered price.
pub const CURRENCY_SUFFIX: &str = "USD";

/// Price in the smallest currency unit (cents).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Convert a decimal amount (e.g. `9.99`) to minor units, rounding to the
    /// nearest cent.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a finite, non-negative amount (got {amount})"
            )));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("price is out of range"));
        }
        Ok(Self(cents as u64))
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Price text as shown on a card: `9.99 USD`.
    pub fn label(&self) -> String {
        format!("{self} {CURRENCY_SUFFIX}")
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl ValueObject for Price {}

/// Thumbnail locator. Only passed through to the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUri(String);

impl ImageUri {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("image uri must not be blank"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageUri {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageUri> for String {
    fn from(value: ImageUri) -> Self {
        value.0
    }
}

impl ValueObject for ImageUri {}

/// A catalog item as displayed in the grid. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    image: ImageUri,
    price: Price,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, image: ImageUri, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            image,
            price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &ImageUri {
        &self.image
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
