//! Catalog-level errors.

use kmpapp_core::{DomainError, ProductId};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Two products in one published sequence share an id; the grid keys
    /// cells by id, so such a sequence has no well-defined rendering.
    #[error("duplicate product id in published sequence: {0}")]
    DuplicateProductId(ProductId),
}
