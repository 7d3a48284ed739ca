//! Catalog service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    NotFound,
}
