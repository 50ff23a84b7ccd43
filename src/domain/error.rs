//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::ItemId;

/// Domain errors represent violations of the item tree rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("negative price for '{name}': {price}")]
    NegativePrice { name: String, price: f64 },

    #[error("price for '{name}' is not a finite number")]
    NonFinitePrice { name: String },

    #[error("adding {item} to container {container} would create a cycle")]
    StructuralViolation { container: ItemId, item: ItemId },

    #[error("item is not a container: {0}")]
    NotAContainer(ItemId),

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
