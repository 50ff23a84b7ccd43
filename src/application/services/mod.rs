//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod pricing;
mod shared;

pub use pricing::{PriceSummary, PricingService};
pub use shared::SharedCatalog;
