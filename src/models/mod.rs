use serde::{Deserialize, Serialize};

// Re-export types from product.rs
pub use product::ProductRecord;

mod product;

/// Successful outcome of a recommendation lookup: the canonical catalog
/// description of the matched product plus up to five distinct alternatives,
/// ordered by similarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub selected_product: String,
    pub recommendations: Vec<String>,
}

/// Error response body. Failures are reported with this shape and a 200
/// status; clients detect them by the presence of the `error` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
