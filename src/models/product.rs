use serde::{Deserialize, Serialize};

/// One catalog row as stored in the products artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Raw product description, exactly as it appears in the source dataset.
    /// Accepts the dataset's capitalized column name.
    #[serde(alias = "Description")]
    pub description: String,

    /// Precomputed text blob fed to the vectorizer. Absent when the offline
    /// preprocessing step has not been run against this catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_features: Option<String>,
}
