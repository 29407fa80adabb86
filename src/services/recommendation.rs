use crate::error::RecommendError;
use crate::ml::TfidfVectorizer;
use crate::models::Recommendation;
use crate::services::{catalog, Catalog, SimilarityIndex};
use tracing::debug;

/// Maximum number of alternatives returned for one lookup.
const MAX_RECOMMENDATIONS: usize = 5;

/// The read path of the API: exact catalog lookup, vectorization of the
/// stored feature text, nearest-neighbor query, result assembly. Owns the
/// three pre-built artifacts for the lifetime of the process and never
/// mutates them, so it can be shared freely across workers.
pub struct RecommendationService {
    catalog: Catalog,
    vectorizer: TfidfVectorizer,
    index: SimilarityIndex,
}

impl RecommendationService {
    pub fn new(catalog: Catalog, vectorizer: TfidfVectorizer, index: SimilarityIndex) -> Self {
        Self {
            catalog,
            vectorizer,
            index,
        }
    }

    /// Resolve `product` to a catalog row and return up to five distinct
    /// similar products, nearest first. The input is matched exactly against
    /// trim+lowercase-normalized descriptions; there is no fuzzy matching.
    pub fn recommend(&self, product: &str) -> Result<Recommendation, RecommendError> {
        let key = catalog::normalize(product);
        let row = self
            .catalog
            .find_exact(&key)
            .ok_or_else(|| RecommendError::ProductNotFound(product.to_string()))?;

        if !self.catalog.has_combined_features() {
            return Err(RecommendError::MissingFeatures);
        }

        let selected = self
            .catalog
            .record(row)
            .ok_or_else(|| RecommendError::Internal(format!("catalog row {row} out of bounds")))?;
        let features = selected.combined_features.as_deref().ok_or_else(|| {
            RecommendError::Internal(format!(
                "row '{}' has no combined features",
                selected.description
            ))
        })?;

        let query = self.vectorizer.transform(features);
        let neighbors = self
            .index
            .kneighbors(query.view())
            .map_err(|e| RecommendError::Internal(e.to_string()))?;
        debug!(matched = row, candidates = neighbors.len(), "similarity query done");

        // Collect candidates in ranked order, skipping the selected product
        // itself (compared by raw description, not row index) and duplicates.
        let mut recommendations: Vec<String> = Vec::new();
        for neighbor in neighbors {
            let candidate = match self.catalog.record(neighbor.index) {
                Some(record) => record.description.as_str(),
                None => {
                    return Err(RecommendError::Internal(format!(
                        "index returned row {} outside the catalog",
                        neighbor.index
                    )))
                }
            };
            if candidate == selected.description {
                continue;
            }
            if recommendations.iter().any(|r| r == candidate) {
                continue;
            }
            recommendations.push(candidate.to_string());
        }
        recommendations.truncate(MAX_RECOMMENDATIONS);

        Ok(Recommendation {
            selected_product: selected.description.clone(),
            recommendations,
        })
    }
}
