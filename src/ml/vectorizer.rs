use crate::error::{ApiError, Result};
use ndarray::Array1;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

// Word tokens of two or more characters, matching how the vocabulary was
// built during offline fitting.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// A fitted TF-IDF transform.
///
/// Fitting happens in the offline preprocessing pipeline; this type only
/// applies the learned vocabulary and idf weights to incoming text. Loaded
/// once at startup and shared read-only across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to feature-column mapping learned at fit time.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column.
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        let vectorizer = Self { vocabulary, idf };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Load a fitted vectorizer from its JSON artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| ApiError::ArtifactError(format!("{}: {}", path.display(), e)))?;
        let vectorizer: TfidfVectorizer = serde_json::from_reader(BufReader::new(file))?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<()> {
        for (term, &column) in &self.vocabulary {
            if column >= self.idf.len() {
                return Err(ApiError::ArtifactError(format!(
                    "vocabulary term '{}' maps to column {} but only {} idf weights are present",
                    term,
                    column,
                    self.idf.len()
                )));
            }
        }
        Ok(())
    }

    /// Number of feature columns produced by `transform`.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Apply the fitted transform to one document: term-frequency counts over
    /// known vocabulary terms, scaled by idf, L2-normalized. Tokens outside
    /// the vocabulary contribute nothing; a document with no known tokens
    /// yields the zero vector.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut weights = Array1::<f32>::zeros(self.idf.len());

        let lowered = text.to_lowercase();
        for token in TOKEN_PATTERN.find_iter(&lowered) {
            if let Some(&column) = self.vocabulary.get(token.as_str()) {
                weights[column] += 1.0;
            }
        }

        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let norm = weights.dot(&weights).sqrt();
        if norm > 0.0 {
            weights /= norm;
        }
        weights
    }
}
