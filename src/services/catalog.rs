use crate::error::{ApiError, Result};
use crate::models::ProductRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Lookup normalization: leading/trailing whitespace trimmed, lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// The product table plus a normalized lookup column derived once at load.
/// Immutable for the process lifetime; lookups scan in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    normalized: Vec<String>,
    has_combined_features: bool,
}

impl Catalog {
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let normalized = records.iter().map(|r| normalize(&r.description)).collect();
        // Schema-level property: the column exists if any row carries it
        let has_combined_features = records.iter().any(|r| r.combined_features.is_some());

        Self {
            records,
            normalized,
            has_combined_features,
        }
    }

    /// Load the catalog from its JSON artifact, an array of product rows.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| ApiError::ArtifactError(format!("{}: {}", path.display(), e)))?;
        let records: Vec<ProductRecord> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_records(records))
    }

    /// Index of the first row whose normalized description equals `key`.
    pub fn find_exact(&self, key: &str) -> Option<usize> {
        self.normalized.iter().position(|n| n == key)
    }

    pub fn record(&self, index: usize) -> Option<&ProductRecord> {
        self.records.get(index)
    }

    /// Whether the combined-features column exists in the loaded schema.
    pub fn has_combined_features(&self) -> bool {
        self.has_combined_features
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(description: &str, features: Option<&str>) -> ProductRecord {
        ProductRecord {
            description: description.to_string(),
            combined_features: features.map(str::to_string),
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Red Mug  "), "red mug");
        assert_eq!(normalize("BLUE BOWL"), "blue bowl");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn find_exact_matches_normalized_description() {
        let catalog = Catalog::from_records(vec![
            record("  Red Mug  ", Some("red mug ceramic")),
            record("Blue Bowl", Some("blue bowl ceramic")),
        ]);

        assert_eq!(catalog.find_exact("red mug"), Some(0));
        assert_eq!(catalog.find_exact("blue bowl"), Some(1));
        assert_eq!(catalog.find_exact("red"), None);
        assert_eq!(catalog.find_exact("Red Mug"), None);
    }

    #[test]
    fn find_exact_returns_first_match_in_load_order() {
        let catalog = Catalog::from_records(vec![
            record("Red Mug", Some("first")),
            record("  RED MUG ", Some("second")),
        ]);

        assert_eq!(catalog.find_exact("red mug"), Some(0));
    }

    #[test]
    fn combined_features_flag_is_schema_wide() {
        let with_column = Catalog::from_records(vec![
            record("Red Mug", Some("red mug")),
            record("Blue Bowl", None),
        ]);
        assert!(with_column.has_combined_features());

        let without_column =
            Catalog::from_records(vec![record("Red Mug", None), record("Blue Bowl", None)]);
        assert!(!without_column.has_combined_features());
    }

    #[test]
    fn loads_rows_with_dataset_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"Description": "Red Mug", "combined_features": "red mug ceramic"}},
                {{"Description": "Blue Bowl"}}
            ]"#
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.record(0).unwrap().description, "Red Mug");
        assert!(catalog.record(1).unwrap().combined_features.is_none());
        assert!(catalog.has_combined_features());
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Catalog::load(&dir.path().join("absent.json")).is_err());
    }
}
