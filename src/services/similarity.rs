use crate::error::{ApiError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One entry returned by a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Catalog row the vector belongs to.
    pub index: usize,
    pub distance: f32,
}

/// A fitted nearest-neighbor index over the vectorized catalog.
///
/// Holds one vector per catalog row, in row order, plus the neighbor count
/// the index was built with. The neighbor count is a property of the fitted
/// artifact, never a query parameter. Queries are brute-force cosine scans;
/// the structure is opaque to callers beyond `kneighbors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityIndex {
    vectors: Vec<Vec<f32>>,
    n_neighbors: usize,
}

impl SimilarityIndex {
    pub fn new(vectors: Vec<Vec<f32>>, n_neighbors: usize) -> Result<Self> {
        let index = Self {
            vectors,
            n_neighbors,
        };
        index.validate()?;
        Ok(index)
    }

    /// Load a fitted index from its JSON artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| ApiError::ArtifactError(format!("{}: {}", path.display(), e)))?;
        let index: SimilarityIndex = serde_json::from_reader(BufReader::new(file))?;
        index.validate()?;
        Ok(index)
    }

    fn validate(&self) -> Result<()> {
        if let Some(dimension) = self.dimension() {
            if let Some(row) = self.vectors.iter().position(|v| v.len() != dimension) {
                return Err(ApiError::ArtifactError(format!(
                    "vector {} has {} dimensions, expected {}",
                    row,
                    self.vectors[row].len(),
                    dimension
                )));
            }
        }
        Ok(())
    }

    /// Dimensionality of the indexed vectors, `None` for an empty index.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.first().map(Vec::len)
    }

    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Nearest rows to `query` by cosine distance: ascending distance, ties
    /// kept in row order, at most `n_neighbors` entries.
    pub fn kneighbors(&self, query: ArrayView1<'_, f32>) -> Result<Vec<Neighbor>> {
        if let Some(dimension) = self.dimension() {
            if query.len() != dimension {
                return Err(ApiError::InternalError(format!(
                    "query vector has {} dimensions, index expects {}",
                    query.len(),
                    dimension
                )));
            }
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, row)| Neighbor {
                index,
                distance: cosine_distance(ArrayView1::from(row.as_slice()), query),
            })
            .collect();

        // Stable sort keeps row order for equal distances
        neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        neighbors.truncate(self.n_neighbors);
        Ok(neighbors)
    }
}

/// Cosine distance in [0, 2]; zero-norm vectors are treated as maximally
/// distant rather than producing NaN.
fn cosine_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    fn index() -> SimilarityIndex {
        SimilarityIndex::new(
            vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
                vec![1.0, 0.1],
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn kneighbors_orders_by_ascending_distance() {
        let query = array![1.0, 0.0];
        let neighbors = index().kneighbors(query.view()).unwrap();

        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[1].index, 3);
        assert_eq!(neighbors[2].index, 2);
        assert!(neighbors[0].distance <= neighbors[1].distance);
        assert!(neighbors[1].distance <= neighbors[2].distance);
    }

    #[test]
    fn kneighbors_breaks_ties_in_row_order() {
        let index = SimilarityIndex::new(
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 0.0]],
            3,
        )
        .unwrap();

        // Rows 1 and 2 are colinear with the query, both at distance zero
        let neighbors = index.kneighbors(array![1.0, 0.0].view()).unwrap();
        assert_eq!(neighbors[0].index, 1);
        assert_eq!(neighbors[1].index, 2);
    }

    #[test]
    fn kneighbors_caps_results_at_n_neighbors() {
        let neighbors = index().kneighbors(array![1.0, 1.0].view()).unwrap();
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn kneighbors_rejects_mismatched_query_dimension() {
        assert!(index().kneighbors(array![1.0, 0.0, 0.0].view()).is_err());
    }

    #[test]
    fn zero_norm_vectors_rank_last() {
        let index =
            SimilarityIndex::new(vec![vec![0.0, 0.0], vec![1.0, 0.0]], 2).unwrap();
        let neighbors = index.kneighbors(array![1.0, 0.0].view()).unwrap();
        assert_eq!(neighbors[0].index, 1);
    }

    #[test]
    fn rejects_ragged_vectors() {
        assert!(SimilarityIndex::new(vec![vec![1.0, 0.0], vec![1.0]], 2).is_err());
    }

    #[test]
    fn loads_from_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nn_model.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"vectors": [[1.0, 0.0], [0.0, 1.0]], "n_neighbors": 2}}"#
        )
        .unwrap();

        let index = SimilarityIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.n_neighbors(), 2);
        assert_eq!(index.dimension(), Some(2));
    }
}
