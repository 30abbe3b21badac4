//! External structural-design dataset projector
//!
//! The beams2d benchmark is an optional external dataset used as alternative
//! real data in the notebooks. The toolkit consumes it through a narrow
//! boundary: a CSV export of the train split, one flattened design per row.
//! A missing export fails at this boundary only; nothing else in the crate
//! depends on it.

use std::path::Path;

use ndarray::Array2;
use tracing::info;

use crate::error::ToolkitError;
use crate::pca::Pca;

/// A 2-D (or `n_components`-D) PCA embedding of beams2d designs, together
/// with the fitted projection.
#[derive(Debug, Clone)]
pub struct BeamsProjection {
    /// (n_samples, n_components) embedding of the designs
    pub embedding: Array2<f64>,
    /// Fitted projection, reusable on further designs
    pub pca: Pca,
}

/// Load the beams2d CSV export and reduce it to `n_components` dimensions.
///
/// At most `n_samples` designs are read. Fails with
/// [`ToolkitError::DatasetMissing`] when the export is absent.
pub fn load_beams2d_projection(
    path: &Path,
    n_samples: usize,
    n_components: usize,
) -> Result<BeamsProjection, ToolkitError> {
    let file = std::fs::File::open(path).map_err(|source| ToolkitError::DatasetMissing {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for result in reader.records() {
        if rows.len() >= n_samples {
            break;
        }
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| {
                ToolkitError::InvalidData(format!(
                    "beams2d export at `{}` contains a non-numeric field: {e}",
                    path.display()
                ))
            })?;
        rows.push(row);
    }

    let n_features = rows.first().map_or(0, Vec::len);
    let mut designs = Array2::zeros((rows.len(), n_features));
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            designs[[i, j]] = value;
        }
    }

    info!(
        "loaded {} beams2d designs with {} features each",
        designs.nrows(),
        n_features
    );

    let (embedding, pca) = Pca::fit_transform(&designs, n_components);
    Ok(BeamsProjection { embedding, pca })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_export_is_actionable() {
        let err = load_beams2d_projection(Path::new("/nonexistent/beams2d.csv"), 10, 2)
            .unwrap_err();
        assert!(matches!(err, ToolkitError::DatasetMissing { .. }));
        assert!(err.to_string().contains("Export the train split"));
    }

    #[test]
    fn test_projects_to_requested_components() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beams2d.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        // 6 designs, 4 features, rank-deficient on purpose
        for i in 0..6 {
            let base = i as f64;
            writeln!(file, "{},{},{},{}", base, base * 2.0, 1.0, base - 0.5).unwrap();
        }
        drop(file);

        let projection = load_beams2d_projection(&path, 100, 2).unwrap();
        assert_eq!(projection.embedding.shape(), &[6, 2]);
        assert_eq!(projection.pca.n_components, 2);
        // Collinear features: one component dominates
        assert!(projection.pca.explained_variance_ratio()[0] > 0.99);
    }

    #[test]
    fn test_truncates_to_n_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beams2d.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..10 {
            writeln!(file, "{},{}", i, 10 - i).unwrap();
        }
        drop(file);

        let projection = load_beams2d_projection(&path, 4, 2).unwrap();
        assert_eq!(projection.embedding.nrows(), 4);
    }
}
