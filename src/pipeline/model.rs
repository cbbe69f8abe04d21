//! Cluster assignment models consumed after preprocessing
//!
//! The pipeline treats the model as opaque: it hands over a feature vector in
//! the order the model asks for and gets back a cluster id. `CentroidModel`
//! is the shipped implementation, a fitted K-Means reduced to its centroids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::schema::{Feature, TOTAL_SPENDING};

/// Integer cluster label. Its range is a property of the trained model.
pub type ClusterId = u32;

/// Maps a preprocessed feature vector to a cluster id.
pub trait ClusterModel: Send + Sync {
    /// Names of the preprocessed columns the model consumes, in order.
    fn feature_names(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> PipelineResult<ClusterId>;
}

/// Per-feature standardisation applied before distance computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Nearest-centroid assignment under Euclidean distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidModel {
    features: Vec<String>,
    #[serde(default)]
    scaler: Option<Standardizer>,
    centroids: Vec<Vec<f64>>,
}

fn invalid(message: impl Into<String>) -> PipelineError {
    PipelineError::Model(message.into())
}

impl CentroidModel {
    pub fn new(
        features: Vec<String>,
        scaler: Option<Standardizer>,
        centroids: Vec<Vec<f64>>,
    ) -> PipelineResult<Self> {
        let model = Self {
            features,
            scaler,
            centroids,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a model from JSON text.
    pub fn from_json_str(json: &str) -> PipelineResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Read and validate a model from a JSON file.
    pub fn from_json_file(path: &Path) -> PipelineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    pub fn scaler(&self) -> Option<&Standardizer> {
        self.scaler.as_ref()
    }

    /// Check dimensions and feature names.
    pub fn validate(&self) -> PipelineResult<()> {
        let dims = self.features.len();
        if dims == 0 {
            return Err(invalid("model must name at least one feature"));
        }
        for name in &self.features {
            if name != TOTAL_SPENDING && Feature::from_name(name).is_none() {
                return Err(invalid(format!(
                    "unknown feature '{}' (expected one of the input columns or {})",
                    name, TOTAL_SPENDING
                )));
            }
        }

        if self.centroids.is_empty() {
            return Err(invalid("model must contain at least one centroid"));
        }
        for (i, centroid) in self.centroids.iter().enumerate() {
            if centroid.len() != dims {
                return Err(invalid(format!(
                    "centroid {} has {} values, expected {}",
                    i,
                    centroid.len(),
                    dims
                )));
            }
            if centroid.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("centroid {} contains a non-finite value", i)));
            }
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != dims || scaler.scale.len() != dims {
                return Err(invalid(format!(
                    "scaler has {} means and {} scales, expected {} of each",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    dims
                )));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(invalid("scaler scales must be finite and non-zero"));
            }
            if scaler.mean.iter().any(|m| !m.is_finite()) {
                return Err(invalid("scaler means must be finite"));
            }
        }

        Ok(())
    }
}

impl ClusterModel for CentroidModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, features: &[f64]) -> PipelineResult<ClusterId> {
        if features.len() != self.features.len() {
            return Err(PipelineError::FeatureCount {
                expected: self.features.len(),
                actual: features.len(),
            });
        }

        let point: Vec<f64> = match &self.scaler {
            Some(scaler) => features
                .iter()
                .zip(scaler.mean.iter().zip(scaler.scale.iter()))
                .map(|(x, (mean, scale))| (x - mean) / scale)
                .collect(),
            None => features.to_vec(),
        };

        if let Some(i) = point.iter().position(|v| !v.is_finite()) {
            return Err(invalid(format!(
                "feature '{}' has non-finite value {}",
                self.features[i], features[i]
            )));
        }

        // Strict comparison keeps the lowest index on ties
        let mut closest: Option<(usize, f64)> = None;

        for (cluster_idx, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = point
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();

            if distance.is_finite() && closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((cluster_idx, distance));
            }
        }

        let (closest_cluster, _) = closest
            .ok_or_else(|| invalid("distance to every centroid overflowed"))?;

        ClusterId::try_from(closest_cluster)
            .map_err(|_| invalid(format!("cluster index {} out of range", closest_cluster)))
    }
}
