//! Versioned JSON artifact bundling fitted stages and the cluster model

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::model::CentroidModel;
use super::segmenter::SegmentationPipeline;
use super::stage::{Stage, Transformer};

/// Artifact layout version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Artifacts always hold the standard stage sequence, in order.
fn check_stage_sequence(stages: &[Stage]) -> PipelineResult<()> {
    if matches!(
        stages,
        [
            Stage::Imputer(_),
            Stage::PurchaseReconciler(_),
            Stage::MonetaryAggregator(_)
        ]
    ) {
        return Ok(());
    }
    let found: Vec<&str> = stages.iter().map(|s| s.name()).collect();
    Err(PipelineError::Artifact(format!(
        "expected stages [imputer, purchase_reconciler, monetary_aggregator], found [{}]",
        found.join(", ")
    )))
}

/// On-disk form of a fitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format_version: u32,
    /// RFC 3339 timestamp of when the artifact was written
    pub created_at: String,
    pub crate_version: String,
    pub stages: Vec<Stage>,
    pub model: CentroidModel,
}

impl PipelineArtifact {
    /// Snapshot a fitted pipeline.
    pub fn from_pipeline(pipeline: &SegmentationPipeline) -> PipelineResult<Self> {
        if !pipeline.is_fitted() {
            return Err(PipelineError::NotFitted);
        }
        check_stage_sequence(pipeline.stages())?;
        Ok(Self {
            format_version: FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            stages: pipeline.stages().to_vec(),
            model: pipeline.model().clone(),
        })
    }

    /// Validate and rebuild the pipeline.
    pub fn into_pipeline(self) -> PipelineResult<SegmentationPipeline> {
        if self.format_version != FORMAT_VERSION {
            return Err(PipelineError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }
        check_stage_sequence(&self.stages)?;

        for stage in &self.stages {
            if !stage.is_fitted() {
                return Err(PipelineError::Artifact(format!(
                    "stage '{}' was saved unfitted",
                    stage.name()
                )));
            }
            if let Stage::Imputer(imputer) = stage {
                if let Some(stats) = imputer.statistics() {
                    stats.validate()?;
                }
            }
        }
        self.model.validate()?;

        Ok(SegmentationPipeline::with_stages(self.stages, self.model))
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SegmentationPipeline {
    /// Write the fitted pipeline as a JSON artifact.
    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        let json = PipelineArtifact::from_pipeline(self)?.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a pipeline written by `save`.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        PipelineArtifact::from_json(&json)?.into_pipeline()
    }
}
