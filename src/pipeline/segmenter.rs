//! The segmentation pipeline: ordered preprocessing stages plus a cluster model
//!
//! Batch and single-customer prediction both go through `predict_records`, so
//! a customer gets the same preprocessing whether they arrive alone or in a
//! file of thousands.

use polars::prelude::*;
use rayon::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::model::{CentroidModel, ClusterId, ClusterModel};
use super::record::{frame_with_records, records_from_frame, validate_schema, Record};
use super::stage::{Stage, Transformer};

/// Fitted-once, read-many preprocessing pipeline feeding a cluster model.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationPipeline<M = CentroidModel> {
    stages: Vec<Stage>,
    model: M,
}

impl<M: ClusterModel> SegmentationPipeline<M> {
    /// Pipeline with the standard stage order and an unfitted imputer.
    pub fn new(model: M) -> Self {
        Self::with_stages(Stage::default_sequence(), model)
    }

    /// Pipeline with an explicit stage order.
    pub fn with_stages(stages: Vec<Stage>, model: M) -> Self {
        Self { stages, model }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_fitted(&self) -> bool {
        self.stages.iter().all(|s| s.is_fitted())
    }

    fn ensure_fitted(&self) -> PipelineResult<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(PipelineError::NotFitted)
        }
    }

    /// Fit every stage on a reference dataset.
    ///
    /// Each stage learns from the output of the stages before it.
    pub fn fit(&mut self, df: &DataFrame) -> PipelineResult<()> {
        validate_schema(df)?;
        if df.height() == 0 {
            return Err(PipelineError::EmptyDataset);
        }
        let records = records_from_frame(df)?;
        self.fit_records(&records)
    }

    pub fn fit_records(&mut self, records: &[Record]) -> PipelineResult<()> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let mut current = records.to_vec();
        let last = self.stages.len().saturating_sub(1);
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.fit(&current)?;
            if i < last {
                current = current
                    .into_iter()
                    .map(|r| stage.transform(r))
                    .collect::<PipelineResult<Vec<_>>>()?;
            }
        }
        Ok(())
    }

    /// Run one record through every stage in order.
    pub fn transform_record(&self, record: Record) -> PipelineResult<Record> {
        self.ensure_fitted()?;
        self.stages
            .iter()
            .try_fold(record, |acc, stage| stage.transform(acc))
    }

    /// Run every record through the stages. Rows are independent, so the
    /// work is spread across threads; output keeps input order.
    pub fn transform_records(&self, records: &[Record]) -> PipelineResult<Vec<Record>> {
        self.ensure_fitted()?;
        records
            .par_iter()
            .map(|r| {
                self.stages
                    .iter()
                    .try_fold(*r, |acc, stage| stage.transform(acc))
            })
            .collect()
    }

    /// Preprocess a dataset, keeping row order and any extra columns.
    pub fn transform(&self, df: &DataFrame) -> PipelineResult<DataFrame> {
        let records = records_from_frame(df)?;
        let transformed = self.transform_records(&records)?;
        frame_with_records(df, &transformed)
    }

    /// Ordered model inputs for a preprocessed record.
    fn model_input(&self, record: &Record) -> PipelineResult<Vec<f64>> {
        self.model
            .feature_names()
            .iter()
            .map(|name| {
                record.value_by_name(name).ok_or_else(|| {
                    PipelineError::Model(format!(
                        "feature '{}' is still missing after preprocessing",
                        name
                    ))
                })
            })
            .collect()
    }

    /// Cluster ids for records that have already been through every stage.
    fn assign_clusters(&self, transformed: &[Record]) -> PipelineResult<Vec<ClusterId>> {
        transformed
            .par_iter()
            .map(|r| {
                let features = self.model_input(r)?;
                self.model.predict(&features)
            })
            .collect()
    }

    /// Preprocess and assign a cluster to every record.
    pub fn predict_records(&self, records: &[Record]) -> PipelineResult<Vec<ClusterId>> {
        let transformed = self.transform_records(records)?;
        self.assign_clusters(&transformed)
    }

    /// Cluster id for every row of `df`, in row order.
    pub fn predict(&self, df: &DataFrame) -> PipelineResult<Vec<ClusterId>> {
        let records = records_from_frame(df)?;
        self.predict_records(&records)
    }

    /// The preprocessed dataset together with its cluster ids, running the
    /// stages over each row once.
    pub fn transform_and_predict(
        &self,
        df: &DataFrame,
    ) -> PipelineResult<(DataFrame, Vec<ClusterId>)> {
        let records = records_from_frame(df)?;
        let transformed = self.transform_records(&records)?;
        let predictions = self.assign_clusters(&transformed)?;
        Ok((frame_with_records(df, &transformed)?, predictions))
    }

    /// Cluster id for a single customer, via a one-row batch.
    pub fn predict_one(&self, record: Record) -> PipelineResult<ClusterId> {
        let ids = self.predict_records(std::slice::from_ref(&record))?;
        ids.into_iter()
            .next()
            .ok_or_else(|| PipelineError::Model("model returned no prediction".to_string()))
    }
}
