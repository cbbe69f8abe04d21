//! `cardseg predict` and `cardseg single`: cluster assignment from a saved artifact

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::pipeline::{
    load_dataset, save_dataset, ClusterId, PipelineResult, SegmentationPipeline, CLUSTER_COLUMN,
};
use crate::report::{display_cluster_profiles, profile_for, PredictionSummary};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_field, print_info,
    print_step_header, print_step_time, print_success,
};

use super::args::SingleEntryArgs;

/// Load the artifact once; it is read-only for the rest of the run.
pub fn load_pipeline(artifact: &Path) -> Result<SegmentationPipeline> {
    SegmentationPipeline::load(artifact)
        .with_context(|| format!("Failed to load pipeline artifact: {}", artifact.display()))
}

/// Segment every row of `input` and write the results with a CLUSTER column.
pub fn run_predict(
    artifact: &Path,
    input: &Path,
    output: &Path,
    emit_features: bool,
    infer_schema_length: usize,
) -> Result<()> {
    print_step_header(1, "Load");
    let step_start = Instant::now();
    let pipeline = load_pipeline(artifact)?;
    print_success("Pipeline artifact loaded");

    let spinner = create_spinner("Loading customers...");
    let df = match load_dataset(input, infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            finish_with_failure(&spinner, "Failed to load customers");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Customers loaded");
    print_field("Rows", df.height());
    print_field("Columns", df.width());
    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    print_step_header(2, "Predict Clusters");
    let step_start = Instant::now();
    let spinner = create_spinner("Preprocessing and assigning clusters...");
    let predicted = segment(&pipeline, &df, emit_features);
    let (predictions, base) = match predicted {
        Ok(result) => result,
        Err(e) => {
            finish_with_failure(&spinner, "Prediction failed");
            return Err(e).with_context(|| format!("Failed to segment {}", input.display()));
        }
    };
    finish_with_success(&spinner, "Prediction complete");
    let predict_elapsed = step_start.elapsed();
    print_step_time(predict_elapsed);

    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let mut result = with_cluster_column(&base, &predictions)?;
    save_dataset(&mut result, output)?;
    print_success(&format!("Saved to {}", output.display()));
    let save_elapsed = step_start.elapsed();
    print_step_time(save_elapsed);

    let mut summary = PredictionSummary::new(&predictions);
    summary.set_load_time(load_elapsed);
    summary.set_predict_time(predict_elapsed);
    summary.set_save_time(save_elapsed);
    summary.display();
    display_cluster_profiles(None);

    Ok(())
}

/// Cluster ids plus the frame to write them next to: the raw input, or the
/// preprocessed features when `emit_features` is set.
fn segment(
    pipeline: &SegmentationPipeline,
    df: &DataFrame,
    emit_features: bool,
) -> PipelineResult<(Vec<ClusterId>, DataFrame)> {
    if emit_features {
        let (features, predictions) = pipeline.transform_and_predict(df)?;
        Ok((predictions, features))
    } else {
        Ok((pipeline.predict(df)?, df.clone()))
    }
}

/// Copy of `df` with the predicted cluster ids appended.
pub fn with_cluster_column(df: &DataFrame, predictions: &[ClusterId]) -> Result<DataFrame> {
    let mut result = df.clone();
    result
        .with_column(Series::new(CLUSTER_COLUMN.into(), predictions))
        .context("Failed to append cluster column")?;
    Ok(result)
}

/// Segment one customer described by command-line flags.
pub fn run_single(artifact: &Path, entry: &SingleEntryArgs) -> Result<()> {
    let pipeline = load_pipeline(artifact)?;

    let missing = entry.missing_features();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
        print_info(&format!("Imputing {} missing feature(s): {}", missing.len(), names.join(", ")));
    }

    let cluster = pipeline
        .predict_one(entry.to_record())
        .context("Failed to segment customer")?;

    println!();
    println!(
        "    {} Predicted Cluster: {}",
        style("✓").green().bold(),
        style(cluster).green().bold()
    );
    if let Some(profile) = profile_for(cluster) {
        println!("      {}", style(profile.recommendation).dim());
    }

    display_cluster_profiles(Some(cluster));
    Ok(())
}
