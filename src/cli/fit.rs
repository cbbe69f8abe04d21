//! `cardseg fit`: learn imputation statistics and write the pipeline artifact

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::pipeline::{load_dataset, CentroidModel, ClusterModel, SegmentationPipeline, Stage};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_field, print_step_header,
    print_step_time, print_success,
};

/// Fit the pipeline on `input`, bundle it with the model at `model_path` and
/// save the artifact to `output`.
pub fn run_fit(
    input: &Path,
    model_path: &Path,
    output: &Path,
    infer_schema_length: usize,
) -> Result<()> {
    print_step_header(1, "Load Inputs");
    let step_start = Instant::now();

    let model = CentroidModel::from_json_file(model_path)
        .with_context(|| format!("Failed to load cluster model: {}", model_path.display()))?;
    print_success(&format!(
        "Model loaded ({} clusters over {} features)",
        model.n_clusters(),
        model.feature_names().len()
    ));

    let spinner = create_spinner("Loading reference dataset...");
    let df = match load_dataset(input, infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            finish_with_failure(&spinner, "Failed to load reference dataset");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Reference dataset loaded");
    print_field("Rows", df.height());
    print_field("Columns", df.width());
    print_step_time(step_start.elapsed());

    print_step_header(2, "Fit Pipeline");
    let step_start = Instant::now();
    let mut pipeline = SegmentationPipeline::new(model);
    pipeline
        .fit(&df)
        .with_context(|| format!("Failed to fit pipeline on {}", input.display()))?;

    for stage in pipeline.stages() {
        if let Stage::Imputer(imputer) = stage {
            if let Some(stats) = imputer.statistics() {
                print_field("CREDIT_LIMIT median", format!("{:.2}", stats.credit_limit_median));
                print_field(
                    "MINIMUM_PAYMENTS median",
                    format!("{:.2}", stats.min_payments_median),
                );
                print_field("Mode-imputed columns", stats.modes.len());
                print_field("Median-imputed columns", stats.medians.len());
            }
        }
    }
    print_success("Pipeline fitted");
    print_step_time(step_start.elapsed());

    print_step_header(3, "Save Artifact");
    let step_start = Instant::now();
    pipeline
        .save(output)
        .with_context(|| format!("Failed to write artifact: {}", output.display()))?;
    print_success(&format!("Saved to {}", output.display()));
    print_step_time(step_start.elapsed());

    Ok(())
}
