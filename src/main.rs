//! cardseg: Credit Card Customer Segmentation CLI
//!
//! Fits the preprocessing pipeline once, then assigns customers to segments
//! in batch or one at a time.

use anyhow::Result;
use clap::Parser;

use cardseg::cli::{
    default_artifact_path, default_results_path, fit::run_fit, predict::run_predict,
    predict::run_single, Cli, Commands,
};
use cardseg::report::display_cluster_profiles;
use cardseg::utils::{print_banner, print_completion, print_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fit {
            input,
            model,
            output,
            infer_schema_length,
        } => {
            let output = output.unwrap_or_else(|| default_artifact_path(&input));
            print_banner(env!("CARGO_PKG_VERSION"));
            print_config(&output, Some(&input), None);
            run_fit(&input, &model, &output, infer_schema_length)?;
            print_completion("Pipeline fitted and saved!");
        }
        Commands::Predict {
            artifact,
            input,
            output,
            emit_features,
            infer_schema_length,
        } => {
            let output = output.unwrap_or_else(|| default_results_path(&input));
            print_banner(env!("CARGO_PKG_VERSION"));
            print_config(&artifact, Some(&input), Some(&output));
            run_predict(&artifact, &input, &output, emit_features, infer_schema_length)?;
            print_completion("Segmentation complete!");
        }
        Commands::Single { artifact, entry } => {
            print_banner(env!("CARGO_PKG_VERSION"));
            print_config(&artifact, None, None);
            run_single(&artifact, &entry)?;
        }
        Commands::Clusters => {
            display_cluster_profiles(None);
        }
    }

    Ok(())
}
