//! Prediction summary report generation

use std::collections::BTreeMap;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::ClusterId;

use super::clusters::profile_for;

/// Summary of a batch prediction run
#[derive(Debug, Default)]
pub struct PredictionSummary {
    pub total_rows: usize,
    pub cluster_counts: BTreeMap<ClusterId, usize>,
    pub load_time: Duration,
    pub predict_time: Duration,
    pub save_time: Duration,
}

impl PredictionSummary {
    pub fn new(predictions: &[ClusterId]) -> Self {
        let mut cluster_counts = BTreeMap::new();
        for &id in predictions {
            *cluster_counts.entry(id).or_insert(0) += 1;
        }
        Self {
            total_rows: predictions.len(),
            cluster_counts,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_predict_time(&mut self, elapsed: Duration) {
        self.predict_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    /// Share of rows assigned to `id`, as a percentage.
    pub fn share(&self, id: ClusterId) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        let count = self.cluster_counts.get(&id).copied().unwrap_or(0);
        count as f64 / self.total_rows as f64 * 100.0
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREDICTION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Cluster").add_attribute(Attribute::Bold),
            Cell::new("Customers").add_attribute(Attribute::Bold),
            Cell::new("Share").add_attribute(Attribute::Bold),
            Cell::new("Recommendation").add_attribute(Attribute::Bold),
        ]);

        for (&id, &count) in &self.cluster_counts {
            let recommendation = profile_for(id)
                .map(|p| p.recommendation)
                .unwrap_or("(no reference profile)");
            table.add_row(vec![
                Cell::new(id).fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new(count),
                Cell::new(format!("{:.1}%", self.share(id))),
                Cell::new(truncate(recommendation, 60)),
            ]);
        }

        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(self.total_rows)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new("100.0%"),
            Cell::new(""),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} load {:.2}s · predict {:.2}s · save {:.2}s",
            style("⏱").dim(),
            self.load_time.as_secs_f64(),
            self.predict_time.as_secs_f64(),
            self.save_time.as_secs_f64()
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
