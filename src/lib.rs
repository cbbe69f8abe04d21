//! cardseg: Credit Card Customer Segmentation Library
//!
//! A fitted preprocessing pipeline (imputation, purchase reconciliation and
//! monetary aggregation) that feeds a cluster model, plus the reference
//! descriptions of each customer segment.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
