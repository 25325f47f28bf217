//! Formatting helpers for rendering expressions and analysis reports.

pub mod analysis;
pub mod expr;

pub use analysis::{pretty_analysis, pretty_analysis_details};
pub use expr::pretty;
