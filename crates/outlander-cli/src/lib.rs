//! CLI layer for the Outlander copilot
//!
//! Console helpers for the interactive session and the batch evaluation
//! runner. The pipeline crates stay print-free; all user-facing output
//! happens here or in the binary.

mod eval;
mod ui;

pub use eval::{
    CaseResult, CaseStatus, EvalCase, EvalOptions, EvalSummary, load_dataset, print_summary,
    run_evaluation,
};
pub use ui::{display_banner, read_question};

// Re-export core types
pub use outlander_core::{Error, Result};
