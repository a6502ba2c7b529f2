//! Batch evaluation runner over a JSONL dataset

use chrono::Local;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use outlander_core::{ChatModel, ChatTurn, Embedder, Error, Result, SearchIndex};
use outlander_rag::Copilot;

/// One dataset record: a question with its expected answer and optional
/// conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub question: String,
    pub expected_answer: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Outcome of one case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Success,
    Error,
}

/// Per-case record written to the results file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub test_number: usize,
    pub question: String,
    pub expected_answer: String,
    pub actual_answer: String,
    pub context_retrieved: String,
    pub status: CaseStatus,
}

/// Run summary written to the results file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub timestamp: String,
    pub total_questions: usize,
    pub successful: usize,
    pub failed: usize,
    pub success_rate: String,
    pub results: Vec<CaseResult>,
}

/// Runner settings
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Directory the timestamped results file is written to
    pub out_dir: PathBuf,
    /// Pause between cases, to stay under service rate limits
    pub pause: Duration,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("evaluation/results"),
            pause: Duration::from_secs(2),
        }
    }
}

/// Load a newline-delimited JSON dataset, skipping blank lines
pub fn load_dataset(path: &Path) -> Result<Vec<EvalCase>> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Dataset(format!("cannot read {}: {e}", path.display())))?;

    let mut cases = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let case = serde_json::from_str(line)
            .map_err(|e| Error::Dataset(format!("line {}: {e}", number + 1)))?;
        cases.push(case);
    }
    Ok(cases)
}

/// Run the pipeline over every case, write a timestamped results file, and
/// return the summary with the file path
pub async fn run_evaluation<E, S, C>(
    copilot: &Copilot<E, S, C>,
    cases: &[EvalCase],
    options: &EvalOptions,
) -> Result<(EvalSummary, PathBuf)>
where
    E: Embedder,
    S: SearchIndex,
    C: ChatModel,
{
    if cases.is_empty() {
        return Err(Error::Dataset("dataset contains no cases".to_string()));
    }

    let mut results = Vec::with_capacity(cases.len());
    let mut successful = 0;
    let mut failed = 0;

    for (i, case) in cases.iter().enumerate() {
        let number = i + 1;
        println!("\n{}", format!("TEST {number}/{}", cases.len()).bold());
        println!("{} {}", "Question:".cyan(), case.question);

        match copilot.answer_with_context(&case.question, &case.history).await {
            Ok(exchange) => {
                println!("{} {}", "Answer:".green(), exchange.answer);
                results.push(CaseResult {
                    test_number: number,
                    question: case.question.clone(),
                    expected_answer: case.expected_answer.clone(),
                    actual_answer: exchange.answer,
                    context_retrieved: exchange.context,
                    status: CaseStatus::Success,
                });
                successful += 1;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red());
                results.push(CaseResult {
                    test_number: number,
                    question: case.question.clone(),
                    expected_answer: case.expected_answer.clone(),
                    actual_answer: format!("ERROR: {e}"),
                    context_retrieved: String::new(),
                    status: CaseStatus::Error,
                });
                failed += 1;
            }
        }

        if number < cases.len() && !options.pause.is_zero() {
            tokio::time::sleep(options.pause).await;
        }
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let summary = EvalSummary {
        timestamp: timestamp.clone(),
        total_questions: cases.len(),
        successful,
        failed,
        success_rate: format!("{:.1}%", successful as f64 / cases.len() as f64 * 100.0),
        results,
    };

    fs::create_dir_all(&options.out_dir)?;
    let results_file = options
        .out_dir
        .join(format!("outlander_evaluation_{timestamp}.json"));
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    fs::write(&results_file, json)?;

    Ok((summary, results_file))
}

/// Print the run summary with a few sample results
pub fn print_summary(summary: &EvalSummary, results_file: &Path) {
    println!("\n{}", "EVALUATION SUMMARY".bold());
    println!("Total questions: {}", summary.total_questions);
    println!("{} {}", "Successful:".green(), summary.successful);
    println!("{} {}", "Failed:".red(), summary.failed);
    println!("Success rate: {}", summary.success_rate.bold());
    println!("Results saved to: {}", results_file.display());

    if !summary.results.is_empty() {
        println!("\n{}", "Sample results:".bold());
        for result in summary.results.iter().take(3) {
            println!(
                "  {} {}",
                format!("[{}]", result.test_number).cyan(),
                result.question
            );
            println!("      expected: {}", preview(&result.expected_answer));
            println!("      actual:   {}", preview(&result.actual_answer));
        }
    }
}

fn preview(text: &str) -> String {
    let mut cut: String = text.chars().take(80).collect();
    if text.chars().count() > 80 {
        cut.push_str("...");
    }
    cut
}
