use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

// Import from our modular crates
use outlander_azure::{AzureConfig, ChatClient, EmbeddingsClient, SearchClient, http_client};
use outlander_cli::{
    EvalOptions, display_banner, load_dataset, print_summary, read_question, run_evaluation,
};
use outlander_core::ChatTurn;
use outlander_rag::{Copilot, Responder, Retriever};

#[derive(Parser)]
#[command(name = "outlander")]
#[command(about = "RAG copilot for the Outlander Gear Co. product catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// Natural-language question about the catalog
        question: String,
    },
    /// Start an interactive chat session
    Chat,
    /// Run batch evaluation over a JSONL dataset
    Eval {
        /// Path to the newline-delimited JSON dataset
        dataset: PathBuf,
        /// Directory for the timestamped results file
        #[arg(long, default_value = "evaluation/results")]
        out_dir: PathBuf,
    },
}

type AzureCopilot = Copilot<EmbeddingsClient, SearchClient, ChatClient>;

fn build_copilot() -> Result<AzureCopilot> {
    let config = AzureConfig::from_env()?;
    let http = http_client()?;

    let retriever = Retriever::new(
        EmbeddingsClient::new(http.clone(), config.embeddings),
        SearchClient::new(http.clone(), config.search),
    );
    let responder = Responder::new(ChatClient::new(http, config.chat));

    Ok(Copilot::new(retriever, responder))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let copilot = build_copilot()?;

    match cli.command {
        Commands::Ask { question } => {
            let answer = copilot.answer(&question, &[]).await?;
            println!("{answer}");
        }
        Commands::Chat => run_chat(&copilot).await?,
        Commands::Eval { dataset, out_dir } => {
            let cases = load_dataset(&dataset)?;
            println!("Found {} test questions", cases.len());

            let options = EvalOptions {
                out_dir,
                ..EvalOptions::default()
            };
            let (summary, results_file) = run_evaluation(&copilot, &cases, &options).await?;
            print_summary(&summary, &results_file);
        }
    }

    Ok(())
}

async fn run_chat(copilot: &AzureCopilot) -> Result<()> {
    display_banner();

    let mut input_history = Vec::new();
    let mut turns: Vec<ChatTurn> = Vec::new();

    loop {
        let Some(question) = read_question(&mut input_history).await? else {
            break;
        };

        if question.is_empty() {
            continue;
        }

        let lowered = question.to_lowercase();
        if lowered == "exit" || lowered == "quit" {
            println!("{}", "Goodbye!".green());
            break;
        }

        match copilot.answer(&question, &turns).await {
            Ok(answer) => {
                println!("\n{answer}\n");
                turns.push(ChatTurn { question, answer });
                // keep only the last 2 exchanges for continuity
                if turns.len() > 2 {
                    turns.drain(..turns.len() - 2);
                }
            }
            Err(e) => println!("{} {e}", "Error:".red()),
        }
    }

    Ok(())
}
