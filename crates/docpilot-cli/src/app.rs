//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docpilot")]
#[command(
    author,
    version,
    about = "AI summaries, tags and answers for plain-text documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a document
    Summarize(DocumentArgs),

    /// Generate topic tags for a document
    Tag(DocumentArgs),

    /// Ask a question about a document
    Query(QueryArgs),

    /// Summarize, tag and analyze a document in one pass
    Process(DocumentArgs),

    /// List configured providers in fallback order
    Providers,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Plain-text document
    pub file: PathBuf,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Plain-text document
    pub file: PathBuf,

    /// Question, may span several words
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl QueryArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
