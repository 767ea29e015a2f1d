//! Process command

use super::read_document;
use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use docpilot_core::{DocumentProcessor, Orchestrator};
use std::path::Path;
use std::sync::Arc;

pub async fn run(orchestrator: Orchestrator, file: &Path, format: OutputFormat) -> Result<()> {
    let content = read_document(file)?;
    let processor = DocumentProcessor::new(Arc::new(orchestrator));

    let processed = processor.process(&content).await?;
    print!("{}", output::format_processed(&processed, format));

    Ok(())
}
