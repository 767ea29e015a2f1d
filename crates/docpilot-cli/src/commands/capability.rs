//! Summarize, tag and query commands

use super::read_document;
use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use docpilot_core::{CapabilityRequest, Orchestrator};
use std::path::Path;

pub async fn run(
    orchestrator: &Orchestrator,
    file: &Path,
    request: CapabilityRequest,
    format: OutputFormat,
) -> Result<()> {
    let content = read_document(file)?;
    let result = orchestrator.execute(&content, &request).await;

    print!("{}", output::format_result(&result, format));

    result.into_result()?;
    Ok(())
}
