//! Providers command

use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use docpilot_core::Orchestrator;

pub fn run(orchestrator: &Orchestrator, format: OutputFormat) -> Result<()> {
    let descriptors = orchestrator.descriptors();
    print!("{}", output::format_providers(&descriptors, format));
    Ok(())
}
