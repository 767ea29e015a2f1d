//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use docpilot_core::{CapabilityResult, ProcessedDocument, ProviderDescriptor};

/// Format a single capability result
pub fn format_result(result: &CapabilityResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(result),
        OutputFormat::Cli => terminal::format_result(result),
    }
}

/// Format a fully processed document
pub fn format_processed(processed: &ProcessedDocument, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(processed),
        OutputFormat::Cli => terminal::format_processed(processed),
    }
}

/// Format the provider listing
pub fn format_providers(descriptors: &[ProviderDescriptor], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(descriptors),
        OutputFormat::Cli => terminal::format_providers(descriptors),
    }
}
