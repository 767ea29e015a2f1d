//! CLI command handlers

pub mod capability;
pub mod process;
pub mod providers;

use docpilot_core::DocpilotError;
use std::path::Path;

/// Read a plain-text document, mapping failures to invalid input
pub fn read_document(path: &Path) -> Result<String, DocpilotError> {
    std::fs::read_to_string(path).map_err(|e| {
        DocpilotError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })
}
