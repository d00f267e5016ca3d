//! Summarize a bundle status report

use serde_json::json;

use super::CliError;
use crate::upload::BundleStatus;

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusCommandOptions {
    /// Bundle status JSON from the indexing backend
    pub input: Option<String>,
}

pub fn execute_status(options: &StatusCommandOptions) -> Result<serde_json::Value, CliError> {
    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let bundle: BundleStatus = serde_json::from_str(json)?;
    let progress = bundle.progress();

    let failures: Vec<_> = bundle
        .failed_tasks()
        .map(|t| json!({ "fileName": t.file_name, "error": t.error }))
        .collect();

    Ok(json!({
        "bundleId": bundle.bundle_id,
        "status": bundle.status,
        "finished": bundle.is_terminal(),
        "percentComplete": progress.percent_complete(),
        "progress": progress,
        "failures": failures,
    }))
}
