//! Classify a backend response into chart series

use super::CliError;
use crate::{
    chart::{ChartOptions, Palette, analyze_with},
    response::{QueryOutcome, parse_response},
};

/// Options for the chart command
#[derive(Debug, Clone, Default)]
pub struct ChartCommandOptions {
    /// Backend response or bare row array
    pub input: Option<String>,
    pub chart: ChartOptions,
    /// Seed for pie slice colors; no colors are emitted without one
    pub color_seed: Option<u64>,
}

/// Run the classifier over a response body and return the series as JSON.
///
/// A response the backend marked as failed becomes [`CliError::QueryFailed`].
pub fn execute_chart(options: &ChartCommandOptions) -> Result<serde_json::Value, CliError> {
    let body = options.input.as_ref().ok_or(CliError::NoInput)?;

    let set = match parse_response(body)? {
        QueryOutcome::Rows(set) => set,
        QueryOutcome::Failed { message } => return Err(CliError::QueryFailed(message)),
    };

    let series = analyze_with(&set.rows, &set.keys, &options.chart);
    let mut output = serde_json::to_value(&series)?;

    if let (Some(seed), Some(pie)) = (options.color_seed, &series.pie)
        && let serde_json::Value::Object(map) = &mut output
    {
        let colors = Palette::seeded(seed).colors(pie.data.len());
        map.insert("colors".to_string(), serde_json::to_value(colors)?);
    }

    Ok(output)
}
