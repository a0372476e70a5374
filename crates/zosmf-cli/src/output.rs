//! Output formatting for CLI results.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Print a serializable result in the requested format.
///
/// JSON mode pretty-prints the full structure; human mode prints only the
/// supplied summary text.
pub fn display<T: Serialize>(format: OutputFormat, value: &T, summary: &str) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Human => {
            if !summary.is_empty() {
                println!("{summary}");
            }
        }
    }
    Ok(())
}
