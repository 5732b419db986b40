use anyhow::Result;
use serde::Serialize;

use crate::cmdline::CommandLine;
use crate::picker::DirectoryPicker;
use crate::process::Runner;

#[derive(Debug, Serialize)]
pub struct CompleteResult {
    pub line: String,
    pub candidates: Vec<String>,
}

/// Tab completion for `z`: each ranked directory for the typed terms,
/// prefixed with the command word, best match first.
pub fn cmd_complete<R: Runner>(picker: &DirectoryPicker<R>, line: &str) -> Result<CompleteResult> {
    let parsed = CommandLine::parse(line);
    let terms: Vec<&str> = parsed.rest(1).split_whitespace().collect();
    let lookup = picker.ranked_lookup_candidates(&parsed.start(1), &terms);
    let candidates: Vec<String> = lookup.try_iter()?.collect();

    Ok(CompleteResult {
        line: line.to_string(),
        candidates,
    })
}

pub fn format_complete_human(result: &CompleteResult) -> String {
    result.candidates.join("\n")
}
