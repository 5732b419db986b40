use anyhow::Result;
use serde::Serialize;

use crate::error::PickerError;
use crate::host::{dispatch, Host, Severity};
use crate::picker::{DirectoryPicker, Selection};
use crate::process::Runner;

#[derive(Debug, Serialize)]
pub struct JumpResult {
    pub terms: Vec<String>,
    /// `None` when there was nothing to look up or the ranker failed.
    pub selection: Option<Selection>,
    pub failed: bool,
}

/// Jump to the best ranked directory for `terms`. A failing ranker is
/// reported to the host and flagged in the result.
pub fn cmd_jump<R: Runner>(
    picker: &DirectoryPicker<R>,
    host: &mut dyn Host,
    terms: &[String],
) -> Result<JumpResult> {
    if terms.is_empty() {
        return Ok(JumpResult {
            terms: Vec::new(),
            selection: None,
            failed: false,
        });
    }

    let selection = match picker.ranked_lookup_default(terms) {
        Ok(selection) => selection,
        Err(e) => match e.downcast_ref::<PickerError>() {
            Some(tool_err) => {
                host.notify(
                    &failure_message(&picker.tools().ranker, tool_err),
                    Severity::Bad,
                );
                return Ok(JumpResult {
                    terms: terms.to_vec(),
                    selection: None,
                    failed: true,
                });
            }
            None => return Err(e),
        },
    };

    if selection == Selection::NoResult {
        host.notify(
            &format!("No results from {}", picker.tools().ranker),
            Severity::Bad,
        );
    } else {
        dispatch(&selection, host);
    }

    Ok(JumpResult {
        terms: terms.to_vec(),
        selection: Some(selection),
        failed: false,
    })
}

fn failure_message(ranker: &str, err: &PickerError) -> String {
    match err {
        PickerError::ExternalTool { .. } => format!(
            "{} failed (exit code: {}): {}",
            ranker,
            err.exit_code()
                .map_or("signal".to_string(), |c| c.to_string()),
            err.stderr().trim()
        ),
        PickerError::Spawn { source, .. } => format!("failed to run {}: {}", ranker, source),
    }
}

pub fn format_jump_human(result: &JumpResult) -> String {
    match result.selection {
        None if !result.failed => "usage: z <term>...".to_string(),
        _ => String::new(),
    }
}
