use thiserror::Error;

/// Failures of the external tools themselves. Everything else in the crate
/// travels as `anyhow::Error`; callers that care about the exit code recover
/// this type with `downcast_ref`.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{program} failed (exit code: {})\nstderr: {}",
        describe_code(.code),
        .stderr.trim()
    )]
    ExternalTool {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl PickerError {
    /// Exit code of the failed tool. `None` when it was killed by a signal
    /// or never started.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            PickerError::ExternalTool { code, .. } => *code,
            PickerError::Spawn { .. } => None,
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            PickerError::ExternalTool { stderr, .. } => stderr,
            PickerError::Spawn { .. } => "",
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or("signal".to_string(), |c| c.to_string())
}
