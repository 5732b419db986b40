use anyhow::{Context, Result};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

use crate::error::PickerError;

/// How a tool's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// stdin closed, stdout and stderr piped back for parsing.
    Captured,
    /// stdin and stderr stay on the controlling terminal, stdout is piped.
    InteractiveTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: LaunchMode,
}

impl Invocation {
    pub fn captured<S: AsRef<str>>(program: &str, args: &[S]) -> Self {
        Self::new(program, args, LaunchMode::Captured)
    }

    pub fn interactive<S: AsRef<str>>(program: &str, args: &[S]) -> Self {
        Self::new(program, args, LaunchMode::InteractiveTerminal)
    }

    fn new<S: AsRef<str>>(program: &str, args: &[S], mode: LaunchMode) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            mode,
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What a terminal-attached session left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
}

impl InteractiveOutput {
    fn from_status(status: ExitStatus, stdout: String) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
            stdout,
        }
    }
}

pub trait Runner {
    /// Run to completion and return stdout. A non-zero exit is a
    /// `PickerError::ExternalTool`.
    fn capture(&self, invocation: &Invocation) -> Result<String>;

    /// Run attached to the terminal. When `feed` is given, its stdout becomes
    /// the stdin of `invocation`, like `feed | invocation` in a shell. A
    /// non-zero exit is reported in the output, not as an error.
    fn interactive(
        &self,
        invocation: &Invocation,
        feed: Option<&Invocation>,
    ) -> Result<InteractiveOutput>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn capture(&self, invocation: &Invocation) -> Result<String> {
        debug!(command = %invocation.command_line(), "running captured");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| PickerError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        debug!(status = %output.status, "captured run finished");
        if !output.status.success() {
            return Err(PickerError::ExternalTool {
                program: invocation.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("{} output was not valid UTF-8", invocation.program))
    }

    fn interactive(
        &self,
        invocation: &Invocation,
        feed: Option<&Invocation>,
    ) -> Result<InteractiveOutput> {
        match feed {
            None => {
                debug!(command = %invocation.command_line(), "running interactive");
                let child = spawn_interactive(invocation, Stdio::inherit())?;
                let (status, stdout) = collect_stdout(child, &invocation.program)?;
                debug!(%status, "interactive run finished");
                Ok(InteractiveOutput::from_status(status, stdout))
            }
            Some(source) => run_pipeline(source, invocation),
        }
    }
}

fn spawn_interactive(invocation: &Invocation, stdin: Stdio) -> Result<Child> {
    Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| {
            PickerError::Spawn {
                program: invocation.program.clone(),
                source,
            }
            .into()
        })
}

fn run_pipeline(source: &Invocation, sink: &Invocation) -> Result<InteractiveOutput> {
    debug!(
        source = %source.command_line(),
        sink = %sink.command_line(),
        "running pipeline"
    );
    let mut upstream = Command::new(&source.program)
        .args(&source.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| PickerError::Spawn {
            program: source.program.clone(),
            source: e,
        })?;

    // The command owning the pipe's read end is a temporary, so the only
    // remaining reader after spawn is the downstream process.
    let sink_stdin = match upstream.stdout.take() {
        Some(pipe) => Stdio::from(pipe),
        None => Stdio::null(),
    };
    let downstream = match spawn_interactive(sink, sink_stdin) {
        Ok(child) => child,
        Err(e) => {
            reap(&mut upstream);
            return Err(e);
        }
    };

    let collected = collect_stdout(downstream, &sink.program);
    let upstream_status = upstream
        .wait()
        .with_context(|| format!("failed to wait for {}", source.program))?;
    debug!(status = %upstream_status, "pipeline source finished");

    let (status, stdout) = collected?;
    debug!(%status, "pipeline sink finished");
    Ok(InteractiveOutput::from_status(status, stdout))
}

/// Drain the child's stdout and wait for it. The child is waited on even
/// when reading fails.
fn collect_stdout(mut child: Child, program: &str) -> Result<(ExitStatus, String)> {
    let mut stdout = String::new();
    let read = match child.stdout.take() {
        Some(mut pipe) => pipe.read_to_string(&mut stdout).map(|_| ()),
        None => Ok(()),
    };

    if read.is_err() {
        let _ = child.kill();
    }
    let status = child
        .wait()
        .with_context(|| format!("failed to wait for {}", program))?;
    read.with_context(|| format!("failed to read output of {}", program))?;

    Ok((status, stdout))
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
