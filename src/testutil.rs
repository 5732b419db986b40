#![cfg(test)]

use anyhow::Result;
use std::cell::RefCell;
use tempfile::TempDir;

use crate::error::PickerError;
use crate::process::{InteractiveOutput, Invocation, Runner};

enum CaptureReply {
    Stdout(String),
    Failure { code: i32, stderr: String },
}

/// Scripted stand-in for the external tools. Every invocation is recorded.
pub struct FakeRunner {
    capture: CaptureReply,
    interactive: InteractiveOutput,
    calls: RefCell<Vec<Invocation>>,
    feeds: RefCell<Vec<Option<Invocation>>>,
}

impl FakeRunner {
    fn new(capture: CaptureReply, interactive: InteractiveOutput) -> Self {
        Self {
            capture,
            interactive,
            calls: RefCell::new(Vec::new()),
            feeds: RefCell::new(Vec::new()),
        }
    }

    /// The ranker prints `stdout` and exits 0.
    pub fn ranked(stdout: &str) -> Self {
        Self::new(CaptureReply::Stdout(stdout.to_string()), cancelled_output(1))
    }

    /// The ranker fails with `code`.
    pub fn failing(code: i32, stderr: &str) -> Self {
        Self::new(
            CaptureReply::Failure {
                code,
                stderr: stderr.to_string(),
            },
            cancelled_output(1),
        )
    }

    /// The picker confirms and prints `stdout`.
    pub fn picked(stdout: &str) -> Self {
        Self::new(
            CaptureReply::Stdout(String::new()),
            InteractiveOutput {
                success: true,
                code: Some(0),
                stdout: stdout.to_string(),
            },
        )
    }

    /// The picker is aborted with `code`.
    pub fn cancelled(code: i32) -> Self {
        Self::new(CaptureReply::Stdout(String::new()), cancelled_output(code))
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn feeds(&self) -> Vec<Option<Invocation>> {
        self.feeds.borrow().clone()
    }
}

fn cancelled_output(code: i32) -> InteractiveOutput {
    InteractiveOutput {
        success: false,
        code: Some(code),
        stdout: String::new(),
    }
}

impl Runner for FakeRunner {
    fn capture(&self, invocation: &Invocation) -> Result<String> {
        self.calls.borrow_mut().push(invocation.clone());
        match &self.capture {
            CaptureReply::Stdout(stdout) => Ok(stdout.clone()),
            CaptureReply::Failure { code, stderr } => Err(PickerError::ExternalTool {
                program: invocation.program.clone(),
                code: Some(*code),
                stderr: stderr.clone(),
            }
            .into()),
        }
    }

    fn interactive(
        &self,
        invocation: &Invocation,
        feed: Option<&Invocation>,
    ) -> Result<InteractiveOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        self.feeds.borrow_mut().push(feed.cloned());
        Ok(self.interactive.clone())
    }
}

/// Temp directory of executable shell scripts posing as external tools.
pub struct ToolDir {
    dir: TempDir,
}

impl ToolDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Write an executable `/bin/sh` script and return its path.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.display().to_string()
    }
}
