//! The callback surface a file manager exposes to the commands.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::picker::Selection;
use crate::shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Bad,
}

pub trait Host {
    fn navigate_to_directory(&mut self, path: &Path);
    fn select_file(&mut self, path: &Path);
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Hand a selection to the matching callback. Returns whether one ran.
pub fn dispatch(selection: &Selection, host: &mut dyn Host) -> bool {
    match selection {
        Selection::Directory { path } => {
            host.navigate_to_directory(path);
            true
        }
        Selection::File { path } => {
            host.select_file(path);
            true
        }
        Selection::NoResult | Selection::Cancelled => false,
    }
}

/// Talks to the wrapping shell function: navigation becomes payload lines on
/// stdout, notifications go to stderr.
#[derive(Debug, Default)]
pub struct ShellHost;

impl Host for ShellHost {
    fn navigate_to_directory(&mut self, path: &Path) {
        println!("{}", shell::cd_payload(path));
    }

    fn select_file(&mut self, path: &Path) {
        println!("{}", shell::select_payload(path));
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => eprintln!("{}", message),
            Severity::Bad => eprintln!("warning: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostAction {
    Cd { path: PathBuf },
    SelectFile { path: PathBuf },
    Notify { message: String, severity: Severity },
}

/// Keeps every callback in order instead of acting on it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub actions: Vec<HostAction>,
}

impl Host for RecordingHost {
    fn navigate_to_directory(&mut self, path: &Path) {
        self.actions.push(HostAction::Cd {
            path: path.to_path_buf(),
        });
    }

    fn select_file(&mut self, path: &Path) {
        self.actions.push(HostAction::SelectFile {
            path: path.to_path_buf(),
        });
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.actions.push(HostAction::Notify {
            message: message.to_string(),
            severity,
        });
    }
}
