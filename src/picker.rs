use anyhow::Result;
use serde::Serialize;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ToolsConfig;
use crate::paths::absolutize;
use crate::process::{Invocation, Runner};

/// Outcome of one lookup or pick. Never stored past the command that made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Selection {
    Directory { path: PathBuf },
    File { path: PathBuf },
    NoResult,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// The picker enumerates entries itself.
    AllEntries,
    /// The ranker's directory list is piped into the picker.
    DirectoriesOnly,
}

pub struct DirectoryPicker<R: Runner> {
    runner: R,
    tools: ToolsConfig,
    cwd: PathBuf,
}

impl<R: Runner> DirectoryPicker<R> {
    /// `cwd` anchors relative paths printed by the picker.
    pub fn new(runner: R, tools: ToolsConfig, cwd: PathBuf) -> Self {
        debug_assert!(cwd.is_absolute(), "cwd must be absolute");
        Self { runner, tools, cwd }
    }

    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Directories matching `terms`, best match first.
    pub fn ranked_lookup<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<PathBuf>> {
        let invocation = self.ranker_invocation(terms);
        let stdout = self.runner.capture(&invocation)?;
        let dirs = parse_ranked(&stdout);
        debug!(count = dirs.len(), "ranked lookup parsed");
        Ok(dirs)
    }

    pub fn ranked_lookup_default<S: AsRef<str>>(&self, terms: &[S]) -> Result<Selection> {
        let selection = match self.ranked_lookup(terms)?.into_iter().next() {
            Some(path) => Selection::Directory { path },
            None => Selection::NoResult,
        };
        Ok(selection)
    }

    /// Completion candidates `prefix + path`. Nothing runs until the
    /// candidates are first iterated.
    pub fn ranked_lookup_candidates<S: AsRef<str>>(
        &self,
        prefix: &str,
        terms: &[S],
    ) -> Candidates<'_, R> {
        Candidates {
            picker: self,
            prefix: prefix.to_string(),
            terms: terms.iter().map(|t| t.as_ref().to_string()).collect(),
            paths: OnceCell::new(),
        }
    }

    /// Block on the fuzzy picker until the user confirms or aborts.
    pub fn interactive_pick(&self, mode: PickMode) -> Result<Selection> {
        let picker = Invocation::interactive(&self.tools.picker, &self.tools.picker_args);
        let feed = match mode {
            PickMode::AllEntries => None,
            PickMode::DirectoriesOnly => Some(self.ranker_invocation::<&str>(&[])),
        };

        let output = self.runner.interactive(&picker, feed.as_ref())?;
        if !output.success {
            debug!(code = ?output.code, "pick cancelled");
            return Ok(Selection::Cancelled);
        }

        let line = output
            .stdout
            .lines()
            .next()
            .map(|l| l.trim_end_matches('\r'))
            .unwrap_or("");
        if line.trim().is_empty() {
            return Ok(Selection::NoResult);
        }

        Ok(classify(absolutize(&self.cwd, Path::new(line))))
    }

    fn ranker_invocation<S: AsRef<str>>(&self, terms: &[S]) -> Invocation {
        let args: Vec<&str> = self
            .tools
            .ranker_args
            .iter()
            .map(String::as_str)
            .chain(terms.iter().map(|t| t.as_ref()))
            .collect();
        Invocation::captured(&self.tools.ranker, &args)
    }
}

/// The ranker prints ascending relevance; the result is reversed so the best
/// match comes first.
pub fn parse_ranked(output: &str) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = output
        .trim()
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(PathBuf::from)
        .collect();
    dirs.reverse();
    dirs
}

fn classify(path: PathBuf) -> Selection {
    if path.is_dir() {
        Selection::Directory { path }
    } else {
        Selection::File { path }
    }
}

/// Lazily computed, replayable completion list. The ranker runs at most once
/// per successful lookup; later iterations reuse the cached paths.
pub struct Candidates<'a, R: Runner> {
    picker: &'a DirectoryPicker<R>,
    prefix: String,
    terms: Vec<String>,
    paths: OnceCell<Vec<PathBuf>>,
}

impl<R: Runner> Candidates<'_, R> {
    pub fn try_iter(&self) -> Result<impl Iterator<Item = String> + '_> {
        let prefix = self.prefix.as_str();
        let paths = self.paths()?;
        Ok(paths
            .iter()
            .map(move |path| format!("{}{}", prefix, path.display())))
    }

    #[cfg(test)]
    pub fn is_resolved(&self) -> bool {
        self.paths.get().is_some()
    }

    fn paths(&self) -> Result<&[PathBuf]> {
        if let Some(paths) = self.paths.get() {
            return Ok(paths);
        }
        let paths = self.picker.ranked_lookup(&self.terms)?;
        Ok(self.paths.get_or_init(|| paths))
    }
}
