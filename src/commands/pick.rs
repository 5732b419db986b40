use anyhow::Result;
use serde::Serialize;

use crate::host::{dispatch, Host, Severity};
use crate::picker::{DirectoryPicker, PickMode, Selection};
use crate::process::Runner;

#[derive(Debug, Serialize)]
pub struct PickResult {
    pub mode: PickMode,
    pub selection: Selection,
    pub dispatched: bool,
}

/// Run the fuzzy picker and hand the choice to the host: directories are
/// entered, anything else is selected.
pub fn cmd_pick<R: Runner>(
    picker: &DirectoryPicker<R>,
    host: &mut dyn Host,
    mode: PickMode,
) -> Result<PickResult> {
    let selection = picker.interactive_pick(mode)?;
    let dispatched = dispatch(&selection, host);
    if selection == Selection::NoResult {
        host.notify("Nothing selected", Severity::Info);
    }
    Ok(PickResult {
        mode,
        selection,
        dispatched,
    })
}

pub fn format_pick_human(_result: &PickResult) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use crate::host::{HostAction, RecordingHost};
    use crate::testutil::FakeRunner;
    use std::path::PathBuf;

    fn picker(runner: FakeRunner) -> DirectoryPicker<FakeRunner> {
        DirectoryPicker::new(runner, ToolsConfig::default(), PathBuf::from("/work"))
    }

    #[test]
    fn cmd_pick_file_selects_file() {
        let p = picker(FakeRunner::picked("/home/user/notes.txt\n"));
        let mut host = RecordingHost::default();
        let result = cmd_pick(&p, &mut host, PickMode::AllEntries).unwrap();
        assert!(result.dispatched);
        assert_eq!(
            host.actions,
            vec![HostAction::SelectFile {
                path: PathBuf::from("/home/user/notes.txt")
            }]
        );
    }

    #[test]
    fn cmd_pick_directory_navigates() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        std::fs::create_dir(&projects).unwrap();

        let p = picker(FakeRunner::picked(&format!("{}\n", projects.display())));
        let mut host = RecordingHost::default();
        let result = cmd_pick(&p, &mut host, PickMode::DirectoriesOnly).unwrap();
        assert_eq!(result.mode, PickMode::DirectoriesOnly);
        assert_eq!(host.actions, vec![HostAction::Cd { path: projects }]);
    }

    #[test]
    fn cmd_pick_empty_confirmation_is_an_info_notice() {
        let p = picker(FakeRunner::picked("\n"));
        let mut host = RecordingHost::default();
        let result = cmd_pick(&p, &mut host, PickMode::AllEntries).unwrap();
        assert_eq!(result.selection, Selection::NoResult);
        assert!(!result.dispatched);
        assert_eq!(
            host.actions,
            vec![HostAction::Notify {
                message: "Nothing selected".to_string(),
                severity: Severity::Info,
            }]
        );
    }

    #[test]
    fn cmd_pick_cancel_touches_nothing() {
        for mode in [PickMode::AllEntries, PickMode::DirectoriesOnly] {
            let p = picker(FakeRunner::cancelled(130));
            let mut host = RecordingHost::default();
            let result = cmd_pick(&p, &mut host, mode).unwrap();
            assert_eq!(result.selection, Selection::Cancelled);
            assert!(!result.dispatched);
            assert!(host.actions.is_empty());
        }
    }
}
