mod cli;
mod cmdline;
mod commands;
mod config;
mod error;
mod host;
mod paths;
mod picker;
mod process;
mod shell;
mod testutil;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use host::{Host, HostAction, RecordingHost, ShellHost};
use picker::{DirectoryPicker, PickMode};
use process::SystemRunner;
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { shell: kind } => {
            print!("{}", shell::init_script(kind));
        }
        Command::ConfigPath => {
            println!("{}", config::default_config_path()?.display());
        }
        Command::Z { terms } => {
            let picker = load_picker(cli.config.as_deref())?;
            let (result, actions) =
                with_host(cli.json, |host| commands::cmd_jump(&picker, host, &terms))?;
            let failed = result.failed;
            output(&result, cli.json, &actions, commands::format_jump_human)?;
            if failed {
                std::process::exit(1);
            }
        }
        Command::Complete { line } => {
            let picker = load_picker(cli.config.as_deref())?;
            let result = commands::cmd_complete(&picker, &line)?;
            output(&result, cli.json, &[], commands::format_complete_human)?;
        }
        Command::ZDir => {
            let picker = load_picker(cli.config.as_deref())?;
            let (result, actions) = with_host(cli.json, |host| {
                commands::cmd_pick(&picker, host, PickMode::DirectoriesOnly)
            })?;
            output(&result, cli.json, &actions, commands::format_pick_human)?;
        }
        Command::Fzf { dirs } => {
            let picker = load_picker(cli.config.as_deref())?;
            let mode = if dirs {
                PickMode::DirectoriesOnly
            } else {
                PickMode::AllEntries
            };
            let (result, actions) =
                with_host(cli.json, |host| commands::cmd_pick(&picker, host, mode))?;
            output(&result, cli.json, &actions, commands::format_pick_human)?;
        }
    }
    Ok(())
}

fn load_picker(config_path: Option<&Path>) -> Result<DirectoryPicker<SystemRunner>> {
    let config = config::load_config_or_default(config_path)?;
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    Ok(DirectoryPicker::new(SystemRunner, config.tools, cwd))
}

/// With --json, host callbacks are recorded and reported instead of being
/// emitted as payload lines for the shell wrapper.
fn with_host<T>(
    json: bool,
    f: impl FnOnce(&mut dyn Host) -> Result<T>,
) -> Result<(T, Vec<HostAction>)> {
    if json {
        let mut recorder = RecordingHost::default();
        let result = f(&mut recorder)?;
        Ok((result, recorder.actions))
    } else {
        Ok((f(&mut ShellHost)?, Vec::new()))
    }
}

fn output<T: serde::Serialize>(
    result: &T,
    json: bool,
    actions: &[HostAction],
    human_fn: fn(&T) -> String,
) -> Result<()> {
    if json {
        let report = serde_json::json!({ "result": result, "actions": actions });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let text = human_fn(result);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}
