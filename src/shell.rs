//! Shell wrapper functions and the payload lines they understand.

use clap::ValueEnum;
use std::path::Path;

pub const CD_PREFIX: &str = "__FMJ_CD__=";
pub const SELECT_PREFIX: &str = "__FMJ_SELECT__=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    Bash,
    Zsh,
}

pub fn cd_payload(path: &Path) -> String {
    format!("{CD_PREFIX}{}", path.display())
}

pub fn select_payload(path: &Path) -> String {
    format!("{SELECT_PREFIX}{}", path.display())
}

pub fn init_script(shell: ShellKind) -> String {
    match shell {
        ShellKind::Bash => bash_function(),
        ShellKind::Zsh => zsh_function(),
    }
}

/// Returns the `fmj` function for `.bashrc`. A selected file moves the shell
/// to the file's directory and prints the file path.
pub fn bash_function() -> String {
    format!(
        "# {bin}: frecency jumps and fuzzy picks\n{body}",
        bin = env!("CARGO_PKG_NAME"),
        body = wrapper_body()
    )
}

/// Same function as bash; zsh accepts the syntax unchanged.
pub fn zsh_function() -> String {
    format!(
        "# {bin}: frecency jumps and fuzzy picks (zsh)\n{body}",
        bin = env!("CARGO_PKG_NAME"),
        body = wrapper_body()
    )
}

fn wrapper_body() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        r#"fmj() {{
    local __fmj_out __fmj_line __fmj_file
    __fmj_out="$(command {bin} "$@")" || return $?
    while IFS= read -r __fmj_line; do
        case "$__fmj_line" in
            {CD_PREFIX}*)
                builtin cd -- "${{__fmj_line#{CD_PREFIX}}}" ;;
            {SELECT_PREFIX}*)
                __fmj_file="${{__fmj_line#{SELECT_PREFIX}}}"
                builtin cd -- "$(dirname -- "$__fmj_file")" && printf '%s\n' "$__fmj_file" ;;
            *)
                [ -n "$__fmj_line" ] && printf '%s\n' "$__fmj_line" ;;
        esac
    done <<< "$__fmj_out"
}}
"#
    )
}
