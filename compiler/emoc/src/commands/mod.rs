//! Driver commands and the errors they report.

mod repl;
mod run;

pub use repl::repl;
pub use run::{run_file, run_source};

use std::io;

use tracing::debug;

pub const USAGE: &str = "\
usage: emo <action> [...]

actions:
  run <file.emo>   parse and evaluate a script
  repl             start an interactive session";

/// Failures of the driver itself, as opposed to failures of the script.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{}", USAGE)]
    Usage,
    #[error("unknown action `{action}`\n\n{}", USAGE)]
    UnknownAction { action: String },
    #[error("usage: emo run <file.emo>")]
    MissingFile,
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How a command finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// The script had syntax errors and was not evaluated.
    ParseFailed,
    /// Evaluation ended with a runtime error.
    RuntimeError,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::ParseFailed | RunStatus::RuntimeError => 1,
        }
    }
}

/// Dispatch on `args` as received by `main` (program name first).
pub fn dispatch(args: &[String]) -> Result<RunStatus, CommandError> {
    let Some(action) = args.get(1) else {
        return Err(CommandError::Usage);
    };
    debug!(%action, "dispatch");

    match action.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                return Err(CommandError::MissingFile);
            };
            run_file(path)
        }
        "repl" => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            repl(&mut stdin.lock(), &mut stdout.lock())?;
            Ok(RunStatus::Success)
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(RunStatus::Success)
        }
        other => Err(CommandError::UnknownAction {
            action: other.to_string(),
        }),
    }
}

/// Read a script, mapping common I/O failures to readable messages.
pub(crate) fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|error| {
        let path = path.to_string();
        match error.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound { path },
            io::ErrorKind::PermissionDenied => CommandError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CommandError::InvalidUtf8 { path },
            _ => CommandError::Read {
                path,
                source: error,
            },
        }
    })
}
