use std::io;
use thiserror::Error;

/// Errors raised while running a single command line.
///
/// None of these end the session; the caller reports them and prompts again.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{command}: failed to start: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("cd: {path}: {}", describe_cd_error(.source))]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("exit: {0}: numeric argument required")]
    InvalidExitCode(String),

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
}

fn describe_cd_error(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "No such file or directory".to_string(),
        io::ErrorKind::NotADirectory => "Not a directory".to_string(),
        io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => err.to_string(),
    }
}
