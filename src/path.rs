use crate::Builtin;
use std::env;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Ordered list of directories searched for external commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Splits a `PATH`-style value on the platform delimiter.
    ///
    /// Empty entries are dropped.
    pub fn parse(value: &OsStr) -> Self {
        let dirs = env::split_paths(value)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect();
        SearchPath { dirs }
    }

    /// Reads the search path from the named environment variable.
    ///
    /// An unset variable yields an empty search path.
    pub fn from_env(var: &str) -> Self {
        env::var_os(var)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Returns the first `dir/command` that is a file and executable.
    ///
    /// A same-named file without execute permission does not stop the scan.
    pub fn find_executable(&self, command: &str) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }
        for dir in &self.dirs {
            let candidate = dir.join(command);
            if is_executable(&candidate) {
                return Some(candidate);
            }
            tracing::trace!(candidate = %candidate.display(), "rejected search path candidate");
        }
        None
    }
}

/// What a command name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Builtin(Builtin),
    External(PathBuf),
    Unresolved,
}

/// Classifies a command name. Builtins take precedence over anything on
/// the search path.
pub fn resolve(command: &str, search_path: &SearchPath) -> CommandKind {
    if let Ok(builtin) = command.parse::<Builtin>() {
        return CommandKind::Builtin(builtin);
    }
    match search_path.find_executable(command) {
        Some(path) => CommandKind::External(path),
        None => CommandKind::Unresolved,
    }
}

/// Checks that `path` is a regular file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
