pub mod assignments;
pub mod builtins;
pub mod config;
pub mod error;
pub mod external;
pub mod input;
pub mod parser;
pub mod path;
pub mod session;

#[cfg(test)]
mod test_support;

pub use builtins::Builtin;
pub use config::Config;
pub use error::ShellError;
pub use parser::tokenize;
pub use session::Shell;

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    /// The shell should continue running.
    Continue,
    /// The shell should exit with the provided code.
    Exit(i32),
}
