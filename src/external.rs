use crate::error::ShellError;
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, Stdio};

/// Exit status the system shell uses for "command not found".
const NOT_FOUND_STATUS: i32 = 127;

/// Characters that make an argument unsafe to pass to `sh -c` unquoted.
/// `#` starts a comment at the beginning of a word.
const METACHARACTERS: &str = "\"'$`\\*?[](){};<>|&!~#";

/// How an external command terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

/// Captured output of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub termination: Termination,
}

impl ExecutionResult {
    pub fn is_not_found(&self) -> bool {
        self.termination == Termination::Exited(NOT_FOUND_STATUS)
    }

    pub fn success(&self) -> bool {
        self.termination == Termination::Exited(0)
    }

    /// Exit status as a shell would report it (`128 + signal` for signals).
    pub fn status_code(&self) -> i32 {
        match self.termination {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }

    /// Writes the captured streams to the terminal.
    ///
    /// Stdout loses its trailing newline before being printed on its own
    /// line; stderr is copied verbatim. A "not found" result is replaced by
    /// `<command>: command not found`.
    pub fn report<W: Write, E: Write>(
        &self,
        command: &str,
        stdout: &mut W,
        stderr: &mut E,
    ) -> io::Result<()> {
        if self.is_not_found() {
            return writeln!(stderr, "{}: command not found", command);
        }

        let out = trim_line_endings(&self.stdout);
        if !out.is_empty() {
            stdout.write_all(out)?;
            stdout.write_all(b"\n")?;
        }
        if !self.stderr.is_empty() {
            stderr.write_all(&self.stderr)?;
        }
        Ok(())
    }
}

fn trim_line_endings(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| !matches!(b, b'\n' | b'\r'))
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Quotes an argument so `sh` treats it as exactly one literal word.
pub fn shell_escape(arg: &str) -> String {
    let needs_quoting = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || METACHARACTERS.contains(c));
    if !needs_quoting {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Builds the line handed to `sh -c` from a command and its arguments.
pub fn command_line<S: AsRef<str>>(command: &str, args: &[S]) -> String {
    let mut line = shell_escape(command);
    for arg in args {
        line.push(' ');
        line.push_str(&shell_escape(arg.as_ref()));
    }
    line
}

/// Runs a command line through `sh -c`, capturing stdout and stderr.
///
/// Stdin is inherited and the process sees the current environment.
pub fn run(line: &str) -> Result<ExecutionResult, ShellError> {
    tracing::debug!(line, "spawning external command");
    let output = Command::new("sh")
        .arg("-c")
        .arg(line)
        .stdin(Stdio::inherit())
        .output()
        .map_err(|source| ShellError::Spawn {
            command: line.to_string(),
            source,
        })?;

    let termination = match (output.status.code(), output.status.signal()) {
        (Some(code), _) => Termination::Exited(code),
        (None, Some(signal)) => Termination::Signaled(signal),
        (None, None) => Termination::Exited(-1),
    };

    Ok(ExecutionResult {
        stdout: output.stdout,
        stderr: output.stderr,
        termination,
    })
}
