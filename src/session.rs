use crate::ShellStatus;
use crate::assignments::{EnvOverrides, extract_assignments};
use crate::config::Config;
use crate::error::ShellError;
use crate::external;
use crate::parser::{split_command, tokenize};
use crate::path::{CommandKind, SearchPath, resolve};
use std::io::{self, Write};

/// One interactive session.
///
/// Owns the configuration and the status of the last command. The working
/// directory and environment are the process's own.
#[derive(Debug, Default)]
pub struct Shell {
    config: Config,
    last_status: i32,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Shell {
            config,
            last_status: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Exit status of the most recent command.
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Runs one line of input to completion.
    ///
    /// Leading `NAME=value` assignments are applied to the environment for
    /// the duration of the command and restored before this returns. Only
    /// `exit` produces anything other than `ShellStatus::Continue`.
    pub fn execute_line<W: Write, E: Write>(
        &mut self,
        line: &str,
        stdout: &mut W,
        stderr: &mut E,
    ) -> ShellStatus {
        let line = line.trim();
        if line.is_empty() {
            return ShellStatus::Continue;
        }

        let (assignments, rest) = extract_assignments(line);
        let _overrides = EnvOverrides::apply(&assignments);

        let Some((command, args)) = split_command(rest) else {
            return ShellStatus::Continue;
        };

        let search_path = SearchPath::from_env(&self.config.path_var);
        let kind = resolve(command, &search_path);
        tracing::debug!(
            command,
            assignments = assignments.len(),
            kind = ?kind,
            "dispatching command"
        );

        let result = match kind {
            CommandKind::Builtin(builtin) => {
                self.last_status = 0;
                builtin.execute(args, &self.config, &mut *stdout, &mut *stderr)
            }
            CommandKind::External(path) => {
                let program = path.to_string_lossy();
                self.run_external(command, &program, args, stdout, stderr)
            }
            // Names with a slash are paths and bypass the search.
            CommandKind::Unresolved if command.contains('/') => {
                self.run_external(command, command, args, stdout, stderr)
            }
            CommandKind::Unresolved => {
                self.last_status = 127;
                writeln!(stderr, "{}: command not found", command)
                    .map(|_| ShellStatus::Continue)
                    .map_err(ShellError::from)
            }
        };

        match result {
            Ok(status) => {
                if let ShellStatus::Exit(code) = status {
                    self.last_status = code;
                }
                status
            }
            Err(e) => {
                self.last_status = 1;
                if let Err(write_err) = writeln!(stderr, "{}", e) {
                    tracing::warn!(error = %write_err, "failed to write to stderr");
                }
                ShellStatus::Continue
            }
        }
    }

    /// Hands `program` and the tokenized arguments to `sh -c` and reports
    /// what it printed. `command` is the name as typed, used in messages.
    fn run_external<W: Write, E: Write>(
        &mut self,
        command: &str,
        program: &str,
        args: &str,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<ShellStatus, ShellError> {
        let line = external::command_line(program, &tokenize(args));

        match external::run(&line) {
            Ok(result) => {
                self.last_status = result.status_code();
                result.report(command, stdout, stderr)?;
            }
            Err(ShellError::Spawn { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                self.last_status = 127;
                writeln!(stderr, "{}: command not found", command)?;
            }
            Err(e) => return Err(e),
        }
        Ok(ShellStatus::Continue)
    }
}
