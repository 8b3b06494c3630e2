use crate::ShellStatus;
use crate::config::Config;
use crate::error::ShellError;
use crate::parser::tokenize;
use crate::path::SearchPath;
use std::env;
use std::io::Write;
use std::str::FromStr;

/// Enumeration of all supported builtin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
}

impl FromStr for Builtin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exit" => Ok(Builtin::Exit),
            "echo" => Ok(Builtin::Echo),
            "type" => Ok(Builtin::Type),
            "pwd" => Ok(Builtin::Pwd),
            "cd" => Ok(Builtin::Cd),
            _ => Err(()),
        }
    }
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Type => "type",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
        }
    }

    /// Executes the builtin command.
    ///
    /// `args` is the raw argument text following the command name; each
    /// builtin tokenizes it itself. Errors are returned for the caller to
    /// report; none of them should stop the shell.
    pub fn execute<W: Write, E: Write>(
        &self,
        args: &str,
        config: &Config,
        mut stdout: W,
        mut stderr: E,
    ) -> Result<ShellStatus, ShellError> {
        let args = tokenize(args);
        match self {
            Builtin::Exit => return exit_cmd(&args),
            Builtin::Echo => echo_cmd(&args, &mut stdout)?,
            Builtin::Type => {
                let search_path = SearchPath::from_env(&config.path_var);
                type_cmd(&args, &search_path, &mut stdout, &mut stderr)?
            }
            Builtin::Pwd => pwd_cmd(&mut stdout)?,
            Builtin::Cd => cd_cmd(&args, &config.home_var)?,
        }
        Ok(ShellStatus::Continue)
    }
}

/// Implementation of the `exit` command.
///
/// No argument exits with status 0; a single integer exits with that status.
fn exit_cmd(args: &[String]) -> Result<ShellStatus, ShellError> {
    match args {
        [] => Ok(ShellStatus::Exit(0)),
        [code] => code
            .parse::<i32>()
            .map(ShellStatus::Exit)
            .map_err(|_| ShellError::InvalidExitCode(code.clone())),
        _ => Err(ShellError::TooManyArguments("exit")),
    }
}

/// Implementation of the `echo` command.
///
/// Prints the arguments to stdout, separated by spaces.
pub fn echo_cmd<W: Write>(args: &[String], writer: &mut W) -> Result<(), ShellError> {
    writeln!(writer, "{}", args.join(" "))?;
    Ok(())
}

/// Implementation of the `type` command.
///
/// Identifies whether a command is a builtin or an executable in the PATH.
pub fn type_cmd<W: Write, E: Write>(
    args: &[String],
    search_path: &SearchPath,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), ShellError> {
    for command in args {
        // 1. Check if it's a builtin
        if Builtin::from_str(command).is_ok() {
            writeln!(stdout, "{} is a shell builtin", command)?;
            continue;
        }

        // 2. External command check
        match search_path.find_executable(command) {
            Some(path) => writeln!(stdout, "{} is {}", command, path.display())?,
            None => writeln!(stderr, "{}: not found", command)?,
        }
    }
    Ok(())
}

/// Implementation of the `pwd` command.
pub fn pwd_cmd<W: Write>(stdout: &mut W) -> Result<(), ShellError> {
    let path = env::current_dir()?;
    writeln!(stdout, "{}", path.display())?;
    Ok(())
}

/// Implementation of the `cd` command.
///
/// No argument, or exactly `~`, changes to the directory named by the home
/// variable. Anything else is used as a literal path.
pub fn cd_cmd(args: &[String], home_var: &str) -> Result<(), ShellError> {
    let target = match args.first().map(String::as_str) {
        None | Some("~") => env::var(home_var).map_err(|_| ShellError::HomeNotSet)?,
        Some(path) => path.to_string(),
    };

    env::set_current_dir(&target).map_err(|source| ShellError::ChangeDir {
        path: target.clone(),
        source,
    })?;
    tracing::debug!(dir = %target, "changed directory");
    Ok(())
}
