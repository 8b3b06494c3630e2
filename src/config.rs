use clap::Parser;

pub const DEFAULT_PROMPT: &str = "$ ";

/// Command line flags for the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "shell-repl", version, about = "A small interactive shell")]
pub struct Cli {
    /// Prompt printed before each line.
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Run a single command line and exit with its status.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub command: Option<String>,

    /// Diagnostic filter, e.g. `debug` (overrides `SHELL_LOG`).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Settings shared by every command in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    /// Variable holding the executable search path.
    pub path_var: String,
    /// Variable holding the home directory used by `cd`.
    pub home_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            path_var: "PATH".to_string(),
            home_var: "HOME".to_string(),
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            prompt: cli.prompt.clone(),
            ..Config::default()
        }
    }
}
