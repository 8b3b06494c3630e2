use anyhow::Context;
use clap::Parser;
use shell_repl::config::Cli;
use shell_repl::input::Prompter;
use shell_repl::{Config, Shell, ShellStatus};
use std::{io, process};
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env("SHELL_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    let mut shell = Shell::new(Config::from(&cli));
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Some(line) = &cli.command {
        let code = match shell.execute_line(line, &mut stdout, &mut stderr) {
            ShellStatus::Exit(code) => code,
            ShellStatus::Continue => shell.last_status(),
        };
        process::exit(code);
    }

    let mut prompter = Prompter::new(shell.config().prompt.clone());
    loop {
        let Some(line) = prompter.read_line().context("failed to read input")? else {
            return Ok(());
        };

        match shell.execute_line(&line, &mut stdout, &mut stderr) {
            ShellStatus::Exit(code) => process::exit(code),
            ShellStatus::Continue => continue,
        }
    }
}
