use std::env;
use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use rust_alias_core::config::{self, DEFAULT_SHELL};
use rust_alias_core::error::Result;
use rust_alias_core::plugin::AliasPlugin;
use rust_alias_cli::cli_args::Args;
use rust_alias_cli::host::{ConsoleHost, TerminalMode};
use rust_alias_cli::session::{report_failures, run_line, run_session};

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    let mode = if args.execute {
        let shell = env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());
        TerminalMode::Execute { shell }
    } else {
        TerminalMode::Print
    };

    let mut host = ConsoleHost::new(stdout(), mode);
    let (mut plugin, report) = AliasPlugin::init(&mut host, &config_path)?;
    report_failures(&mut host, &report)?;

    let result = match args.command_line() {
        Some(line) => run_line(&mut plugin, &mut host, &line).map(|_| ()),
        None => run_session(&mut plugin, &mut host, stdin().lock()),
    };

    let ended = plugin.end(&mut host, !args.no_save);

    result.and(ended)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
