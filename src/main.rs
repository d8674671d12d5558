use clap::Parser;
use std::process;

use logsort::cli::Cli;
use logsort::commands::run_report;
use logsort::config::{load_config, render_config, ResolvedConfig};
use logsort::error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    builder.init();
}

fn run(cli: Cli) -> Result<()> {
    if print_completions(&cli) {
        return Ok(());
    }

    let mut config = ResolvedConfig::from_config(&load_config()?);
    cli.apply(&mut config.report);

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    let options = cli.report_options(config.report)?;
    run_report(&cli.files, &options)
}

#[cfg(feature = "completions")]
fn print_completions(cli: &Cli) -> bool {
    use clap::CommandFactory;

    let Some(shell) = cli.completions else {
        return false;
    };
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "logsort", &mut std::io::stdout());
    true
}

#[cfg(not(feature = "completions"))]
fn print_completions(_cli: &Cli) -> bool {
    false
}
