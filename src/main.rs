use std::process::ExitCode;

use arbscope::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use arbscope::adapter::inbound::cli::output::{self, OutputConfig};
use arbscope::adapter::inbound::cli::{check, opportunities, run};
use clap::Parser;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Opportunities(args) => opportunities::execute(args),
        Commands::Check(CheckCommand::Config(arg)) => {
            check::config::execute_config(arg.config.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
