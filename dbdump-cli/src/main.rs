use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use dbdump::cli::commands::dump::{handle_dump_command, handle_schema_command};
use dbdump::cli::commands::export::handle_export_command;
use dbdump::cli::commands::plan::handle_plan_command;
use dbdump::cli::{Cli, Commands};
use dbdump::config::Config;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {}", "error:".bright_red().bold(), err);
        for cause in err.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".red(), cause);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let database = cli.database.as_deref();

    match cli.command {
        Commands::Dump(args) => handle_dump_command(args, &config, database),
        Commands::Schema(args) => handle_schema_command(args, &config, database),
        Commands::Export(args) => handle_export_command(args, &config, database),
        Commands::Plan(args) => handle_plan_command(args, &config),
    }
}
