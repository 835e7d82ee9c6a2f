use clap::Parser;
use miette::Result;
use tileforge::cli::{Cli, Commands};
use tileforge::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => tileforge::cli::render::run(args, &printer)?,
        Commands::New(args) => tileforge::cli::new::run(args, &printer)?,
        Commands::Info(args) => tileforge::cli::info::run(args, &printer)?,
        Commands::Validate(args) => tileforge::cli::validate::run(args, &printer)?,
        Commands::Palette(args) => tileforge::cli::palette::run(args, &printer)?,
        Commands::List(args) => tileforge::cli::list::run(args, &printer)?,
        Commands::Completions(args) => tileforge::cli::completions::run(args)?,
    }

    Ok(())
}
