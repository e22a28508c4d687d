use clap::Parser;
use layerdraw::cli::{Cli, Commands};
use layerdraw::output::Printer;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();
    match cli.command {
        Commands::Compose(args) => layerdraw::cli::compose::run(args, &printer)?,
        Commands::Transform(args) => layerdraw::cli::transform::run(args, &printer)?,
        Commands::Measure(args) => layerdraw::cli::measure::run(args, &mut std::io::stdout())?,
        Commands::Completions(args) => {
            layerdraw::cli::completions::run(args, &mut std::io::stdout())?
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "layerdraw=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
