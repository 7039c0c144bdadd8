use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging - info for our crate, debug with --verbose
    let default_filter = if cli.verbose { "laqp=debug,laqp_lib=debug" } else { "laqp=info,laqp_lib=info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let contest = cli.load_contest()?;

    match cli.command {
        cli::Commands::Validate(args) => cli::run_validate(args, cli.format, &contest).await?,
        cli::Commands::Score(args) => cli::run_score(args, cli.format, contest).await?,
        cli::Commands::Process(args) => cli::run_process(args, cli.format, contest).await?,
    }

    Ok(())
}
