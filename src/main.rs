//! wraith binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wraith::cli::{Cli, Commands};
use wraith::output;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Ports(cmd) => cmd.execute(cli.quiet).await,
        Commands::Subdomains(cmd) => cmd.execute(cli.quiet).await,
        Commands::Usernames(cmd) => cmd.execute(cli.quiet).await,
        Commands::History(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
