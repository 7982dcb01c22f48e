//! dblapi CLI binary.
//!
//! - Run the vote webhook from a config file
//! - Query the directory and print JSON
//! - Post a server count by hand

use clap::Parser;
use dblapi::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_directory_command, load_options, print_widget, serve, token};

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    init_logging(
        LoggingConfig::new(level)
            .with_json(cli.json_logs)
            .with_target(false),
    )?;

    let options = load_options(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, auth, path } => {
            serve(token(cli.token)?, options, port, auth, path).await?;
        }
        Commands::Widget { id, colors } => {
            print_widget(&id, colors)?;
        }
        Commands::Directory(command) => {
            handle_directory_command(command, token(cli.token)?, options).await?;
        }
    }

    Ok(())
}
