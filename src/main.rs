//! ogrole - declarative management of Opsgenie team roles

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod resource;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, RoleCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("ogrole", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ogrole version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Rights => cli::rights::run(&opts),
        Commands::Validate { file } => cli::manifest::validate(&opts, &file),
        Commands::Plan { file, refresh } => cli::manifest::plan(&opts, &file, refresh).await,
        Commands::Apply { file, yes, dry_run } => {
            cli::manifest::apply(&opts, &file, yes, dry_run).await
        }
        Commands::Refresh => cli::manifest::refresh(&opts).await,
        Commands::Import {
            address,
            team_id,
            role_id,
        } => cli::manifest::import(&opts, &address, &team_id, &role_id).await,
        Commands::Destroy { yes, dry_run } => cli::manifest::destroy(&opts, yes, dry_run).await,
        Commands::Role(role_cmd) => match role_cmd {
            RoleCommands::Get {
                team_id,
                role,
                by_name,
            } => cli::role::get(&opts, &team_id, &role, by_name).await,
            RoleCommands::List { team_id } => cli::role::list(&opts, &team_id).await,
            RoleCommands::Delete {
                team_id,
                role,
                by_name,
                yes,
            } => cli::role::delete(&opts, &team_id, &role, by_name, yes).await,
        },
        Commands::Sweep {
            team_id,
            prefix,
            yes,
            dry_run,
        } => cli::role::sweep(&opts, &team_id, &prefix, yes, dry_run).await,
    }
}
