mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, scan};
use lanward_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Info { json } => {
            if !json {
                print::header("local system");
            }
            info::info(Config::from_env(), json)
        }
        Commands::Scan(args) => {
            if !args.json {
                print::header("scanning local segment");
            }
            let cfg = args.apply(Config::from_env());
            scan::scan(&args, cfg).await
        }
    }
}
