mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, hint, territories};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let machine_output = matches!(&commands.command, Commands::Check(args) if args.json);
    logging::init_logging(commands.verbose, commands.quiet, machine_output);

    let cfg = commands.config()?;
    let quiet = commands.quiet > 0 || machine_output;

    match commands.command {
        Commands::Check(args) => {
            print::header("rent-control check", quiet);
            check::check(args, &cfg, quiet).await
        }
        Commands::Hint { lat, lon } => {
            print::header("building registry", quiet);
            hint::hint(lat, lon, &cfg).await
        }
        Commands::Territories => {
            print::header("covered territories", quiet);
            territories::territories();
            Ok(())
        }
    }
}
