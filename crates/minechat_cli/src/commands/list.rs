//! Commands command - List registered commands.

use anyhow::Result;
use clap::Args;

use super::GlobalArgs;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let client = global.read_only_client()?;
    let commands = client.commands().commands();

    if args.json {
        println!("{}", serde_json::to_string_pretty(commands)?);
        return Ok(());
    }

    if commands.is_empty() {
        if !global.quiet {
            println!("No commands registered. Pass --vanilla or add [[commands]] to the config file.");
        }
        return Ok(());
    }

    let prefix = &client.session().options().command_prefix;
    for command in commands {
        if command.aliases().is_empty() {
            println!("{}", command.usage(prefix));
        } else {
            println!("{}  (aliases: {})", command.usage(prefix), command.aliases().join(", "));
        }
    }
    Ok(())
}
