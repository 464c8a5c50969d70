//! Run command - Open the chat and type a registered command.

use anyhow::{Context, Result};
use clap::Args;

use super::GlobalArgs;

#[derive(Args)]
pub struct RunArgs {
    /// Command name or alias
    pub command: String,

    /// Command arguments, in parameter order
    pub args: Vec<String>,

    /// Press enter after typing
    #[arg(long)]
    pub submit: bool,
}

pub async fn execute(global: &GlobalArgs, args: RunArgs) -> Result<()> {
    let mut client = global.client()?;

    let session = client.session_mut();
    let line = if args.submit {
        session.send_command_and_submit(&args.command, args.args.as_slice()).await
    } else {
        session.send_command(&args.command, args.args.as_slice()).await
    }
    .with_context(|| format!("Failed to send '{}'", args.command))?;

    if !global.quiet {
        println!("✅ {}", line);
    }
    Ok(())
}
