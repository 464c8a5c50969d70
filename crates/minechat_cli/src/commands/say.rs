//! Say command - Open the chat and type a message.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::GlobalArgs;

#[derive(Args)]
pub struct SayArgs {
    /// Message to type; words are joined with single spaces
    #[arg(required = true)]
    message: Vec<String>,

    /// Press enter after typing
    #[arg(long)]
    submit: bool,
}

pub async fn execute(global: &GlobalArgs, args: SayArgs) -> Result<()> {
    let mut client = global.client()?;
    let message = args.message.join(" ");

    let session = client.session_mut();
    if args.submit {
        session.send_and_submit(&message).await?;
    } else {
        session.send(&message).await?;
    }

    info!("Typed message ({} chars)", message.chars().count());
    if !global.quiet {
        println!("✅ {}", message);
    }
    Ok(())
}
