//! Root command - Print the resolved game directory.

use anyhow::Result;
use clap::Args;

use minechat_settings::{PlatformFamily, SettingsStore};

use super::GlobalArgs;

#[derive(Args)]
pub struct RootArgs {
    /// Resolve the default for another platform (windows, macos, linux)
    #[arg(long)]
    platform: Option<PlatformFamily>,
}

pub async fn execute(global: &GlobalArgs, args: RootArgs) -> Result<()> {
    let mut config = global.client_config()?;
    if let Some(platform) = args.platform {
        config.platform = Some(platform);
    }

    let root = config.resolve_root()?;
    let options = SettingsStore::options_path(&root);

    println!("{}", root.display());
    if !global.quiet && !options.exists() {
        eprintln!("⚠️  No options.txt at {}", options.display());
    }
    Ok(())
}
