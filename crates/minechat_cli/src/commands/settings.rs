//! Settings command - Show parsed options.txt values.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use minechat_settings::ParseWarning;

use super::GlobalArgs;

#[derive(Args)]
pub struct SettingsArgs {
    /// Print a single key, falling back to the defaults
    #[arg(short, long)]
    key: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SettingsReport<'a> {
    root: String,
    settings: &'a minechat_settings::Settings,
    warnings: &'a [ParseWarning],
}

pub async fn execute(global: &GlobalArgs, args: SettingsArgs) -> Result<()> {
    let client = global.read_only_client()?;

    if let Some(key) = &args.key {
        let value = client
            .settings()
            .lookup(key, Some(client.defaults()))
            .ok_or_else(|| anyhow::anyhow!("No setting named '{}'", key))?;

        if args.json {
            println!("{}", serde_json::json!({ "key": key, "value": value }));
        } else {
            println!("{}", value);
        }
        return Ok(());
    }

    if args.json {
        let report = SettingsReport {
            root: client.root().display().to_string(),
            settings: client.settings(),
            warnings: client.parse_warnings(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (key, value) in client.settings().iter() {
        println!("{}:{}", key, value);
    }

    if !global.quiet && !client.parse_warnings().is_empty() {
        eprintln!();
        eprintln!(
            "⚠️  {} problem line(s) in {} ({} skipped):",
            client.parse_warnings().len(),
            client.options_path().display(),
            client.skipped_lines()
        );
        for warning in client.parse_warnings() {
            eprintln!("   {}", warning);
        }
    }

    Ok(())
}
