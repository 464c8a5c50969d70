//! minechat CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Configuration error
//! - 3: Chat state or command error
//! - 4: Input backend error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minechat_core::ChatError;
use minechat_settings::SettingsError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIGURATION_ERROR: u8 = 2;
    pub const CHAT_ERROR: u8 = 3;
    pub const INPUT_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose {
        "minechat=debug,info"
    } else if cli.global.quiet {
        "error"
    } else {
        "minechat=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logging may already be initialized; keep going either way.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    let global = cli.global;
    let result = match cli.command {
        Commands::Root(args) => commands::root::execute(&global, args).await,
        Commands::Settings(args) => commands::settings::execute(&global, args).await,
        Commands::Say(args) => commands::say::execute(&global, args).await,
        Commands::Run(args) => commands::run::execute(&global, args).await,
        Commands::Commands(args) => commands::list::execute(&global, args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(chat) = e.downcast_ref::<ChatError>() {
        return if chat.is_configuration() {
            ExitCodes::CONFIGURATION_ERROR
        } else if chat.is_state() || chat.is_command() || chat.is_registration() {
            ExitCodes::CHAT_ERROR
        } else if matches!(chat, ChatError::Input(_)) {
            ExitCodes::INPUT_ERROR
        } else {
            ExitCodes::GENERAL_ERROR
        };
    }

    match e.downcast_ref::<SettingsError>() {
        Some(settings) if settings.is_configuration() => ExitCodes::CONFIGURATION_ERROR,
        _ => ExitCodes::GENERAL_ERROR,
    }
}
